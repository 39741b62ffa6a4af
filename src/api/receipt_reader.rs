use axum::{
    extract::{Multipart, State},
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{error::ServiceError, state::AppState};

/// POST /receipt_reader
///
/// Relays an uploaded receipt image to the inference service and returns the
/// extracted purchase object. The result is passed through unvalidated;
/// callers must tolerate incomplete extractions.
pub async fn receipt_reader(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ServiceError> {
    let mut image_bytes: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::bad_input(format!("Error reading uploaded file: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "image" => {
                filename = field.file_name().map(|s| s.to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    ServiceError::bad_input(format!("Error reading uploaded file: {}", e))
                })?;
                image_bytes = Some(bytes.to_vec());
            }
            other => {
                warn!("Unexpected multipart field: {}", other);
            }
        }
    }

    let image = match image_bytes {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Err(ServiceError::bad_input("No image provided")),
    };

    info!(
        "Receipt extraction request: {} ({} bytes)",
        filename.as_deref().unwrap_or("unknown"),
        image.len()
    );

    let extracted = state
        .gemini
        .extract_receipt(image, filename.as_deref())
        .await?;

    Ok(Json(extracted))
}

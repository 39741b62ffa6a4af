use axum::{
    extract::State,
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::{error::ServiceError, models::PurchaseRecord, state::AppState};

/// POST /save_purchase
///
/// Persists a purchase record as-is after a presence-only check of the
/// required keys. Extra keys, including a caller-attached `user_id`, are
/// stored untouched.
pub async fn save_purchase(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ServiceError> {
    let record = PurchaseRecord::from_body(body.map(|Json(value)| value))?;

    let purchase_id = state.store.insert(record.into_value()).await?;
    info!("Purchase saved with id {}", purchase_id);

    Ok(Json(json!({
        "message": "Purchase saved successfully",
        "purchase_id": purchase_id,
    })))
}

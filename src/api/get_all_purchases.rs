use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::{error::ServiceError, state::AppState};

/// GET /get_all_purchases/:user_id
///
/// Returns every stored purchase for the given user. The route only matches
/// integer identifiers; an empty result is a 404, not a fault.
pub async fn get_all_purchases(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Value>>, ServiceError> {
    let purchases = state.store.find_by_user(user_id).await?;

    if purchases.is_empty() {
        return Err(ServiceError::not_found("No purchases found for this user"));
    }

    info!("Returning {} purchases for user {}", purchases.len(), user_id);
    Ok(Json(purchases))
}

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::state::AppState;

pub mod get_all_purchases;
pub mod receipt_reader;
pub mod save_purchase;

pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/receipt_reader", post(receipt_reader::receipt_reader))
        .route("/save_purchase", post(save_purchase::save_purchase))
        .route(
            "/get_all_purchases/:user_id",
            get(get_all_purchases::get_all_purchases),
        )
}

use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

use api::create_api_router;
use state::AppState;

pub fn create_app_router(app_state: Arc<AppState>) -> Router {
    create_api_router()
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(15 * 1024 * 1024)) // headroom for image uploads
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

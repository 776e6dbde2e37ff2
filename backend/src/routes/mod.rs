//! Route definitions for the Espresso Dialer API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/shots", shot_routes())
}

/// Shot evaluation and history routes
fn shot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_shots).delete(handlers::clear_shots))
        .route("/evaluate", post(handlers::evaluate_shot))
        .route("/latest", get(handlers::latest_shot))
}

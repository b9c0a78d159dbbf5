//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create the application router
pub fn app_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/", get(handlers::root))
        // Question answering
        .route("/api", post(handlers::ask))
        .with_state(state)
}

//! HTTP server implementation

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::rag::RagService;
use crate::Result;

/// Request body ceiling; large enough for base64 image payloads even though
/// OCR is not implemented yet.
const MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

/// Build the application with all middleware layers applied
pub fn app(state: AppState) -> Router {
    routes::app_routes(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Start the API server
///
/// # Errors
/// - Provider client build errors (invalid configuration)
/// - Listener bind errors (port in use, permission denied)
pub async fn serve_api(config: &AppConfig, host: String, port: u16) -> Result<()> {
    info!("🚀 Starting virtual TA API server...");

    // Provider clients are built once here and shared across all requests
    let rag_service = Arc::new(RagService::new(config)?);
    let state = AppState { rag_service };

    let app = app(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}/api", addr);
    info!("Available endpoints:");
    info!("  GET  /     - Health check");
    info!("  POST /api  - Ask a question");

    axum::serve(listener, app).await?;

    Ok(())
}

//! API request handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::Value;
use tracing::error;
use tracing::info;

use crate::api::types::parse_ask_request;
use crate::api::types::AskResponse;
use crate::api::types::ErrorResponse;
use crate::api::types::StatusResponse;
use crate::errors::VirtualTaError;
use crate::rag::RagService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub rag_service: Arc<RagService>,
}

/// Root health check handler
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "server is running".to_string(),
    })
}

/// Ask a question (POST /api)
///
/// Validation failures get a 400 with a specific message before any
/// provider call; every other failure collapses into one generic 500.
pub async fn ask(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let query = match parse_ask_request(&body) {
        Ok(query) => query,
        Err(e) => {
            let message = match e {
                VirtualTaError::Validation(message) => message,
                other => other.to_string(),
            };
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: message }),
            )
                .into_response();
        }
    };

    info!("POST /api: {}", query.question);

    match state
        .rag_service
        .answer(&query.question, query.image.as_deref())
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(AskResponse {
                answer: result.answer,
                links: result.links,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("API error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                }),
            )
                .into_response()
        }
    }
}

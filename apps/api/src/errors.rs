use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::llm_client::UpstreamError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// This is a server-rendered app, so errors surface as styled HTML pages;
/// internal causes are logged and replaced with generic messages.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("AI backend not configured")]
    LlmUnavailable,

    #[error("Upstream AI error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "Invalid Request", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Could Not Process",
                msg.clone(),
            ),
            AppError::LlmUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI Not Configured",
                "The AI backend is not configured. Set the GEMINI_API_KEY environment variable."
                    .to_string(),
            ),
            AppError::Upstream(e) => {
                tracing::error!("Upstream AI error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI Error",
                    "The AI backend request failed. Try again later.".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI Error",
                    "An AI processing error occurred.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error",
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = crate::ui::page(title, &crate::ui::error_panel(title, &message));
        (status, Html(body)).into_response()
    }
}

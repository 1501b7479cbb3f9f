use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Extraction(e) => match e {
                ExtractError::UnsupportedFormat(_) => (
                    StatusCode::BAD_REQUEST,
                    "UNSUPPORTED_FILE_TYPE",
                    e.advisory().to_string(),
                ),
                ExtractError::TooLarge(_) => (
                    StatusCode::BAD_REQUEST,
                    "FILE_TOO_LARGE",
                    e.advisory().to_string(),
                ),
                _ => {
                    tracing::error!("Resume extraction error: {e}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "EXTRACTION_FAILED",
                        e.advisory().to_string(),
                    )
                }
            },
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

//! Error types for the intake server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intake_core::DateError;
use intake_render::RenderError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Render timeout after {0}ms")]
    Timeout(u64),

    #[error("Archive write failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Clock error: {0}")]
    Clock(#[from] DateError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ApiError::Render(_) => (StatusCode::INTERNAL_SERVER_ERROR, "RENDER_FAILED"),
            ApiError::Timeout(_) => (StatusCode::REQUEST_TIMEOUT, "TIMEOUT"),
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            ApiError::Clock(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        tracing::error!(code, error = %self, "intake request failed");

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code,
        };

        (status, Json(body)).into_response()
    }
}

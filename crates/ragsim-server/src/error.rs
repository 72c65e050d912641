//! Error types for the ragsim server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The engine rejected the operation.
    #[error("{0}")]
    Engine(#[from] ragsim_core::Error),

    /// IO error while binding or serving.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured listen address did not parse.
    #[error("invalid listen address: {0}")]
    Address(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Engine rejections are the caller's fault.
            ApiError::Engine(_) => StatusCode::BAD_REQUEST,
            ApiError::Io(_) | ApiError::Address(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Result type for server operations.
pub type ApiResult<T> = Result<T, ApiError>;

//! Error types for the SixDegrees HTTP dispatcher.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use errors::GraphError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for the dispatcher.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by HTTP handlers and the server lifecycle.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Outcome of a store or engine operation.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Malformed body, or a required field missing or empty.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A listing or lookup produced nothing to return.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Server startup error.
    #[error("Server error: {0}")]
    Server(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Error response body for HTTP endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Graph(err) => match err {
                GraphError::Validation { .. } | GraphError::Conflict { .. } => {
                    (StatusCode::BAD_REQUEST, err.code(), err.to_string(), None)
                }
                GraphError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, err.code(), err.to_string(), None)
                }
                GraphError::Internal { reason } => {
                    tracing::error!(reason = %reason, "Internal graph error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        err.code(),
                        "An internal error occurred".to_string(),
                        Some(reason.clone()),
                    )
                }
            },
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            Self::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
                msg.clone(),
                None,
            ),
            Self::Server(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERVER_ERROR",
                msg.clone(),
                None,
            ),
        };

        if status.is_client_error() {
            tracing::debug!(status = status.as_u16(), code, "Request rejected");
        }

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

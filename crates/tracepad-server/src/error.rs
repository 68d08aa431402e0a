//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all endpoints. It implements
//! `axum::response::IntoResponse` to produce structured JSON error responses
//! with appropriate HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use tracepad_core::{FileError, GateError, SessionError};

/// Structured error detail in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "CONFLICT").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unknown input slot or navigation action (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Operation not allowed in the current run phase (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Submission attempted with blank inputs (422).
    #[error("inputs incomplete: {0}")]
    InputsIncomplete(String),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::InputsIncomplete(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INPUTS_INCOMPLETE", msg)
            }
            ApiError::InternalError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
        };

        let body = serde_json::json!({
            "success": false,
            "error": ApiErrorDetail {
                code: code.to_string(),
                message,
            },
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match &err {
            SessionError::Busy | SessionError::NotCollecting | SessionError::NotRunning => {
                ApiError::Conflict(err.to_string())
            }
            SessionError::Gate(GateError::SlotOutOfRange { .. }) => {
                ApiError::NotFound(err.to_string())
            }
            SessionError::Gate(GateError::NotReady { .. }) => {
                ApiError::InputsIncomplete(err.to_string())
            }
        }
    }
}

impl From<FileError> for ApiError {
    fn from(err: FileError) -> Self {
        match &err {
            FileError::UnsupportedExtension { .. } | FileError::OutsideWorkspace { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            FileError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ApiError::NotFound(err.to_string())
            }
            FileError::Io { .. } => ApiError::InternalError(err.to_string()),
        }
    }
}

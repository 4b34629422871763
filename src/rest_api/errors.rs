//! # REST API Errors
//!
//! Error types for the HTTP boundary, mapped onto status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::conditional::MatchError;
use crate::engine::EngineError;
use crate::payload::ExtractError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// The key must be a positive integer
    #[error("invalid id")]
    InvalidKey,

    /// The request body failed extraction
    #[error("{0}")]
    Body(#[from] ExtractError),

    /// A conditional header failed to parse
    #[error("{0}")]
    Conditional(#[from] MatchError),

    /// The supplied `If-Match` list did not match the current tag
    #[error("precondition failed")]
    PreconditionFailed,

    // ==================
    // Store Outcomes
    // ==================
    /// An engine outcome, client or server error depending on its kind
    #[error("{0}")]
    Engine(#[from] EngineError),
}

impl RestError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            RestError::InvalidKey => StatusCode::BAD_REQUEST,
            RestError::Body(_) => StatusCode::BAD_REQUEST,
            RestError::Conditional(_) => StatusCode::BAD_REQUEST,
            RestError::Engine(EngineError::EmptyPayload) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            RestError::Engine(EngineError::NotFound) => StatusCode::NOT_FOUND,

            // 412 Precondition Failed
            RestError::PreconditionFailed => StatusCode::PRECONDITION_FAILED,

            // 5xx
            RestError::Engine(EngineError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            RestError::Engine(EngineError::Storage { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        // Storage failures keep their classification in the log, never in
        // the response body.
        if let RestError::Engine(EngineError::Storage {
            code,
            constraint,
            message,
        }) = &self
        {
            error!(?code, ?constraint, message, "storage failure");
        }

        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}

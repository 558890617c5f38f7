//! API error types for HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gaf_core::Error as CoreError;
use serde::{Deserialize, Serialize};

/// Structured API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "ARTIFACT_NOT_FOUND" => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        tracing::error!(error = %err, "request failed");

        // For storage errors, don't expose details
        let message = if err.is_database() {
            "An internal database error occurred".to_string()
        } else {
            err.to_string()
        };

        Self::new(err.code(), message)
    }
}

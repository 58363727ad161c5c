//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Every error body is JSON of the form `{"message": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Message sent for any failure whose detail must stay server-side.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error type for the proxy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Upstream could not be reached or sent something unreadable.
    #[error("Upstream error: {0}")]
    Upstream(UpstreamError),

    /// Upstream answered with an error status; relayed to the caller.
    #[error("Rejected by upstream ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Map an upstream failure, using `default_message` when an error status
    /// arrives without a usable message.
    pub fn relay(err: UpstreamError, default_message: &str) -> Self {
        match err {
            UpstreamError::Status { status, message } => Self::Rejected {
                status,
                message: message.unwrap_or_else(|| default_message.to_string()),
            },
            other => Self::Upstream(other),
        }
    }

    /// HTTP status sent to the caller.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Upstream(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected { status, .. } => *status,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Message sent to the caller.
    #[must_use]
    pub fn client_message(&self) -> &str {
        match self {
            // Don't expose internal error details to clients
            Self::Upstream(_) | Self::Internal(_) => INTERNAL_ERROR_MESSAGE,
            Self::Rejected { message, .. }
            | Self::Unauthorized(message)
            | Self::NotFound(message) => message.as_str(),
        }
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        Self::relay(err, INTERNAL_ERROR_MESSAGE)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Upstream(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else if matches!(self, Self::Rejected { status, .. } if status.is_server_error()) {
            tracing::warn!(error = %self, "Upstream server error relayed");
        }

        let status = self.status();
        let body = Json(ErrorBody {
            message: self.client_message(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::ValidationErrors;
use platform::client::ClientError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Durable storage or cookie jar could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Form input rejected before any network call
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Backend answered with a failure
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// Backend unreachable or answered with something unreadable
    #[error("{0}")]
    Client(#[from] ClientError),

    /// Session data is missing or malformed
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// Same operation already pending
    #[error("A request is already in progress")]
    Busy,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::UnprocessableEntity,
            AuthError::Backend { status, .. } => {
                ErrorKind::from_status(*status).unwrap_or(ErrorKind::BadGateway)
            }
            AuthError::Client(ClientError::InvalidJson(_)) => ErrorKind::BadGateway,
            AuthError::Client(ClientError::Transport(e)) if e.is_timeout() => {
                ErrorKind::GatewayTimeout
            }
            AuthError::Client(_) => ErrorKind::ServiceUnavailable,
            AuthError::InvalidSession(_) => ErrorKind::Unauthorized,
            AuthError::Busy => ErrorKind::TooManyRequests,
            AuthError::Storage(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Message safe to show a user
    ///
    /// Backend messages are passed through; anything internal collapses to
    /// the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Backend { message, .. } => message.clone(),
            AuthError::Validation(errors) => errors.to_string(),
            AuthError::Busy => self.to_string(),
            _ => "An unexpected error occurred".to_string(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(errors) => errors.clone().into(),
            _ => AppError::new(self.kind(), self.user_message()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Storage(msg) => {
                tracing::error!(message = %msg, "Auth storage error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Client(e) => {
                tracing::error!(error = %e, "Auth backend unreachable");
            }
            AuthError::Backend { status, message } => {
                tracing::warn!(status = *status, message = %message, "Auth rejected by backend");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<std::io::Error> for AuthError {
    fn from(err: std::io::Error) -> Self {
        AuthError::Storage(err.to_string())
    }
}

//! Catalog Error Types
//!
//! Catalog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::ValidationErrors;
use platform::client::ClientError;
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Form input rejected before any network call
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Backend answered with a failure; `message` is shown as is
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// Backend unreachable or answered with something unreadable
    #[error("{0}")]
    Client(#[from] ClientError),

    /// Successful reply without the expected `data`
    #[error("Response had no data: {0}")]
    MissingData(&'static str),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::UnprocessableEntity,
            CatalogError::Backend { status, .. } => {
                ErrorKind::from_status(*status).unwrap_or(ErrorKind::BadGateway)
            }
            CatalogError::Client(ClientError::Transport(e)) if e.is_timeout() => {
                ErrorKind::GatewayTimeout
            }
            CatalogError::Client(ClientError::InvalidJson(_)) | CatalogError::MissingData(_) => {
                ErrorKind::BadGateway
            }
            CatalogError::Client(_) => ErrorKind::ServiceUnavailable,
        }
    }

    /// Message safe to show a user
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Backend { message, .. } => message.clone(),
            CatalogError::Validation(errors) => errors.to_string(),
            _ => "An unexpected error occurred".to_string(),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            CatalogError::Validation(errors) => errors.clone().into(),
            _ => AppError::new(self.kind(), self.user_message()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            CatalogError::Client(e) => {
                tracing::error!(error = %e, "Extension service unreachable");
            }
            CatalogError::MissingData(what) => {
                tracing::error!(what, "Extension service returned no data");
            }
            CatalogError::Backend { status, message } => {
                tracing::warn!(status = *status, message = %message, "Rejected by extension service");
            }
            CatalogError::Validation(_) => {
                tracing::debug!(error = %self, "Extension form rejected");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" shared by every crate:
//! - The unified error type and result alias
//! - The backend response envelope (`{ success, message, data, errors }`)
//! - Cross-cutting form validation (`ValidationErrors`)
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod envelope;
pub mod validation;

pub use envelope::ApiEnvelope;
pub use error::app_error::{AppError, AppResult};
pub use error::kind::ErrorKind;
pub use validation::{FieldError, ValidationErrors};

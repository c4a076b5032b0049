//! Cross-cutting validation
//!
//! Form checks that run before any network call. Every failing field is
//! collected so the caller can show all problems at once.

use std::fmt;

use serde::Serialize;

use crate::error::app_error::AppError;

/// One failing field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All failing fields of one form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First message recorded for `field`
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(value)` if nothing failed
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&lines.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::unprocessable("Validation failed").with_errors(
            errors
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message)),
        )
    }
}

/// Length in Unicode scalar values, which is what users count
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_ok() {
        assert_eq!(ValidationErrors::new().into_result(5), Ok(5));
    }

    #[test]
    fn test_collects_fields() {
        let mut errors = ValidationErrors::new();
        errors.push("username", "Username must be at least 3 characters");
        errors.push("password", "Password must be at least 8 characters");

        assert_eq!(
            errors.for_field("password"),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(errors.for_field("confirmPassword"), None);
        assert_eq!(
            errors.to_string(),
            "username: Username must be at least 3 characters; password: Password must be at least 8 characters"
        );
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn test_into_app_error() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "Extension name is required");
        let app: AppError = errors.into();
        assert_eq!(app.status_code(), 422);
        assert_eq!(app.errors(), ["name: Extension name is required"]);
    }

    #[test]
    fn test_char_len_counts_scalars() {
        assert_eq!(char_len("añb"), 3);
        assert_eq!(char_len(""), 0);
    }
}

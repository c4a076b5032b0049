//! Credentials Value Object
//!
//! Username/password pair sent to `/auth/login` and `/auth/register`, plus
//! the form rules the login and register pages enforce before submitting.

use std::fmt;

use kernel::validation::{ValidationErrors, char_len};
use serde::Serialize;

// ============================================================================
// Constants
// ============================================================================

pub const USERNAME_MIN_LENGTH: usize = 3;
/// Register form only; login accepts any length the backend does
pub const USERNAME_MAX_LENGTH: usize = 50;
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Credentials as the backend expects them
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// No checks; use [`Credentials::login_form`] or
    /// [`Credentials::register_form`] at the form boundary
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Login form rules
    pub fn login_form(username: &str, password: &str) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if char_len(username) < USERNAME_MIN_LENGTH {
            errors.push("username", "Username must be at least 3 characters");
        }
        check_password(&mut errors, password);
        errors.into_result(Self::new(username, password))
    }

    /// Register form rules, including the confirmation field
    pub fn register_form(
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let len = char_len(username);
        if len < USERNAME_MIN_LENGTH {
            errors.push("username", "Username must be at least 3 characters");
        } else if len > USERNAME_MAX_LENGTH {
            errors.push("username", "Username must be less than 50 characters");
        }
        check_password(&mut errors, password);
        if password != confirm_password {
            errors.push("confirmPassword", "Passwords do not match");
        }
        errors.into_result(Self::new(username, password))
    }
}

fn check_password(errors: &mut ValidationErrors, password: &str) {
    if char_len(password) < PASSWORD_MIN_LENGTH {
        errors.push("password", "Password must be at least 8 characters");
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

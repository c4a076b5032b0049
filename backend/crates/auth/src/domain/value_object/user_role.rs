use serde::{Deserialize, Serialize};
use std::fmt;

/// Role reported by the backend
///
/// The backend owns the role vocabulary. `USER` and `ADMIN` are the ones the
/// portal knows about; anything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    #[default]
    User,
    Admin,
    Other(String),
}

impl UserRole {
    #[inline]
    pub fn code(&self) -> &str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
            UserRole::Other(code) => code,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Parse a backend code; blank means `USER`
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        if code.is_empty() || code.eq_ignore_ascii_case("user") {
            UserRole::User
        } else if code.eq_ignore_ascii_case("admin") {
            UserRole::Admin
        } else {
            UserRole::Other(code.to_string())
        }
    }
}

impl From<String> for UserRole {
    fn from(code: String) -> Self {
        UserRole::from_code(&code)
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.code().to_string()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

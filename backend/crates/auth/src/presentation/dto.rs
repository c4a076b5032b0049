//! API DTOs (Data Transfer Objects)

use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Proxy failure details
// ============================================================================

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";
pub const AUTH_SERVICE_UNREACHABLE: &str = "Failed to connect to authentication service";
pub const REGISTRATION_SERVICE_UNREACHABLE: &str = "Failed to connect to registration service";
pub const USER_SERVICE_UNREACHABLE: &str = "Failed to connect to user service";

// ============================================================================
// Current User
// ============================================================================

/// `GET /api/auth/me` success body
///
/// `user` is whatever the backend put in `data`, untouched.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub success: bool,
    pub user: Value,
}


//! User Token DTO
//!
//! `data` of a successful `/auth/login` or `/auth/register` reply.

use serde::{Deserialize, Serialize};

/// `{ token, userId, username, role, expiresAt }`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserToken {
    pub token: String,
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub expires_at: String,
}

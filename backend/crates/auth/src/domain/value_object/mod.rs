//! Value Object Module

pub mod auth_token;
pub mod credentials;
pub mod user_role;

//! Entity Module

pub mod session;
pub mod user_token;

pub use session::Session;
pub use user_token::UserToken;

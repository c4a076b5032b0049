//! Application Layer
//!
//! Session store, auth gateway and configuration.

pub mod auth_gateway;
pub mod config;
pub mod session_store;

// Re-exports
pub use auth_gateway::{AuthGateway, AuthOutcome};
pub use config::AuthConfig;
pub use session_store::{AuthState, Navigation, SessionStore};

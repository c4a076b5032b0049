//! Domain Layer
//!
//! Contains entities, value objects, and the ports the application layer
//! talks through.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Session, UserToken};
pub use repository::{AuthApi, CookieJar, KeyValueStorage};

//! Auth (Authentication) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session entity, value objects, storage and backend ports
//! - `application/` - Session store, auth gateway, configuration
//! - `infra/` - Memory/file storage, cookie jar, backend HTTP client
//! - `presentation/` - Route guard, proxy handlers, DTOs, router
//!
//! ## Session Model
//! - The backend issues an opaque token on login/register
//! - The client keeps it in durable storage and mirrors it into a readable
//!   `auth_token` cookie (7 days, `SameSite=Lax`)
//! - The route guard only checks that cookie's presence; token validity is
//!   the backend's business

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{AuthGateway, AuthOutcome, AuthState, Navigation, SessionStore};
pub use error::{AuthError, AuthResult};
pub use infra::{FileStorage, HttpAuthApi, MemoryStorage, StorageCookieJar};
pub use presentation::middleware::route_guard;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

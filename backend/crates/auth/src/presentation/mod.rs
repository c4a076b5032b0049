//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the route guard middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{GuardDecision, RouteClass, classify, decide, route_guard};
pub use router::auth_router;

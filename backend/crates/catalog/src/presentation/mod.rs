//! Presentation Layer

pub mod handlers;
pub mod router;

pub use handlers::CatalogAppState;
pub use router::catalog_router;

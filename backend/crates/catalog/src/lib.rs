//! Catalog (Extensions) Module
//!
//! - `domain/` - Backend DTOs, listing filter, pagination window, form rules
//! - `infra/` - Typed client for the extension endpoints
//! - `presentation/` - `/api/extensions` and `/api/tags` proxy
//!
//! The backend owns the catalog. This crate only shapes requests, checks
//! forms before they are sent, and carries replies back.

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use domain::{ExtensionFilter, ExtensionForm, PageItem, PageWindow, page_window};
pub use error::{CatalogError, CatalogResult};
pub use infra::CatalogClient;
pub use presentation::catalog_router;

pub mod models {
    pub use crate::domain::dto::*;
}

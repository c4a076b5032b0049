//! Catalog Router

use axum::{Router, routing::any};
use platform::client::BackendClient;
use std::sync::Arc;

use crate::presentation::handlers::{self, CatalogAppState};

/// Extension API proxy router; nest it under `/api`
pub fn catalog_router(backend: BackendClient) -> Router {
    let state = CatalogAppState {
        backend: Arc::new(backend),
    };

    Router::new()
        .route("/extensions", any(handlers::forward))
        .route("/extensions/{*rest}", any(handlers::forward))
        .route("/tags", any(handlers::forward))
        .route("/tags/{*rest}", any(handlers::forward))
        .with_state(state)
}

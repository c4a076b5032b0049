//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use platform::client::BackendClient;
use std::sync::Arc;

use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth proxy router; mount it under `AuthConfig::auth_api_prefix`
pub fn auth_router(backend: BackendClient) -> Router {
    let state = AuthAppState {
        backend: Arc::new(backend),
    };

    Router::new()
        .route("/login", post(handlers::login))
        .route("/register", post(handlers::register))
        .route("/me", get(handlers::current_user))
        .with_state(state)
}

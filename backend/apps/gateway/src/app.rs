//! Router assembly
//!
//! `/api/auth/*` and `/api/{extensions,tags}` go to the backend proxies;
//! every other path is a static front-end file. The route guard wraps all
//! of it, static assets included, and skips what `AuthConfig` excludes.

use std::sync::Arc;

use auth::{auth_router, route_guard};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use catalog::catalog_router;
use platform::client::BackendClient;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;

pub const CATALOG_API_PREFIX: &str = "/api";

pub fn build_app(config: &GatewayConfig, backend: BackendClient) -> Router {
    let auth_config = Arc::new(config.auth.clone());
    let pages = ServeDir::new(&config.static_dir).append_index_html_on_directories(true);

    Router::new()
        .nest(&auth_config.auth_api_prefix, auth_router(backend.clone()))
        .nest(CATALOG_API_PREFIX, catalog_router(backend))
        .fallback_service(pages)
        .layer(axum::middleware::from_fn_with_state(
            auth_config,
            route_guard,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors(&config.frontend_origins))
}

fn cors(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

//! Extension API proxy
//!
//! Everything under `/api/extensions` and `/api/tags` goes to the backend
//! with the `/api` prefix dropped. Method, query, body, `Content-Type` and
//! `Authorization` are forwarded; status, `Content-Type` and body come back
//! untouched.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::client::{BackendClient, BackendResponse, ForwardRequest};

use crate::error::CatalogError;

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";
pub const EXTENSION_SERVICE_UNREACHABLE: &str = "Failed to connect to extension service";

/// Request bodies above this are refused before reaching the backend
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct CatalogAppState {
    pub backend: Arc<BackendClient>,
}

/// ANY /api/extensions[/...], /api/tags[/...]
pub async fn forward(State(state): State<CatalogAppState>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());

    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = %e, "Proxy request body rejected");
            return AppError::bad_request("Invalid request body")
                .with_source(e)
                .into_response();
        }
    };

    tracing::debug!(method = %parts.method, path = %path_and_query, "Forwarding to extension service");

    let request = ForwardRequest {
        method: parts.method,
        path_and_query,
        content_type: parts.headers.get(header::CONTENT_TYPE).cloned(),
        authorization: parts.headers.get(header::AUTHORIZATION).cloned(),
        body,
    };

    match state.backend.forward(request).await {
        Ok(response) => pass_through(response),
        Err(e) => {
            CatalogError::from(e).log();
            AppError::internal(UNEXPECTED_ERROR)
                .with_error(EXTENSION_SERVICE_UNREACHABLE)
                .into_response()
        }
    }
}

fn pass_through(backend: BackendResponse) -> Response {
    let BackendResponse {
        status,
        content_type,
        body,
    } = backend;

    // Unlabelled non-empty bodies are assumed to be JSON
    let content_type = content_type
        .or_else(|| (!body.is_empty()).then(|| HeaderValue::from_static("application/json")));

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    response
}

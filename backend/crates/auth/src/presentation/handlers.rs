//! HTTP Handlers
//!
//! Same-origin proxies in front of the backend's auth endpoints. Bodies are
//! passed through as JSON values; only failures to reach or understand the
//! backend are answered here.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::client::{BackendClient, ClientError};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{AuthError, AuthResult};
use crate::infra::http::{CURRENT_USER_PATH, LOGIN_PATH, REGISTER_PATH};
use crate::presentation::dto::{
    AUTH_SERVICE_UNREACHABLE, CurrentUserResponse, REGISTRATION_SERVICE_UNREACHABLE,
    UNEXPECTED_ERROR, USER_SERVICE_UNREACHABLE,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState {
    pub backend: Arc<BackendClient>,
}

// ============================================================================
// Login / Register
// ============================================================================

/// POST /api/auth/login
pub async fn login(State(state): State<AuthAppState>, body: Bytes) -> Response {
    forward_credentials(&state, LOGIN_PATH, &body, AUTH_SERVICE_UNREACHABLE).await
}

/// POST /api/auth/register
pub async fn register(State(state): State<AuthAppState>, body: Bytes) -> Response {
    forward_credentials(&state, REGISTER_PATH, &body, REGISTRATION_SERVICE_UNREACHABLE).await
}

async fn forward_credentials(
    state: &AuthAppState,
    path: &str,
    body: &[u8],
    unreachable: &'static str,
) -> Response {
    match post_json_verbatim(&state.backend, path, body).await {
        Ok((status, data)) => {
            tracing::debug!(path, status = status.as_u16(), "Auth proxy passed through");
            (status, Json(data)).into_response()
        }
        Err(e) => service_failure(e, unreachable),
    }
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/auth/me
pub async fn current_user(State(state): State<AuthAppState>, headers: HeaderMap) -> Response {
    let Some(token) = bearer_token(&headers) else {
        tracing::debug!("Current user requested without bearer token");
        return AppError::unauthorized("Unauthorized")
            .with_error("Missing or invalid token")
            .into_response();
    };

    match get_json_verbatim(&state.backend, CURRENT_USER_PATH, token).await {
        Ok((status, data)) if !status.is_success() => (status, Json(data)).into_response(),
        Ok((_, mut data)) => {
            let user = data.get_mut("data").map(Value::take).unwrap_or(Value::Null);
            Json(CurrentUserResponse {
                success: true,
                user,
            })
            .into_response()
        }
        Err(e) => service_failure(e, USER_SERVICE_UNREACHABLE),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Token of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn post_json_verbatim(
    backend: &BackendClient,
    path: &str,
    body: &[u8],
) -> AuthResult<(StatusCode, Value)> {
    let payload: Value = serde_json::from_slice(body).map_err(ClientError::from)?;
    let response = backend.post_json(path, &payload, None).await?;
    let data: Value = response.json()?;
    Ok((response.status, data))
}

async fn get_json_verbatim(
    backend: &BackendClient,
    path: &str,
    token: &str,
) -> AuthResult<(StatusCode, Value)> {
    let response = backend.get(path, Some(token)).await?;
    let data: Value = response.json()?;
    Ok((response.status, data))
}

/// 500 failure envelope naming the service that could not be reached
fn service_failure(err: AuthError, detail: &'static str) -> Response {
    err.log();
    AppError::internal(UNEXPECTED_ERROR)
        .with_error(detail)
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}

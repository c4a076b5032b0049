//! Backend HTTP client
//!
//! Thin wrapper over `reqwest` for talking to the extensions REST backend.
//! It never interprets status codes: callers get the status, content type
//! and raw body back and decide for themselves.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderValue, Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Backend connection settings
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, e.g. `http://localhost:5000`; may carry a path prefix
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Errors talking to the backend
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// A request to pass through to the backend unchanged
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    /// Path plus optional query, starting with `/`
    pub path_and_query: String,
    pub content_type: Option<HeaderValue>,
    pub authorization: Option<HeaderValue>,
    pub body: Bytes,
}

/// What the backend answered
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// `"Error: 401 Unauthorized"`, used when a failed reply has no message
    pub fn status_line(&self) -> String {
        format!(
            "Error: {} {}",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("Unknown Status")
        )
    }
}

/// Client for the extensions backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a backend path (with optional query) against the base URL
    ///
    /// Concatenates instead of `Url::join` so a path prefix on the base URL
    /// survives.
    pub fn url(&self, path_and_query: &str) -> Result<reqwest::Url, ClientError> {
        let path = if path_and_query.starts_with('/') {
            path_and_query.to_string()
        } else {
            format!("/{}", path_and_query)
        };
        reqwest::Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    /// `GET path` with an optional bearer token
    pub async fn get(
        &self,
        path_and_query: &str,
        bearer: Option<&str>,
    ) -> Result<BackendResponse, ClientError> {
        let mut request = self.http.get(self.url(path_and_query)?);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        Self::read(request.send().await?).await
    }

    /// Send `body` as JSON with the given method and optional bearer token
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path_and_query: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<BackendResponse, ClientError> {
        let mut request = self
            .http
            .request(method, self.url(path_and_query)?)
            .json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        Self::read(request.send().await?).await
    }

    /// `POST path` with a JSON body
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path_and_query: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<BackendResponse, ClientError> {
        self.send_json(Method::POST, path_and_query, body, bearer)
            .await
    }

    /// `DELETE path` with an optional bearer token
    pub async fn delete(
        &self,
        path_and_query: &str,
        bearer: Option<&str>,
    ) -> Result<BackendResponse, ClientError> {
        let mut request = self.http.delete(self.url(path_and_query)?);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        Self::read(request.send().await?).await
    }

    /// Pass a request through untouched
    pub async fn forward(&self, req: ForwardRequest) -> Result<BackendResponse, ClientError> {
        let mut request = self
            .http
            .request(req.method, self.url(&req.path_and_query)?)
            .body(req.body);
        if let Some(content_type) = req.content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(authorization) = req.authorization {
            request = request.header(header::AUTHORIZATION, authorization);
        }
        Self::read(request.send().await?).await
    }

    async fn read(response: reqwest::Response) -> Result<BackendResponse, ClientError> {
        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Backend responded");

        Ok(BackendResponse {
            status,
            content_type,
            body,
        })
    }
}

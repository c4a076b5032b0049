//! Catalog Client
//!
//! Typed calls against the backend's extension, version and tag endpoints.
//! Every reply is a `{ success, message, data?, errors? }` envelope; a
//! failure surfaces as [`CatalogError::Backend`] carrying the envelope
//! message, or `"Error: <code> <reason>"` when there is none.

use axum::http::Method;
use kernel::envelope::ApiEnvelope;
use platform::client::{BackendClient, BackendResponse};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::dto::{
    ExtensionCreateDto, ExtensionDto, ExtensionUpdateDto, ExtensionVersionCreateDto,
    ExtensionVersionDto, FlagCreateDto, PaginatedResponse, TagDto, TagWithCountDto,
};
use crate::domain::filter::ExtensionFilter;
use crate::error::{CatalogError, CatalogResult};

pub const EXTENSIONS_PATH: &str = "/extensions";
pub const TAGS_PATH: &str = "/tags";
pub const TAGS_WITH_COUNT_PATH: &str = "/tags/withCount";

/// Fallback for a failed envelope with an empty message
const REQUEST_FAILED: &str = "Request failed";

#[derive(Debug, Clone)]
pub struct CatalogClient {
    backend: BackendClient,
    bearer: Option<String>,
}

impl CatalogClient {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            bearer: None,
        }
    }

    /// Same client, sending `Authorization: Bearer <token>`
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into()).filter(|t: &String| !t.is_empty());
        self
    }

    // ========================================================================
    // Extensions
    // ========================================================================

    pub async fn list_extensions(
        &self,
        filter: &ExtensionFilter,
    ) -> CatalogResult<PaginatedResponse<ExtensionDto>> {
        let path = format!("{}?{}", EXTENSIONS_PATH, filter.to_query_string());
        tracing::debug!(path = %path, "Listing extensions");
        self.get_data(&path, "extension page").await
    }

    pub async fn get_extension(&self, id: &str) -> CatalogResult<ExtensionDto> {
        self.get_data(&extension_path(id, &[]), "extension").await
    }

    pub async fn create_extension(&self, dto: &ExtensionCreateDto) -> CatalogResult<ExtensionDto> {
        let response = self.send(Method::POST, EXTENSIONS_PATH, dto).await?;
        required(interpret(response)?, "extension")
    }

    /// Returns the backend's confirmation message
    pub async fn update_extension(
        &self,
        id: &str,
        dto: &ExtensionUpdateDto,
    ) -> CatalogResult<String> {
        let response = self.send(Method::PUT, &extension_path(id, &[]), dto).await?;
        Ok(interpret::<Value>(response)?.message)
    }

    /// Returns the backend's confirmation message
    pub async fn delete_extension(&self, id: &str) -> CatalogResult<String> {
        let response = self
            .backend
            .delete(&extension_path(id, &[]), self.bearer())
            .await?;
        Ok(interpret::<Value>(response)?.message)
    }

    /// Returns the backend's confirmation message
    pub async fn flag_extension(&self, id: &str, dto: &FlagCreateDto) -> CatalogResult<String> {
        let response = self
            .send(Method::POST, &extension_path(id, &["flags"]), dto)
            .await?;
        Ok(interpret::<Value>(response)?.message)
    }

    // ========================================================================
    // Versions
    // ========================================================================

    pub async fn list_versions(&self, extension_id: &str) -> CatalogResult<Vec<ExtensionVersionDto>> {
        self.get_data(&extension_path(extension_id, &["versions"]), "versions")
            .await
    }

    pub async fn get_version(
        &self,
        extension_id: &str,
        version_id: &str,
    ) -> CatalogResult<ExtensionVersionDto> {
        self.get_data(
            &extension_path(extension_id, &["versions", version_id]),
            "version",
        )
        .await
    }

    pub async fn create_version(
        &self,
        extension_id: &str,
        dto: &ExtensionVersionCreateDto,
    ) -> CatalogResult<ExtensionVersionDto> {
        let response = self
            .send(Method::POST, &extension_path(extension_id, &["versions"]), dto)
            .await?;
        required(interpret(response)?, "version")
    }

    // ========================================================================
    // Tags
    // ========================================================================

    pub async fn extension_tags(&self, extension_id: &str) -> CatalogResult<Vec<TagDto>> {
        self.get_data(&extension_path(extension_id, &["tags"]), "tags")
            .await
    }

    pub async fn tags(&self) -> CatalogResult<Vec<TagDto>> {
        self.get_data(TAGS_PATH, "tags").await
    }

    pub async fn tags_with_count(&self) -> CatalogResult<Vec<TagWithCountDto>> {
        self.get_data(TAGS_WITH_COUNT_PATH, "tags").await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        what: &'static str,
    ) -> CatalogResult<T> {
        let response = self.backend.get(path, self.bearer()).await?;
        required(interpret(response)?, what)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> CatalogResult<BackendResponse> {
        Ok(self
            .backend
            .send_json(method, path, body, self.bearer())
            .await?)
    }
}

/// `/extensions/{id}/...` with every segment percent-encoded
fn extension_path(id: &str, rest: &[&str]) -> String {
    let mut path = EXTENSIONS_PATH.to_string();
    for segment in std::iter::once(id).chain(rest.iter().copied()) {
        path.push('/');
        path.push_str(&encode_segment(segment));
    }
    path
}

fn encode_segment(segment: &str) -> String {
    let mut url = match reqwest::Url::parse("http://localhost/") {
        Ok(url) => url,
        Err(_) => return segment.to_string(),
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(segment);
    }
    url.path().trim_start_matches('/').to_string()
}

/// Envelope of a successful reply; anything else is an error
fn interpret<T: DeserializeOwned>(response: BackendResponse) -> CatalogResult<ApiEnvelope<T>> {
    let status = response.status.as_u16();

    if !response.is_success() {
        let message = response
            .json::<ApiEnvelope<Value>>()
            .ok()
            .map(|envelope| envelope.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| response.status_line());
        return Err(CatalogError::Backend { status, message });
    }

    let envelope: ApiEnvelope<T> = response.json()?;
    if !envelope.success {
        return Err(CatalogError::Backend {
            status,
            message: envelope.message_or(REQUEST_FAILED).to_string(),
        });
    }
    Ok(envelope)
}

fn required<T>(envelope: ApiEnvelope<T>, what: &'static str) -> CatalogResult<T> {
    envelope.into_data().ok_or(CatalogError::MissingData(what))
}

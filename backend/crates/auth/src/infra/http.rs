//! HTTP AuthApi
//!
//! Talks to the backend's `/auth/*` endpoints through the shared
//! [`BackendClient`].

use kernel::envelope::ApiEnvelope;
use platform::client::{BackendClient, BackendResponse};
use serde_json::Value;

use crate::domain::entity::user_token::UserToken;
use crate::domain::repository::AuthApi;
use crate::domain::value_object::{auth_token::AuthToken, credentials::Credentials};
use crate::error::{AuthError, AuthResult};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const CURRENT_USER_PATH: &str = "/api/user/me";

#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: BackendClient,
}

impl HttpAuthApi {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// `GET /api/user/me` with the session token; `data` of the reply
    pub async fn current_user(&self, token: &AuthToken) -> AuthResult<Value> {
        let response = self
            .client
            .get(CURRENT_USER_PATH, Some(token.as_str()))
            .await?;
        let status = response.status.as_u16();
        let envelope: ApiEnvelope<Value> = interpret(response)?;
        if !envelope.success || status >= 400 {
            return Err(AuthError::Backend {
                status,
                message: envelope.message_or("Unauthorized").to_string(),
            });
        }
        Ok(envelope.data.unwrap_or(Value::Null))
    }

    async fn post(&self, path: &str, credentials: &Credentials) -> AuthResult<ApiEnvelope<UserToken>> {
        tracing::debug!(path, username = %credentials.username, "Forwarding credentials");
        let response = self.client.post_json(path, credentials, None).await?;
        interpret(response)
    }
}

impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> AuthResult<ApiEnvelope<UserToken>> {
        self.post(LOGIN_PATH, credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> AuthResult<ApiEnvelope<UserToken>> {
        self.post(REGISTER_PATH, credentials).await
    }
}

/// Envelope if the body is one, whatever the status; otherwise a status
/// error for non-2xx and a decode error for 2xx
fn interpret<T>(response: BackendResponse) -> AuthResult<ApiEnvelope<T>>
where
    T: serde::de::DeserializeOwned,
{
    match response.json::<ApiEnvelope<T>>() {
        Ok(envelope) => Ok(envelope),
        Err(_) if !response.is_success() => Err(AuthError::Backend {
            status: response.status.as_u16(),
            message: response.status_line(),
        }),
        Err(e) => Err(e.into()),
    }
}

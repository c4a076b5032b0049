//! Repository Traits
//!
//! Ports to the outside world. Implementations are in the infrastructure
//! layer; tests swap in their own.

use kernel::envelope::ApiEnvelope;

use crate::domain::entity::user_token::UserToken;
use crate::domain::value_object::credentials::Credentials;
use crate::error::AuthResult;

/// Durable string key/value storage that survives restarts
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> AuthResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> AuthResult<()>;

    /// Removing a missing key is not an error
    fn remove(&self, key: &str) -> AuthResult<()>;
}

/// Cookie jar the route guard later reads from
pub trait CookieJar: Send + Sync {
    /// Current value of a cookie, `None` if unset or expired
    fn get(&self, name: &str) -> AuthResult<Option<String>>;

    /// Apply a `Set-Cookie` line, like assigning `document.cookie`
    fn apply(&self, set_cookie: &str) -> AuthResult<()>;
}

/// Backend authentication endpoints
///
/// A reply the backend sends as an envelope, successful or not, comes back
/// as `Ok`. `Err` is for replies without an envelope and transport failures.
#[trait_variant::make(AuthApi: Send)]
pub trait LocalAuthApi {
    /// `POST /auth/login`
    async fn login(&self, credentials: &Credentials) -> AuthResult<ApiEnvelope<UserToken>>;

    /// `POST /auth/register`
    async fn register(&self, credentials: &Credentials) -> AuthResult<ApiEnvelope<UserToken>>;
}

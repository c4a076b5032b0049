//! Auth Gateway
//!
//! Login, register and logout as the forms see them. Every outcome is a
//! plain `{ success, error }`; nothing here returns `Err` to the caller.

use std::sync::Arc;

use kernel::envelope::ApiEnvelope;
use platform::flight::InFlight;

use crate::application::session_store::{Navigation, SessionStore};
use crate::domain::entity::{session::Session, user_token::UserToken};
use crate::domain::repository::{AuthApi, CookieJar, KeyValueStorage};
use crate::domain::value_object::credentials::Credentials;
use crate::error::{AuthError, AuthResult};

pub const LOGIN_FAILED: &str = "Authentication failed";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Result of a login or register attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl AuthOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Auth gateway
pub struct AuthGateway<A, S, C>
where
    A: AuthApi,
    S: KeyValueStorage,
    C: CookieJar,
{
    api: Arc<A>,
    store: Arc<SessionStore<S, C>>,
    login_flight: InFlight,
    register_flight: InFlight,
}

impl<A, S, C> AuthGateway<A, S, C>
where
    A: AuthApi + Sync,
    S: KeyValueStorage,
    C: CookieJar,
{
    pub fn new(api: Arc<A>, store: Arc<SessionStore<S, C>>) -> Self {
        Self {
            api,
            store,
            login_flight: InFlight::new(),
            register_flight: InFlight::new(),
        }
    }

    pub fn store(&self) -> &SessionStore<S, C> {
        &self.store
    }

    /// Sign in; on success the session is stored before returning
    pub async fn login(&self, username: &str, password: &str) -> AuthOutcome {
        let Some(_flight) = self.login_flight.try_begin() else {
            return busy();
        };

        let credentials = Credentials::new(username, password);
        let reply = self.api.login(&credentials).await;
        self.complete(reply, LOGIN_FAILED)
    }

    /// Create an account and sign in with it
    pub async fn register(&self, username: &str, password: &str) -> AuthOutcome {
        let Some(_flight) = self.register_flight.try_begin() else {
            return busy();
        };

        let credentials = Credentials::new(username, password);
        let reply = self.api.register(&credentials).await;
        self.complete(reply, REGISTER_FAILED)
    }

    /// Sign out; the caller must follow the returned navigation
    pub fn logout(&self) -> Navigation {
        self.store.clear_session()
    }

    fn complete(
        &self,
        reply: AuthResult<ApiEnvelope<UserToken>>,
        fallback: &'static str,
    ) -> AuthOutcome {
        let envelope = match reply {
            Ok(envelope) => envelope,
            Err(AuthError::Backend { message, .. }) => return AuthOutcome::failed(message),
            Err(e) => {
                e.log();
                return AuthOutcome::failed(UNEXPECTED_ERROR);
            }
        };

        let message = envelope.message_or(fallback).to_string();
        let data = match envelope.into_data() {
            Some(data) => data,
            None => return AuthOutcome::failed(message),
        };

        match Session::from_user_token(data).and_then(|session| self.store.set_session(session)) {
            Ok(()) => AuthOutcome::ok(),
            Err(e) => {
                e.log();
                AuthOutcome::failed(UNEXPECTED_ERROR)
            }
        }
    }
}

fn busy() -> AuthOutcome {
    let err = AuthError::Busy;
    err.log();
    AuthOutcome::failed(err.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::infra::{cookie_jar::StorageCookieJar, memory::MemoryStorage};
    use platform::client::ClientError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    type Gateway<A> = AuthGateway<A, MemoryStorage, StorageCookieJar<MemoryStorage>>;

    /// Canned backend; optionally blocks until released
    struct FakeApi {
        reply: fn() -> AuthResult<ApiEnvelope<UserToken>>,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl FakeApi {
        fn new(reply: fn() -> AuthResult<ApiEnvelope<UserToken>>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        async fn answer(&self) -> AuthResult<ApiEnvelope<UserToken>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            (self.reply)()
        }
    }

    impl AuthApi for FakeApi {
        async fn login(&self, _credentials: &Credentials) -> AuthResult<ApiEnvelope<UserToken>> {
            self.answer().await
        }

        async fn register(
            &self,
            _credentials: &Credentials,
        ) -> AuthResult<ApiEnvelope<UserToken>> {
            self.answer().await
        }
    }

    fn success() -> AuthResult<ApiEnvelope<UserToken>> {
        Ok(ApiEnvelope::ok(
            UserToken {
                token: "abc".to_string(),
                user_id: "42".to_string(),
                username: "johndoe".to_string(),
                role: "USER".to_string(),
                expires_at: "2999-01-01T00:00:00Z".to_string(),
            },
            "Login successful",
        ))
    }

    fn rejected() -> AuthResult<ApiEnvelope<UserToken>> {
        Ok(ApiEnvelope::failure(
            "Invalid username or password",
            Vec::new(),
        ))
    }

    fn rejected_silently() -> AuthResult<ApiEnvelope<UserToken>> {
        Ok(ApiEnvelope::failure("", Vec::new()))
    }

    fn bad_status() -> AuthResult<ApiEnvelope<UserToken>> {
        Err(AuthError::Backend {
            status: 502,
            message: "Error: 502 Bad Gateway".to_string(),
        })
    }

    fn unreachable_backend() -> AuthResult<ApiEnvelope<UserToken>> {
        Err(AuthError::Client(ClientError::InvalidUrl("nope".to_string())))
    }

    fn gateway<A: AuthApi + Sync>(api: A) -> (Gateway<A>, MemoryStorage, MemoryStorage) {
        let (storage, cookies) = (MemoryStorage::new(), MemoryStorage::new());
        let store = SessionStore::new(
            storage.clone(),
            StorageCookieJar::new(cookies.clone()),
            Arc::new(AuthConfig::development()),
        );
        store.initialize();
        (
            AuthGateway::new(Arc::new(api), Arc::new(store)),
            storage,
            cookies,
        )
    }

    #[tokio::test]
    async fn test_login_success_stores_session() {
        let (gateway, _storage, cookies) = gateway(FakeApi::new(success));

        let outcome = gateway.login("johndoe", "password123").await;

        assert_eq!(outcome, AuthOutcome::ok());
        let session = gateway.store().session().unwrap();
        assert_eq!(session.token.as_str(), "abc");
        assert_eq!(
            StorageCookieJar::new(cookies).get("auth_token").unwrap().as_deref(),
            Some("abc")
        );
    }

    #[tokio::test]
    async fn test_login_rejected_leaves_store_untouched() {
        let (gateway, storage, _cookies) = gateway(FakeApi::new(rejected));

        let outcome = gateway.login("johndoe", "wrong-password").await;

        assert_eq!(outcome, AuthOutcome::failed("Invalid username or password"));
        assert!(!gateway.store().is_authenticated());
        assert_eq!(storage.get("auth_token").unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_message_uses_default() {
        let (gateway, _, _) = gateway(FakeApi::new(rejected_silently));
        assert_eq!(
            gateway.login("johndoe", "password123").await,
            AuthOutcome::failed(LOGIN_FAILED)
        );

        let (gateway, _, _) = self::gateway(FakeApi::new(rejected_silently));
        assert_eq!(
            gateway.register("johndoe", "password123").await,
            AuthOutcome::failed(REGISTER_FAILED)
        );
    }

    #[tokio::test]
    async fn test_status_line_and_transport_failures() {
        let (gateway, _, _) = gateway(FakeApi::new(bad_status));
        assert_eq!(
            gateway.login("johndoe", "password123").await,
            AuthOutcome::failed("Error: 502 Bad Gateway")
        );

        let (gateway, _, _) = self::gateway(FakeApi::new(unreachable_backend));
        assert_eq!(
            gateway.login("johndoe", "password123").await,
            AuthOutcome::failed(UNEXPECTED_ERROR)
        );
    }

    #[tokio::test]
    async fn test_success_without_data_is_failure() {
        fn no_data() -> AuthResult<ApiEnvelope<UserToken>> {
            Ok(ApiEnvelope {
                success: true,
                message: String::new(),
                data: None,
                errors: None,
            })
        }
        let (gateway, _, _) = gateway(FakeApi::new(no_data));
        assert_eq!(
            gateway.register("johndoe", "password123").await,
            AuthOutcome::failed(REGISTER_FAILED)
        );
    }

    #[tokio::test]
    async fn test_second_login_rejected_while_pending() {
        let gate = Arc::new(Notify::new());
        let api = FakeApi {
            gate: Some(gate.clone()),
            ..FakeApi::new(success)
        };
        let (gateway, _, _) = gateway(api);
        let gateway = Arc::new(gateway);

        let first = tokio::spawn({
            let gateway = gateway.clone();
            async move { gateway.login("johndoe", "password123").await }
        });
        while gateway.api.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let second = gateway.login("johndoe", "password123").await;
        assert_eq!(
            second,
            AuthOutcome::failed("A request is already in progress")
        );

        gate.notify_one();
        assert_eq!(first.await.unwrap(), AuthOutcome::ok());
        assert_eq!(gateway.api.calls.load(Ordering::SeqCst), 1);

        assert!(!gateway.login_flight.is_busy());
    }

    #[tokio::test]
    async fn test_second_register_rejected_while_pending() {
        let gate = Arc::new(Notify::new());
        let api = FakeApi {
            gate: Some(gate.clone()),
            ..FakeApi::new(success)
        };
        let (gateway, _, _) = gateway(api);
        let gateway = Arc::new(gateway);

        let first = tokio::spawn({
            let gateway = gateway.clone();
            async move { gateway.register("johndoe", "password123").await }
        });
        while gateway.api.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let second = gateway.register("johndoe", "password123").await;
        assert_eq!(second.error.as_deref(), Some(AuthError::Busy.user_message().as_str()));
        assert!(!gateway.login_flight.is_busy());

        gate.notify_one();
        assert_eq!(first.await.unwrap(), AuthOutcome::ok());
        assert!(!gateway.register_flight.is_busy());
    }

    #[tokio::test]
    async fn test_logout_navigates_to_login() {
        let (gateway, storage, _) = gateway(FakeApi::new(success));
        gateway.login("johndoe", "password123").await;

        let navigation = gateway.logout();

        assert_eq!(
            navigation,
            Navigation::FullPage {
                location: "/login".to_string()
            }
        );
        assert!(!gateway.store().is_authenticated());
        assert_eq!(storage.get("user_id").unwrap(), None);
    }
}

//! Per-run wiring
//!
//! Opens the file-backed session under the state directory and builds the
//! backend clients around it.

use std::path::Path;
use std::sync::Arc;

use auth::domain::Session;
use auth::{AuthConfig, AuthError, AuthGateway, FileStorage, HttpAuthApi, SessionStore, StorageCookieJar};
use catalog::{CatalogClient, CatalogError};
use kernel::validation::ValidationErrors;
use platform::client::{BackendClient, BackendConfig, ClientError};

pub const STORAGE_FILE: &str = "storage.json";
pub const COOKIE_FILE: &str = "cookies.json";

pub type Store = SessionStore<FileStorage, StorageCookieJar<FileStorage>>;
pub type Gateway = AuthGateway<HttpAuthApi, FileStorage, StorageCookieJar<FileStorage>>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("not signed in; run `extensions-cli login` first")]
    NotSignedIn,
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("{0}")]
    Failed(String),
    #[error("{}", .0.user_message())]
    Auth(#[from] AuthError),
    #[error("{}", .0.user_message())]
    Catalog(#[from] CatalogError),
    #[error("{0}")]
    Client(#[from] ClientError),
}

pub struct Context {
    backend: BackendClient,
    store: Arc<Store>,
}

impl Context {
    /// Open the stored session and restore it
    pub fn open(base_url: &str, state_dir: &Path) -> Result<Self, CliError> {
        let backend = BackendClient::new(&BackendConfig {
            base_url: base_url.to_string(),
            ..BackendConfig::default()
        })?;

        let store = SessionStore::new(
            FileStorage::new(state_dir.join(STORAGE_FILE)),
            StorageCookieJar::new(FileStorage::new(state_dir.join(COOKIE_FILE))),
            Arc::new(AuthConfig::from_env()),
        );
        let state = store.initialize();
        tracing::debug!(authenticated = state.is_authenticated(), "Session restored");

        Ok(Self {
            backend,
            store: Arc::new(store),
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn session(&self) -> Result<Session, CliError> {
        self.store.session().ok_or(CliError::NotSignedIn)
    }

    pub fn auth_api(&self) -> HttpAuthApi {
        HttpAuthApi::new(self.backend.clone())
    }

    pub fn gateway(&self) -> Gateway {
        AuthGateway::new(Arc::new(self.auth_api()), self.store.clone())
    }

    /// Catalog client carrying the session token when there is one
    pub fn catalog(&self) -> CatalogClient {
        let client = CatalogClient::new(self.backend.clone());
        match self.store.session() {
            Some(session) => client.with_bearer(session.token.as_str()),
            None => client,
        }
    }
}

//! Session Store
//!
//! Client-side session cache. Holds the signed-in identity in memory, in
//! durable storage (five string keys) and in the `auth_token` cookie the
//! route guard reads on the next navigation. The three copies change
//! together under one lock; a failed write rolls the others back.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{session::Session, user_token::UserToken};
use crate::domain::repository::{CookieJar, KeyValueStorage};
use crate::error::AuthResult;

// ============================================================================
// Storage keys
// ============================================================================

pub const KEY_AUTH_TOKEN: &str = "auth_token";
pub const KEY_USER_ID: &str = "user_id";
pub const KEY_USERNAME: &str = "username";
pub const KEY_USER_ROLE: &str = "user_role";
pub const KEY_EXPIRES_AT: &str = "expires_at";

pub const SESSION_KEYS: [&str; 5] = [
    KEY_AUTH_TOKEN,
    KEY_USER_ID,
    KEY_USERNAME,
    KEY_USER_ROLE,
    KEY_EXPIRES_AT,
];

/// What consumers should render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Storage not read yet; neither signed in nor out
    Initializing,
    Unauthenticated,
    Authenticated(Session),
}

impl AuthState {
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Initializing)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Navigation the caller must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Full page load, discarding all in-memory client state
    FullPage { location: String },
}

#[derive(Debug, Default)]
struct Inner {
    initialized: bool,
    session: Option<Session>,
}

/// Previous contents of every location `set_session` touches
struct Snapshot {
    storage: Vec<(&'static str, Option<String>)>,
    cookie: Option<String>,
}

/// Session store
pub struct SessionStore<S, C>
where
    S: KeyValueStorage,
    C: CookieJar,
{
    storage: S,
    cookies: C,
    config: Arc<AuthConfig>,
    inner: Mutex<Inner>,
}

impl<S, C> SessionStore<S, C>
where
    S: KeyValueStorage,
    C: CookieJar,
{
    pub fn new(storage: S, cookies: C, config: Arc<AuthConfig>) -> Self {
        Self {
            storage,
            cookies,
            config,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Restore the session from durable storage, once
    ///
    /// Later calls return the current state without touching storage. A
    /// storage failure leaves the store signed out but initialized.
    pub fn initialize(&self) -> AuthState {
        let mut inner = self.lock();
        if inner.initialized {
            return Self::state_of(&inner);
        }

        inner.session = match self.read_stored() {
            Ok(Some(session)) => self.restore(session),
            Ok(None) => None,
            Err(e) => {
                e.log();
                tracing::warn!("Could not read stored session, starting signed out");
                None
            }
        };
        inner.initialized = true;

        Self::state_of(&inner)
    }

    pub fn state(&self) -> AuthState {
        Self::state_of(&self.lock())
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_some()
    }

    pub fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    /// Username in memory, else the stored one
    pub fn username(&self) -> Option<String> {
        let inner = self.lock();
        if let Some(session) = inner.session.as_ref().filter(|s| !s.username.is_empty()) {
            return Some(session.username.clone());
        }
        drop(inner);

        match self.storage.get(KEY_USERNAME) {
            Ok(username) => username.filter(|u| !u.is_empty()),
            Err(e) => {
                e.log();
                None
            }
        }
    }

    /// Write the session to memory, storage and the cookie as one unit
    pub fn set_session(&self, session: Session) -> AuthResult<()> {
        let mut inner = self.lock();

        let snapshot = self.snapshot()?;
        if let Err(e) = self.write(&session) {
            self.rollback(snapshot);
            return Err(e);
        }

        tracing::info!(user_id = %session.user_id, role = %session.role, "Session stored");
        inner.session = Some(session);
        inner.initialized = true;
        Ok(())
    }

    /// Remove the session everywhere and send the user to the login page
    ///
    /// Every location is cleared even if one of them fails.
    pub fn clear_session(&self) -> Navigation {
        let mut inner = self.lock();

        for key in SESSION_KEYS {
            if let Err(e) = self.storage.remove(key) {
                e.log();
            }
        }
        if let Err(e) = self.cookies.apply(&self.config.cookie.build_delete_cookie()) {
            e.log();
        }

        if let Some(session) = inner.session.take() {
            tracing::info!(user_id = %session.user_id, "Session cleared");
        }
        inner.initialized = true;

        Navigation::FullPage {
            location: self.config.login_path.clone(),
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_of(inner: &Inner) -> AuthState {
        match (&inner.session, inner.initialized) {
            (Some(session), _) => AuthState::Authenticated(session.clone()),
            (None, true) => AuthState::Unauthenticated,
            (None, false) => AuthState::Initializing,
        }
    }

    /// `None` unless both token and user id are stored
    fn read_stored(&self) -> AuthResult<Option<Session>> {
        let token = self.storage.get(KEY_AUTH_TOKEN)?.unwrap_or_default();
        let user_id = self.storage.get(KEY_USER_ID)?.unwrap_or_default();
        if token.is_empty() || user_id.is_empty() {
            return Ok(None);
        }

        let data = UserToken {
            token,
            user_id,
            username: self.storage.get(KEY_USERNAME)?.unwrap_or_default(),
            role: self.storage.get(KEY_USER_ROLE)?.unwrap_or_default(),
            expires_at: self.storage.get(KEY_EXPIRES_AT)?.unwrap_or_default(),
        };

        match Session::from_user_token(data) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed stored session");
                Ok(None)
            }
        }
    }

    /// Keep a stored session unless it has expired; re-mirror the cookie
    fn restore(&self, session: Session) -> Option<Session> {
        if self.config.enforce_expiry && session.is_expired_at(Utc::now()) {
            tracing::info!(
                user_id = %session.user_id,
                expires_at = %session.expires_at,
                "Stored session expired"
            );
            for key in SESSION_KEYS {
                if let Err(e) = self.storage.remove(key) {
                    e.log();
                }
            }
            if let Err(e) = self.cookies.apply(&self.config.cookie.build_delete_cookie()) {
                e.log();
            }
            return None;
        }

        let cookie = self.config.cookie.build_set_cookie(session.token.as_str());
        if let Err(e) = self.cookies.apply(&cookie) {
            e.log();
        }
        tracing::debug!(user_id = %session.user_id, "Session restored");
        Some(session)
    }

    fn snapshot(&self) -> AuthResult<Snapshot> {
        let mut storage = Vec::with_capacity(SESSION_KEYS.len());
        for key in SESSION_KEYS {
            storage.push((key, self.storage.get(key)?));
        }
        let cookie = self.cookies.get(self.config.cookie_name())?;
        Ok(Snapshot { storage, cookie })
    }

    fn write(&self, session: &Session) -> AuthResult<()> {
        self.storage.set(KEY_AUTH_TOKEN, session.token.as_str())?;
        self.storage.set(KEY_USER_ID, &session.user_id)?;
        self.storage.set(KEY_USERNAME, &session.username)?;
        self.storage.set(KEY_USER_ROLE, session.role.code())?;
        self.storage.set(KEY_EXPIRES_AT, &session.expires_at)?;
        self.cookies
            .apply(&self.config.cookie.build_set_cookie(session.token.as_str()))
    }

    fn rollback(&self, snapshot: Snapshot) {
        tracing::warn!("Session write failed, restoring previous values");

        for (key, value) in snapshot.storage {
            let restored = match value {
                Some(value) => self.storage.set(key, &value),
                None => self.storage.remove(key),
            };
            if let Err(e) = restored {
                e.log();
            }
        }

        let cookie = match snapshot.cookie {
            Some(value) => self.config.cookie.build_set_cookie(&value),
            None => self.config.cookie.build_delete_cookie(),
        };
        if let Err(e) = self.cookies.apply(&cookie) {
            e.log();
        }
    }
}

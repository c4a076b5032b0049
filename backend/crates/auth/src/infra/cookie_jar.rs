//! Cookie jar over key/value storage
//!
//! Applies `Set-Cookie` lines the way a browser would and keeps each cookie
//! as a small JSON record under `cookie:<name>`. Expired cookies read as
//! absent.

use chrono::{DateTime, Utc};
use platform::cookie::SetCookie;
use serde::{Deserialize, Serialize};

use crate::domain::repository::{CookieJar, KeyValueStorage};
use crate::error::{AuthError, AuthResult};

const KEY_PREFIX: &str = "cookie:";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCookie {
    value: String,
    /// Unix ms; `None` for a session cookie
    expires_at_ms: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct StorageCookieJar<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> StorageCookieJar<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Cookie value as of `now`
    pub fn get_at(&self, name: &str, now: DateTime<Utc>) -> AuthResult<Option<String>> {
        let Some(raw) = self.storage.get(&key(name))? else {
            return Ok(None);
        };
        let stored: StoredCookie = serde_json::from_str(&raw)
            .map_err(|e| AuthError::Storage(format!("cookie {} is corrupt: {}", name, e)))?;

        let expired = stored
            .expires_at_ms
            .is_some_and(|at| at <= now.timestamp_millis());
        Ok((!expired).then_some(stored.value))
    }

    /// Apply a `Set-Cookie` line as of `now`
    pub fn apply_at(&self, set_cookie: &str, now: DateTime<Utc>) -> AuthResult<()> {
        let cookie = SetCookie::parse(set_cookie)
            .ok_or_else(|| AuthError::Internal(format!("malformed Set-Cookie: {}", set_cookie)))?;

        if cookie.is_removal(now) {
            return self.storage.remove(&key(&cookie.name));
        }

        let stored = StoredCookie {
            value: cookie.value.clone(),
            expires_at_ms: cookie.expires_at(now).map(|at| at.timestamp_millis()),
        };
        let raw = serde_json::to_string(&stored).map_err(|e| AuthError::Internal(e.to_string()))?;
        self.storage.set(&key(&cookie.name), &raw)
    }
}

impl<S: KeyValueStorage> CookieJar for StorageCookieJar<S> {
    fn get(&self, name: &str) -> AuthResult<Option<String>> {
        self.get_at(name, Utc::now())
    }

    fn apply(&self, set_cookie: &str) -> AuthResult<()> {
        self.apply_at(set_cookie, Utc::now())
    }
}

fn key(name: &str) -> String {
    format!("{}{}", KEY_PREFIX, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::infra::memory::MemoryStorage;
    use chrono::{Duration, TimeZone};

    fn jar() -> StorageCookieJar<MemoryStorage> {
        StorageCookieJar::new(MemoryStorage::new())
    }

    #[test]
    fn test_set_then_get() {
        let jar = jar();
        let config = AuthConfig::development();
        jar.apply(&config.cookie.build_set_cookie("abc")).unwrap();
        assert_eq!(jar.get("auth_token").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_expires_after_max_age() {
        let jar = jar();
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let config = AuthConfig::development();
        jar.apply_at(&config.cookie.build_set_cookie_at("abc", now), now)
            .unwrap();

        assert!(jar.get_at("auth_token", now + Duration::days(6)).unwrap().is_some());
        assert!(jar.get_at("auth_token", now + Duration::days(7)).unwrap().is_none());
    }

    #[test]
    fn test_delete_cookie_removes() {
        let jar = jar();
        let config = AuthConfig::development();
        jar.apply(&config.cookie.build_set_cookie("abc")).unwrap();
        jar.apply(&config.cookie.build_delete_cookie()).unwrap();
        assert_eq!(jar.get("auth_token").unwrap(), None);
    }

    #[test]
    fn test_session_cookie_never_expires() {
        let jar = jar();
        jar.apply("theme=dark; Path=/").unwrap();
        assert_eq!(jar.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_out_of_range_max_age_is_kept_without_expiry() {
        let jar = jar();
        jar.apply("auth_token=abc; Max-Age=9223372036854775807; Path=/")
            .unwrap();
        assert_eq!(jar.get("auth_token").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_malformed_line() {
        assert!(jar().apply("garbage").is_err());
    }
}

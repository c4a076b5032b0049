//! Session Entity
//!
//! The authenticated identity the portal keeps between page loads. Created
//! from a successful login/register reply, restored from durable storage on
//! start-up and destroyed on logout.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::domain::entity::user_token::UserToken;
use crate::domain::value_object::{auth_token::AuthToken, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Naive datetime layouts the backend has been seen to emit (read as UTC)
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Session entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: AuthToken,
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
    /// Raw backend value; see [`Session::expires_at_utc`]
    pub expires_at: String,
}

impl Session {
    /// Validate a backend token reply
    pub fn from_user_token(data: UserToken) -> AuthResult<Self> {
        let token = AuthToken::new(data.token)?;
        let user_id = data.user_id.trim();
        if user_id.is_empty() {
            return Err(AuthError::InvalidSession("user id is empty".to_string()));
        }

        Ok(Self {
            token,
            user_id: user_id.to_string(),
            username: data.username,
            role: UserRole::from_code(&data.role),
            expires_at: data.expires_at,
        })
    }

    /// Parsed expiry, if `expires_at` is RFC 3339, a naive datetime or a
    /// bare date (midnight UTC)
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_expiry(&self.expires_at)
    }

    /// Expired as of `now`; an unparsable expiry never counts as expired
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at_utc().is_some_and(|at| at <= now)
    }
}

/// Parse an `expiresAt` value
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user_token(expires_at: &str) -> UserToken {
        UserToken {
            token: "abc".to_string(),
            user_id: "42".to_string(),
            username: "johndoe".to_string(),
            role: "ADMIN".to_string(),
            expires_at: expires_at.to_string(),
        }
    }

    #[test]
    fn test_from_user_token() {
        let session = Session::from_user_token(user_token("")).unwrap();
        assert_eq!(session.token.as_str(), "abc");
        assert_eq!(session.user_id, "42");
        assert_eq!(session.role, UserRole::Admin);
    }

    #[test]
    fn test_from_user_token_requires_token_and_user_id() {
        let mut data = user_token("");
        data.token = String::new();
        assert!(Session::from_user_token(data).is_err());

        let mut data = user_token("");
        data.user_id = " ".to_string();
        assert!(matches!(
            Session::from_user_token(data),
            Err(AuthError::InvalidSession(_))
        ));
    }

    #[test]
    fn test_parse_expiry_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_expiry("2026-03-01T12:30:00Z"), Some(expected));
        assert_eq!(parse_expiry("2026-03-01T14:30:00+02:00"), Some(expected));
        assert_eq!(parse_expiry("2026-03-01T12:30:00"), Some(expected));
        assert_eq!(parse_expiry("2026-03-01T12:30:00.0000000"), Some(expected));
        assert_eq!(
            parse_expiry("2026-03-01"),
            Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_expiry(""), None);
        assert_eq!(parse_expiry("next tuesday"), None);
    }

    #[test]
    fn test_is_expired_at() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let past = Session::from_user_token(user_token("2026-02-28T23:59:59Z")).unwrap();
        let future = Session::from_user_token(user_token("2026-03-08")).unwrap();
        let unknown = Session::from_user_token(user_token("soon")).unwrap();

        assert!(past.is_expired_at(now));
        assert!(!future.is_expired_at(now));
        assert!(!unknown.is_expired_at(now));
    }
}

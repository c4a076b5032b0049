//! Cookie Management Infrastructure
//!
//! Building `Set-Cookie` lines, parsing them back (the way a browser's cookie
//! jar would), and reading the `Cookie` request header.

use axum::http::{HeaderMap, header};
use chrono::{DateTime, TimeDelta, Utc};

/// Format used for the `Expires` attribute (IMF-fixdate)
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// `Expires` value that deletes a cookie
pub const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }

    /// Case-insensitive parse of an attribute value
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(SameSite::Strict),
            "lax" => Some(SameSite::Lax),
            "none" => Some(SameSite::None),
            _ => None,
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<i64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }
}

impl CookieConfig {
    /// Build a `Set-Cookie` line, expiring `max_age_secs` after `now`
    pub fn build_set_cookie_at(&self, value: &str, now: DateTime<Utc>) -> String {
        let mut cookie = format!("{}={}", self.name, value);

        if let Some(max_age) = self.max_age_secs {
            if let Some(expires) = offset(now, max_age) {
                cookie.push_str(&format!("; Expires={}", expires.format(EXPIRES_FORMAT)));
            }
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }
        cookie.push_str(&format!("; Path={}", self.path));
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));

        cookie
    }

    /// Build a `Set-Cookie` line expiring relative to the current time
    pub fn build_set_cookie(&self, value: &str) -> String {
        self.build_set_cookie_at(value, Utc::now())
    }

    /// Build a `Set-Cookie` line that deletes the cookie
    pub fn build_delete_cookie(&self) -> String {
        let mut cookie = format!(
            "{}=; Expires={}; Max-Age=0; Path={}",
            self.name, EPOCH_EXPIRES, self.path
        );
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie
    }
}

// ============================================================================
// Set-Cookie parsing
// ============================================================================

/// A parsed `Set-Cookie` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub same_site: Option<SameSite>,
    pub http_only: bool,
    pub secure: bool,
    pub max_age_secs: Option<i64>,
    pub expires: Option<DateTime<Utc>>,
}

impl SetCookie {
    /// Parse a `Set-Cookie` line; `None` if there is no `name=value` pair
    ///
    /// Unknown attributes are ignored. An unparsable `Expires` is ignored
    /// rather than rejecting the whole line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split(';');
        let (name, value) = parts.next()?.trim().split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut cookie = SetCookie {
            name: name.to_string(),
            value: value.trim().to_string(),
            path: None,
            same_site: None,
            http_only: false,
            secure: false,
            max_age_secs: None,
            expires: None,
        };

        for attr in parts {
            let (key, val) = match attr.split_once('=') {
                Some((k, v)) => (k.trim(), Some(v.trim())),
                None => (attr.trim(), None),
            };
            match (key.to_ascii_lowercase().as_str(), val) {
                ("path", Some(v)) => cookie.path = Some(v.to_string()),
                ("samesite", Some(v)) => cookie.same_site = SameSite::parse(v),
                ("max-age", Some(v)) => cookie.max_age_secs = v.parse().ok(),
                ("expires", Some(v)) => {
                    cookie.expires = DateTime::parse_from_rfc2822(v)
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc));
                }
                ("httponly", _) => cookie.http_only = true,
                ("secure", _) => cookie.secure = true,
                _ => {}
            }
        }

        Some(cookie)
    }

    /// Absolute expiry; `Max-Age` wins over `Expires`, `None` means a
    /// session cookie
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.max_age_secs {
            Some(secs) => offset(now, secs),
            None => self.expires,
        }
    }

    /// Whether applying this line removes the cookie
    pub fn is_removal(&self, now: DateTime<Utc>) -> bool {
        if let Some(secs) = self.max_age_secs {
            return secs <= 0;
        }
        self.expires_at(now).is_some_and(|at| at <= now)
    }
}

/// `now + secs`; `None` when the result is out of range
fn offset(now: DateTime<Utc>, secs: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_seconds(secs).and_then(|delta| now.checked_add_signed(delta))
}

// ============================================================================
// Cookie request header
// ============================================================================

/// Iterate `name=value` pairs of a `Cookie` header value
pub fn parse_cookie_pairs(raw: &str) -> impl Iterator<Item = (&str, &str)> {
    raw.split(';').filter_map(|cookie| {
        let (key, value) = cookie.trim().split_once('=')?;
        Some((key.trim(), value.trim()))
    })
}

/// Extract a cookie value from request headers
///
/// Looks through every `Cookie` header, since HTTP/2 clients may split them.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|raw| {
            parse_cookie_pairs(raw)
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        })
}

/// Render a `Cookie` request header from pairs
pub fn cookie_header<'a, I>(pairs: I) -> Option<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let rendered: Vec<String> = pairs
        .into_iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();
    (!rendered.is_empty()).then(|| rendered.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::TimeZone;

    fn auth_cookie() -> CookieConfig {
        CookieConfig {
            name: "auth_token".to_string(),
            secure: false,
            http_only: false,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: Some(7 * 24 * 3600),
        }
    }

    #[test]
    fn test_cookie_config_build() {
        let config = CookieConfig {
            name: "test".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/api".to_string(),
            max_age_secs: Some(3600),
        };

        let cookie = config.build_set_cookie("value123");
        assert!(cookie.starts_with("test=value123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/api"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_readable_cookie_has_no_http_only() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let cookie = auth_cookie().build_set_cookie_at("abc", now);
        assert_eq!(
            cookie,
            "auth_token=abc; Expires=Thu, 08 Jan 2026 00:00:00 GMT; Max-Age=604800; Path=/; SameSite=Lax"
        );
    }

    #[test]
    fn test_delete_cookie() {
        let cookie = auth_cookie().build_delete_cookie();
        assert!(cookie.starts_with("auth_token=;"));
        assert!(cookie.contains(EPOCH_EXPIRES));
        assert!(cookie.contains("Max-Age=0"));
        assert!(!cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_set_cookie_parse_round_trip() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let line = auth_cookie().build_set_cookie_at("abc", now);
        let parsed = SetCookie::parse(&line).unwrap();

        assert_eq!(parsed.name, "auth_token");
        assert_eq!(parsed.value, "abc");
        assert_eq!(parsed.path.as_deref(), Some("/"));
        assert_eq!(parsed.same_site, Some(SameSite::Lax));
        assert!(!parsed.http_only);
        assert_eq!(parsed.max_age_secs, Some(604800));
        assert_eq!(
            parsed.expires,
            Some(Utc.with_ymd_and_hms(2026, 1, 8, 0, 0, 0).unwrap())
        );
        assert!(!parsed.is_removal(now));
    }

    #[test]
    fn test_set_cookie_delete_is_removal() {
        let parsed = SetCookie::parse(&auth_cookie().build_delete_cookie()).unwrap();
        assert_eq!(parsed.value, "");
        assert!(parsed.is_removal(Utc::now()));
    }

    #[test]
    fn test_set_cookie_expires_only() {
        let parsed = SetCookie::parse(&format!("a=b; expires={}", EPOCH_EXPIRES)).unwrap();
        assert!(parsed.is_removal(Utc::now()));

        let session = SetCookie::parse("a=b; path=/").unwrap();
        assert_eq!(session.expires_at(Utc::now()), None);
        assert!(!session.is_removal(Utc::now()));
    }

    #[test]
    fn test_set_cookie_out_of_range_max_age() {
        let now = Utc::now();

        let forever = SetCookie::parse("auth_token=abc; Max-Age=9223372036854775807").unwrap();
        assert_eq!(forever.expires_at(now), None);
        assert!(!forever.is_removal(now));

        let gone = SetCookie::parse("auth_token=abc; Max-Age=-9223372036854775808").unwrap();
        assert_eq!(gone.expires_at(now), None);
        assert!(gone.is_removal(now));

        let config = CookieConfig {
            max_age_secs: Some(i64::MAX),
            ..auth_cookie()
        };
        let line = config.build_set_cookie_at("abc", now);
        assert!(!line.contains("Expires="));
        assert!(line.contains("Max-Age=9223372036854775807"));
    }

    #[test]
    fn test_set_cookie_rejects_garbage() {
        assert!(SetCookie::parse("").is_none());
        assert!(SetCookie::parse("novalue").is_none());
        assert!(SetCookie::parse("=value").is_none());
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; auth_token=abc123; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "auth_token"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_across_split_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("foo=bar"));
        headers.append(header::COOKIE, HeaderValue::from_static("auth_token=abc"));

        assert_eq!(extract_cookie(&headers, "auth_token"), Some("abc".to_string()));
    }

    #[test]
    fn test_cookie_header() {
        assert_eq!(
            cookie_header([("a", "1"), ("b", "2")]),
            Some("a=1; b=2".to_string())
        );
        assert_eq!(cookie_header(std::iter::empty()), None);
    }
}

//! Application Configuration
//!
//! Configuration for the Auth application layer: the token cookie, the
//! well-known page paths and which paths the route guard ignores.

use platform::config::{env_var, parse_bool};

/// Re-export cookie types from platform
pub use platform::cookie::{CookieConfig, SameSite};

/// Name of the cookie the route guard reads
pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Cookie lifetime (7 days)
pub const AUTH_COOKIE_MAX_AGE_SECS: i64 = 7 * 24 * 3600;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token cookie; readable by page scripts, so never `HttpOnly`
    pub cookie: CookieConfig,
    pub home_path: String,
    pub login_path: String,
    pub register_path: String,
    /// Where signed-in users are sent from login/register
    pub dashboard_path: String,
    /// Prefix of the auth proxy endpoints, always public
    pub auth_api_prefix: String,
    /// Path prefixes the guard never runs for (static assets)
    pub excluded_prefixes: Vec<String>,
    /// Exact paths the guard never runs for
    pub excluded_paths: Vec<String>,
    /// Drop a restored session whose `expiresAt` has passed
    pub enforce_expiry: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie: CookieConfig {
                name: AUTH_COOKIE_NAME.to_string(),
                secure: true,
                http_only: false,
                same_site: SameSite::Lax,
                path: "/".to_string(),
                max_age_secs: Some(AUTH_COOKIE_MAX_AGE_SECS),
            },
            home_path: "/".to_string(),
            login_path: "/login".to_string(),
            register_path: "/register".to_string(),
            dashboard_path: "/dashboard".to_string(),
            auth_api_prefix: "/api/auth".to_string(),
            excluded_prefixes: vec![
                "/_next/static".to_string(),
                "/_next/image".to_string(),
                "/static".to_string(),
                "/public".to_string(),
            ],
            excluded_paths: vec!["/favicon.ico".to_string()],
            enforce_expiry: true,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        let mut config = Self::default();
        config.cookie.secure = false;
        config
    }

    /// Development defaults overridden by `AUTH_COOKIE_SECURE` and
    /// `AUTH_ENFORCE_EXPIRY`
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    /// [`from_env`](Self::from_env) reading variables through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| lookup(key).as_deref().and_then(parse_bool);

        let mut config = Self::development();
        if let Some(secure) = flag("AUTH_COOKIE_SECURE") {
            config.cookie.secure = secure;
        }
        if let Some(enforce) = flag("AUTH_ENFORCE_EXPIRY") {
            config.enforce_expiry = enforce;
        }
        config
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie.name
    }

    /// Path of the login page with a form-encoded `redirectTo`
    pub fn login_redirect(&self, redirect_to: &str) -> String {
        let query = reqwest::Url::parse_with_params("http://localhost/", [("redirectTo", redirect_to)])
            .ok()
            .and_then(|url| url.query().map(str::to_string));
        match query {
            Some(query) => format!("{}?{}", self.login_path, query),
            None => self.login_path.clone(),
        }
    }
}

//! Route Guard Middleware
//!
//! Decides per navigation from two inputs only: the requested path and
//! whether an `auth_token` cookie is present. The token is never validated
//! here; the backend rejects bad tokens on the calls that use them.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;

/// How the guard treats a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Static assets; the guard does not run
    Excluded,
    /// Login and register pages
    AuthPage,
    /// Home page and the auth proxy endpoints
    Public,
    Protected,
}

/// What to do with a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    /// 307 to this location
    Redirect(String),
}

pub fn classify(config: &AuthConfig, path: &str) -> RouteClass {
    if config.excluded_paths.iter().any(|p| p == path)
        || config
            .excluded_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    {
        return RouteClass::Excluded;
    }

    // Directory-style pages are served as `/login/` after the static redirect
    let path = path.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(path);
    if path == config.login_path || path == config.register_path {
        return RouteClass::AuthPage;
    }
    if path == config.home_path || path.starts_with(config.auth_api_prefix.as_str()) {
        return RouteClass::Public;
    }
    RouteClass::Protected
}

/// An empty token counts as no token
pub fn decide(config: &AuthConfig, path: &str, token: Option<&str>) -> GuardDecision {
    let has_token = token.is_some_and(|t| !t.is_empty());

    match classify(config, path) {
        RouteClass::Protected if !has_token => GuardDecision::Redirect(config.login_redirect(path)),
        RouteClass::AuthPage if has_token => {
            GuardDecision::Redirect(config.dashboard_path.clone())
        }
        _ => GuardDecision::Pass,
    }
}

/// Middleware applying [`decide`] to every request
///
/// Attach with `axum::middleware::from_fn_with_state(config, route_guard)`.
pub async fn route_guard(
    State(config): State<Arc<AuthConfig>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let path = req.uri().path();
    let token = platform::cookie::extract_cookie(req.headers(), config.cookie_name());

    match decide(&config, path, token.as_deref()) {
        GuardDecision::Pass => Ok(next.run(req).await),
        GuardDecision::Redirect(location) => {
            tracing::debug!(path = %path, location = %location, "Route guard redirect");
            Err(Redirect::temporary(&location).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let config = AuthConfig::default();
        assert_eq!(classify(&config, "/"), RouteClass::Public);
        assert_eq!(classify(&config, "/api/auth/login"), RouteClass::Public);
        assert_eq!(classify(&config, "/api/auth/me"), RouteClass::Public);
        assert_eq!(classify(&config, "/login"), RouteClass::AuthPage);
        assert_eq!(classify(&config, "/register"), RouteClass::AuthPage);
        assert_eq!(classify(&config, "/dashboard"), RouteClass::Protected);
        assert_eq!(classify(&config, "/extensions/42"), RouteClass::Protected);
        assert_eq!(classify(&config, "/api/extensions"), RouteClass::Protected);
        assert_eq!(classify(&config, "/_next/static/app.js"), RouteClass::Excluded);
        assert_eq!(classify(&config, "/_next/image"), RouteClass::Excluded);
        assert_eq!(classify(&config, "/favicon.ico"), RouteClass::Excluded);
        assert_eq!(classify(&config, "/public/logo.svg"), RouteClass::Excluded);
    }

    #[test]
    fn test_classify_ignores_one_trailing_slash() {
        let config = AuthConfig::default();
        assert_eq!(classify(&config, "/login/"), RouteClass::AuthPage);
        assert_eq!(classify(&config, "/register/"), RouteClass::AuthPage);
        assert_eq!(classify(&config, "/dashboard/"), RouteClass::Protected);
        assert_eq!(classify(&config, "/"), RouteClass::Public);
        assert_eq!(decide(&config, "/login/", None), GuardDecision::Pass);
        assert_eq!(
            decide(&config, "/login/", Some("abc")),
            GuardDecision::Redirect("/dashboard".to_string())
        );
    }

    #[test]
    fn test_protected_without_token_redirects_to_login() {
        let config = AuthConfig::default();
        assert_eq!(
            decide(&config, "/dashboard", None),
            GuardDecision::Redirect("/login?redirectTo=%2Fdashboard".to_string())
        );
        assert_eq!(
            decide(&config, "/dashboard", Some("")),
            GuardDecision::Redirect("/login?redirectTo=%2Fdashboard".to_string())
        );
        assert_eq!(decide(&config, "/dashboard", Some("abc")), GuardDecision::Pass);
    }

    #[test]
    fn test_auth_pages_with_token_redirect_to_dashboard() {
        let config = AuthConfig::default();
        assert_eq!(
            decide(&config, "/login", Some("abc")),
            GuardDecision::Redirect("/dashboard".to_string())
        );
        assert_eq!(
            decide(&config, "/register", Some("abc")),
            GuardDecision::Redirect("/dashboard".to_string())
        );
        assert_eq!(decide(&config, "/login", None), GuardDecision::Pass);
    }

    #[test]
    fn test_public_and_excluded_always_pass() {
        let config = AuthConfig::default();
        for path in ["/", "/api/auth/login", "/favicon.ico", "/_next/static/x.js"] {
            assert_eq!(decide(&config, path, None), GuardDecision::Pass);
            assert_eq!(decide(&config, path, Some("abc")), GuardDecision::Pass);
        }
    }

    #[test]
    fn test_token_never_validated() {
        let config = AuthConfig::default();
        assert_eq!(
            decide(&config, "/dashboard", Some("obviously-forged")),
            GuardDecision::Pass
        );
    }
}

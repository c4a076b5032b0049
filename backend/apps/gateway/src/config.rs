//! Gateway configuration
//!
//! Read once at startup, after `dotenvy` has loaded `.env`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use auth::AuthConfig;
use platform::client::BackendConfig;
use platform::config::{env_list, env_or, env_parse};

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_STATIC_DIR: &str = "./public";
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub addr: SocketAddr,
    pub backend: BackendConfig,
    /// Pre-built front-end pages and assets
    pub static_dir: PathBuf,
    /// CORS allow-list
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            backend: BackendConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
                timeout: Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
            },
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            frontend_origins: DEFAULT_FRONTEND_ORIGINS
                .split(',')
                .map(str::to_string)
                .collect(),
            auth: AuthConfig::development(),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let addr = env_or("GATEWAY_ADDR", DEFAULT_ADDR)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid GATEWAY_ADDR: {}", e))?;

        Ok(Self {
            addr,
            backend: BackendConfig {
                base_url: env_or("API_BASE_URL", DEFAULT_API_BASE_URL),
                timeout: Duration::from_secs(env_parse(
                    "BACKEND_TIMEOUT_SECS",
                    DEFAULT_BACKEND_TIMEOUT_SECS,
                )),
            },
            static_dir: PathBuf::from(env_or("STATIC_DIR", DEFAULT_STATIC_DIR)),
            frontend_origins: env_list("FRONTEND_ORIGINS", DEFAULT_FRONTEND_ORIGINS),
            auth: AuthConfig::from_env(),
        })
    }
}

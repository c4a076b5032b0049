//! Gateway Server Entry Point
//!
//! Serves the extensions portal front-end, guards its pages and proxies
//! `/api/*` to the extensions backend. Uses `anyhow` for startup errors;
//! request-level errors are `kernel::error::AppError`.

mod app;
mod config;

use platform::client::BackendClient;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::GatewayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gateway=info,auth=info,catalog=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env()?;
    let backend = BackendClient::new(&config.backend)?;

    tracing::info!(
        backend = %backend.base_url(),
        static_dir = %config.static_dir.display(),
        secure_cookie = config.auth.cookie.secure,
        "Gateway configured"
    );

    let app = app::build_app(&config, backend);

    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!("Listening on {}", config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}

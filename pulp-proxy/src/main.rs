//! Pulp Proxy
//!
//! Exposes the remote Pulp service's repositories as a local `pulp_repo`
//! collection. Every request is translated into calls against the remote API;
//! nothing is stored locally.

use anyhow::{Context, Result};
use pulp_client::{PulpClient, PulpConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod service;

use crate::api::AppState;
use crate::config::ProxyConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulp_proxy=debug,pulp_client=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pulp Proxy...");

    let config = ProxyConfig::from_env();
    config.validate()?;

    let pulp_config = PulpConfig::from_env();
    tracing::info!(
        "Using Pulp at {} (TLS verification {})",
        pulp_config.base_url,
        if pulp_config.verify_tls { "on" } else { "off" }
    );

    let client = PulpClient::new(pulp_config).context("Failed to create Pulp client")?;

    // Build router with all API endpoints
    let app = api::create_router(AppState::new(client, &config));

    tracing::info!(
        "Listening on {} (collection at {}/)",
        config.bind_addr,
        config.url_prefix
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}

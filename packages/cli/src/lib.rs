// ABOUTME: Server bootstrap for the Persona proxy
// ABOUTME: Wires config, logging, CORS and the proxy routes into one axum server

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use persona_api::{ProxyState, UpstreamClient};

pub mod api;
pub mod config;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError};

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_env(persona_config::RUST_LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second call in the same process is a no-op
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Browser access is limited to the configured origin
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

/// The full application: health, proxy routes and CORS
pub fn build_app(config: &Config) -> anyhow::Result<Router> {
    let upstream = UpstreamClient::new(config.backend_url.as_str())?;
    let app = api::create_router(ProxyState::new(upstream)).layer(cors_layer(&config.cors_origin)?);
    Ok(app)
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let app = build_app(&config)?;
    let addr = config.bind_address();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Persona server listening on http://{}", addr);
    info!("Forwarding resource requests to {}", config.backend_url);
    info!("CORS origin: {}", config.cors_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Persona server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

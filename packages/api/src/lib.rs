// ABOUTME: HTTP proxy layer for Persona providing the browser-facing REST endpoints
// ABOUTME: Forwards agent, campaign and ML engine requests to the backend service

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub mod proxy_handlers;
pub mod response;
pub mod upstream;

pub use response::ProxyError;
pub use upstream::{UpstreamBody, UpstreamClient, UpstreamError};

/// Shared state for the proxy handlers
#[derive(Clone, Debug)]
pub struct ProxyState {
    pub upstream: UpstreamClient,
}

impl ProxyState {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}

/// Creates the agents API router
pub fn create_agents_router() -> Router<ProxyState> {
    Router::new().route(
        "/",
        get(proxy_handlers::list_agents).post(proxy_handlers::create_agent),
    )
}

/// Creates the campaigns API router
pub fn create_campaigns_router() -> Router<ProxyState> {
    Router::new().route(
        "/",
        get(proxy_handlers::list_campaigns).post(proxy_handlers::create_campaign),
    )
}

/// Creates the ML engines API router
pub fn create_ml_engines_router() -> Router<ProxyState> {
    Router::new().route(
        "/",
        get(proxy_handlers::list_ml_engines).post(proxy_handlers::create_ml_engine),
    )
}

/// All proxy routes mounted under their backend paths, with request tracing
pub fn create_proxy_router(state: ProxyState) -> Router {
    Router::new()
        .nest("/api/agents", create_agents_router())
        .nest("/api/campaigns", create_campaigns_router())
        .nest("/api/ml-engines", create_ml_engines_router())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

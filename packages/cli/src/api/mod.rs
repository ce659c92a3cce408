use axum::{routing::get, Router};

use persona_api::{create_proxy_router, ProxyState};

pub mod health;

/// Health check plus the proxied resource routes
pub fn create_router(state: ProxyState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .merge(create_proxy_router(state))
}

// ABOUTME: HTTP request handlers for the agent, campaign and ML engine proxies
// ABOUTME: Lists and creates records on the backend, normalizing names on create

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{error, info};

use super::response::{relay, ProxyError};
use super::ProxyState;
use persona_core::{normalize_name_field, ResourceKind};

/// List all agents
pub async fn list_agents(State(state): State<ProxyState>) -> Response {
    list_resource(&state, ResourceKind::Agents).await
}

/// Create an agent
pub async fn create_agent(State(state): State<ProxyState>, body: Bytes) -> Response {
    create_resource(&state, ResourceKind::Agents, &body).await
}

/// List all campaigns
pub async fn list_campaigns(State(state): State<ProxyState>) -> Response {
    list_resource(&state, ResourceKind::Campaigns).await
}

/// Create a campaign
pub async fn create_campaign(State(state): State<ProxyState>, body: Bytes) -> Response {
    create_resource(&state, ResourceKind::Campaigns, &body).await
}

/// List all ML engines
pub async fn list_ml_engines(State(state): State<ProxyState>) -> Response {
    list_resource(&state, ResourceKind::MlEngines).await
}

/// Create an ML engine
pub async fn create_ml_engine(State(state): State<ProxyState>, body: Bytes) -> Response {
    create_resource(&state, ResourceKind::MlEngines, &body).await
}

async fn list_resource(state: &ProxyState, kind: ResourceKind) -> Response {
    info!("Fetching {} from backend", kind.plural());

    match state.upstream.list(kind).await {
        Ok(body) => {
            match body.record_count() {
                Some(count) => info!("Retrieved {} {}", count, kind.plural()),
                None => info!("Retrieved {} payload", kind.plural()),
            }
            relay(body)
        }
        Err(e) => {
            error!("Error fetching {}: {}", kind.plural(), e);
            ProxyError::new(kind.list_failure()).into_response()
        }
    }
}

async fn create_resource(state: &ProxyState, kind: ResourceKind, body: &[u8]) -> Response {
    let mut payload: Value = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => {
            error!("Error creating {}: invalid JSON body: {}", kind.singular(), e);
            return ProxyError::new(e.to_string()).into_response();
        }
    };

    let raw_name = payload
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
        .to_string();
    info!("Creating {}: {}", kind.singular(), raw_name);

    // The backend rejects names with uppercase letters or spaces
    if let Err(e) = normalize_name_field(&mut payload) {
        error!("Error creating {}: {}", kind.singular(), e);
        return ProxyError::new(e.to_string()).into_response();
    }

    match state.upstream.create(kind, &payload).await {
        Ok(created) => {
            info!(
                "{} created successfully: {}",
                capitalize(kind.singular()),
                created.id().unwrap_or("<no id>")
            );
            relay(created)
        }
        Err(e) => {
            error!("Error creating {}: {}", kind.singular(), e);
            let message = e.to_string();
            if message.is_empty() {
                ProxyError::new(kind.create_failure()).into_response()
            } else {
                ProxyError::new(message).into_response()
            }
        }
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("agent"), "Agent");
        assert_eq!(capitalize("ML engine"), "ML engine");
        assert_eq!(capitalize(""), "");
    }
}

// ABOUTME: HTTP client for the backend that owns agents, campaigns and ML engines
// ABOUTME: One shared reqwest client, no caching, no retries and no timeout

use axum::body::Bytes;
use reqwest::{header, Client};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use persona_core::ResourceKind;

/// Failures talking to the backend
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Client configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Upstream JSON body, kept byte-for-byte alongside its parsed form
#[derive(Debug, Clone)]
pub struct UpstreamBody {
    pub raw: Bytes,
    pub json: Value,
}

impl UpstreamBody {
    /// Number of records when the body is an array
    pub fn record_count(&self) -> Option<usize> {
        self.json.as_array().map(Vec::len)
    }

    /// Server-assigned id when the body is a record
    pub fn id(&self) -> Option<&str> {
        self.json.get("id").and_then(Value::as_str)
    }
}

/// Client for the backend REST resources
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    http_client: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, UpstreamError> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| UpstreamError::Configuration(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, kind: ResourceKind) -> String {
        format!("{}{}", self.base_url, kind.path())
    }

    /// Fetch a collection, bypassing any cache
    pub async fn list(&self, kind: ResourceKind) -> Result<UpstreamBody, UpstreamError> {
        let url = self.url(kind);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        read_body(response).await
    }

    /// Create a record from an already-normalized JSON body
    pub async fn create(
        &self,
        kind: ResourceKind,
        body: &Value,
    ) -> Result<UpstreamBody, UpstreamError> {
        let url = self.url(kind);
        debug!("POST {}", url);

        let response = self.http_client.post(&url).json(body).send().await?;

        read_body(response).await
    }
}

async fn read_body(response: reqwest::Response) -> Result<UpstreamBody, UpstreamError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("Error response: {} - {}", status.as_u16(), body);
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let raw = response.bytes().await?;
    let json = serde_json::from_slice(&raw)
        .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;

    Ok(UpstreamBody { raw, json })
}

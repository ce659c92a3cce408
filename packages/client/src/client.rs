use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::resource::Resource;
use persona_core::{
    normalize_name_field, Agent, AgentDraft, Campaign, CampaignDraft, MlEngine, MlEngineDraft,
    ResourceKind, Validate,
};

/// Direct (non-proxied) client for the Persona backend
#[derive(Clone, Debug)]
pub struct PersonaClient {
    http_client: Client,
    base_url: String,
}

impl PersonaClient {
    /// Create a client for the given backend base URL. No request timeout is applied.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Client for the backend named by `PERSONA_API_URL`, or localhost
    pub fn from_env() -> ClientResult<Self> {
        Self::new(persona_config::api_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List every record of a resource type
    pub async fn list<R: Resource>(&self) -> ClientResult<Vec<R>> {
        let url = format!("{}{}", self.base_url, R::KIND.path());
        debug!("GET {}", url);

        let response = self.http_client.get(&url).send().await?;
        let records: Vec<R> = decode(response, &R::KIND.list_failure()).await?;

        info!("Retrieved {} {}", records.len(), R::KIND.plural());
        Ok(records)
    }

    /// Validate a draft and, only if it passes, submit it once
    pub async fn create<R: Resource>(&self, draft: &R::Draft) -> ClientResult<R> {
        let request = draft.validate()?;

        let mut body = serde_json::to_value(&request)?;
        let name = normalize_name_field(&mut body)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        info!("Creating {}: {}", R::KIND.singular(), name);

        let url = format!("{}{}", self.base_url, R::KIND.path());
        let response = self.http_client.post(&url).json(&body).send().await?;

        decode(response, &R::KIND.create_failure()).await
    }

    pub async fn list_agents(&self) -> ClientResult<Vec<Agent>> {
        self.list::<Agent>().await
    }

    /// Fetch one agent for the detail view. The id is sent as a single path segment.
    pub async fn get_agent(&self, id: &str) -> ClientResult<Agent> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, ResourceKind::Agents.path()))
            .map_err(|e| ClientError::Configuration(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Configuration(format!("Cannot add a path to {}", self.base_url))
            })?
            .push(id);
        debug!("GET {}", url);

        let response = self.http_client.get(url).send().await?;
        decode(response, "Failed to fetch agent").await
    }

    pub async fn create_agent(&self, draft: &AgentDraft) -> ClientResult<Agent> {
        self.create::<Agent>(draft).await
    }

    pub async fn list_campaigns(&self) -> ClientResult<Vec<Campaign>> {
        self.list::<Campaign>().await
    }

    pub async fn create_campaign(&self, draft: &CampaignDraft) -> ClientResult<Campaign> {
        self.create::<Campaign>(draft).await
    }

    pub async fn list_ml_engines(&self) -> ClientResult<Vec<MlEngine>> {
        self.list::<MlEngine>().await
    }

    pub async fn create_ml_engine(&self, draft: &MlEngineDraft) -> ClientResult<MlEngine> {
        self.create::<MlEngine>(draft).await
    }
}

/// Decode a success body, or turn an error body into a readable message
async fn decode<T: DeserializeOwned>(response: Response, fallback: &str) -> ClientResult<T> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        warn!("Backend returned {}: {}", status.as_u16(), text);
        return Err(ClientError::api(error_message(&text, fallback)));
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// The backend's `detail` (or proxy `error`) string when present, else the fallback
fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["detail", "error"].iter().find_map(|key| {
                value
                    .get(*key)
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

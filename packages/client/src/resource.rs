// ABOUTME: Binds each record type to its backend collection and its draft form
// ABOUTME: Lets the client and list views work generically over agents, campaigns and engines

use serde::de::DeserializeOwned;
use serde::Serialize;

use persona_core::{
    Agent, AgentDraft, Campaign, CampaignDraft, MlEngine, MlEngineDraft, ResourceKind, Validate,
};

/// A record type the backend lists and creates
pub trait Resource: DeserializeOwned {
    const KIND: ResourceKind;

    /// Form state that validates into the creation request
    type Draft: Validate<Output = Self::Create>;

    type Create: Serialize;

    /// Name shown in list views and log lines
    fn display_name(&self) -> &str;
}

impl Resource for Agent {
    const KIND: ResourceKind = ResourceKind::Agents;
    type Draft = AgentDraft;
    type Create = persona_core::NewAgent;

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Resource for Campaign {
    const KIND: ResourceKind = ResourceKind::Campaigns;
    type Draft = CampaignDraft;
    type Create = persona_core::NewCampaign;

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Resource for MlEngine {
    const KIND: ResourceKind = ResourceKind::MlEngines;
    type Draft = MlEngineDraft;
    type Create = persona_core::NewMlEngine;

    fn display_name(&self) -> &str {
        &self.name
    }
}

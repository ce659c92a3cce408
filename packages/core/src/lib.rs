// ABOUTME: Core types, validation and utilities for Persona
// ABOUTME: Foundational package shared by the proxy server, the client and the CLI

pub mod model;
pub mod naming;
pub mod resource;
pub mod tags;
pub mod validation;

// Re-export main types
pub use model::{
    Agent, Campaign, CommunicationPreference, EducationLevel, EnumLabel, Gender, IncomeBand,
    IncomeLevel, Lenient, MarketingChannel, MessageType, MlEngine, NewAgent, NewCampaign,
    NewMlEngine, Provider, PurchaseFrequency, TargetAudience, UnknownVariant,
};

pub use naming::{normalize_name, normalize_name_field, NamingError};
pub use resource::ResourceKind;
pub use tags::{TagInput, TagKey, TagList};

// Re-export validation
pub use validation::{
    AgentDraft, CampaignDraft, FieldViolation, MlEngineDraft, Validate, ValidationErrors,
};

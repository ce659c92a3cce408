// ABOUTME: Declarative validation of agent, campaign and ML engine drafts
// ABOUTME: Turns loosely-typed form state into typed create requests or field violations

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::{
    CommunicationPreference, EducationLevel, Gender, IncomeBand, IncomeLevel, MarketingChannel,
    MessageType, NewAgent, NewCampaign, NewMlEngine, Provider, PurchaseFrequency, TargetAudience,
    UnknownVariant, MAX_INCOME_USD,
};
use crate::tags::TagList;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found in one draft, in field order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", join_violations(.violations))]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// First message reported for a field, for inline display next to it
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.violations
            .iter()
            .find(|v| v.field == field)
            .map(|v| v.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Synchronous, side-effect free check of a draft
pub trait Validate {
    type Output;

    fn validate(&self) -> Result<Self::Output, ValidationErrors>;
}

/// Collects violations while checking fields one by one
#[derive(Default)]
struct Checker {
    violations: Vec<FieldViolation>,
}

impl Checker {
    fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Text as typed, with an inclusive character-count range. Whitespace-only never passes.
    fn text(
        &mut self,
        field: &str,
        value: &str,
        min: usize,
        max: Option<usize>,
        too_short: &str,
    ) -> Option<String> {
        let length = value.chars().count();

        if length < min || value.trim().is_empty() {
            self.reject(field, too_short);
            return None;
        }
        if let Some(max) = max {
            if length > max {
                self.reject(field, format!("Must be at most {} characters.", max));
                return None;
            }
        }
        Some(value.to_string())
    }

    /// Optional free text; blank becomes absent
    fn optional_text(&mut self, value: Option<&str>) -> Option<String> {
        value
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Required integer within an inclusive range
    fn range(&mut self, field: &str, value: Option<i64>, min: i64, max: i64) -> Option<i64> {
        match value {
            None => {
                self.reject(field, "Required.");
                None
            }
            Some(v) if v < min => {
                self.reject(field, format!("Must be at least {}.", min));
                None
            }
            Some(v) if v > max => {
                self.reject(field, format!("Must be at most {}.", max));
                None
            }
            Some(v) => Some(v),
        }
    }

    /// Required member of a closed enumeration
    fn choice<T>(&mut self, field: &str, value: Option<&str>, missing: &str) -> Option<T>
    where
        T: FromStr<Err = UnknownVariant>,
    {
        let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
            self.reject(field, missing);
            return None;
        };
        match raw.parse::<T>() {
            Ok(v) => Some(v),
            Err(e) => {
                self.reject(field, e.to_string());
                None
            }
        }
    }

    /// Tag list with a minimum number of entries
    fn tags(&mut self, field: &str, value: &TagList, min_items: usize, message: &str) -> Option<Vec<String>> {
        if value.len() < min_items {
            self.reject(field, message);
            return None;
        }
        Some(value.as_slice().to_vec())
    }

    /// Non-empty set of enumerated values without repeats
    fn choice_set<T>(&mut self, field: &str, values: &[String], message: &str) -> Option<Vec<T>>
    where
        T: FromStr<Err = UnknownVariant> + PartialEq,
    {
        if values.is_empty() {
            self.reject(field, message);
            return None;
        }

        let mut parsed: Vec<T> = Vec::with_capacity(values.len());
        for raw in values {
            match raw.trim().parse::<T>() {
                Ok(v) if parsed.contains(&v) => {
                    self.reject(field, format!("'{}' is listed more than once.", raw.trim()));
                    return None;
                }
                Ok(v) => parsed.push(v),
                Err(e) => {
                    self.reject(field, e.to_string());
                    return None;
                }
            }
        }
        Some(parsed)
    }

    fn finish(self) -> ValidationErrors {
        ValidationErrors {
            violations: self.violations,
        }
    }
}

/// In-progress agent form. Every field may hold anything a user can type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentDraft {
    pub name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub location: String,
    pub occupation: Option<String>,
    /// USD amount or a legacy band such as `MEDIUM`, typed or as a JSON number
    #[serde(deserialize_with = "number_or_text")]
    pub income_level: Option<String>,
    pub education_level: Option<String>,
    pub interests: TagList,
    pub purchase_behaviors: TagList,
    pub purchase_frequency: Option<String>,
    pub communication_preferences: Vec<String>,
    pub social_media_usage: Option<TagList>,
    pub brand_loyalty: Option<i64>,
    pub price_sensitivity: Option<i64>,
    pub tech_savviness: Option<i64>,
    pub ml_engine_id: Option<String>,
}

/// Saved drafts and serialized requests carry income as a number, form input as text
fn number_or_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Number(amount) => amount.to_string(),
        Raw::Text(text) => text,
    }))
}

impl Default for AgentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: Some(30),
            gender: Some(Gender::PreferNotToSay.to_string()),
            location: String::new(),
            occupation: None,
            income_level: Some("50000".to_string()),
            education_level: Some(EducationLevel::Bachelors.to_string()),
            interests: TagList::new(),
            purchase_behaviors: TagList::new(),
            purchase_frequency: Some(PurchaseFrequency::Monthly.to_string()),
            communication_preferences: Vec::new(),
            social_media_usage: None,
            brand_loyalty: Some(5),
            price_sensitivity: Some(5),
            tech_savviness: Some(5),
            ml_engine_id: None,
        }
    }
}

fn check_income(checker: &mut Checker, value: Option<&str>) -> Option<IncomeLevel> {
    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        checker.reject("income_level", "Required.");
        return None;
    };

    if let Ok(amount) = raw.parse::<i64>() {
        return checker
            .range("income_level", Some(amount), 0, MAX_INCOME_USD)
            .map(IncomeLevel::Amount);
    }

    match raw.parse::<IncomeBand>() {
        Ok(band) => Some(IncomeLevel::Band(band)),
        Err(_) => {
            checker.reject(
                "income_level",
                format!(
                    "Must be a USD amount between 0 and {} or one of: LOW, MEDIUM, HIGH",
                    MAX_INCOME_USD
                ),
            );
            None
        }
    }
}

fn scale(checker: &mut Checker, field: &str, value: Option<i64>) -> Option<u8> {
    checker
        .range(field, value, 1, 10)
        .and_then(|v| u8::try_from(v).ok())
}

impl Validate for AgentDraft {
    type Output = NewAgent;

    fn validate(&self) -> Result<NewAgent, ValidationErrors> {
        let mut c = Checker::default();

        let name = c.text("name", &self.name, 2, Some(100), "Name must be at least 2 characters.");
        let age = c
            .range("age", self.age, 18, 100)
            .and_then(|v| u8::try_from(v).ok());
        let gender = c.choice::<Gender>("gender", self.gender.as_deref(), "Please select a gender.");
        let location = c.text(
            "location",
            &self.location,
            2,
            None,
            "Location must be at least 2 characters.",
        );
        let occupation = c.optional_text(self.occupation.as_deref());
        let income_level = check_income(&mut c, self.income_level.as_deref());
        let education_level = c.choice::<EducationLevel>(
            "education_level",
            self.education_level.as_deref(),
            "Please select an education level.",
        );
        let interests = c.tags(
            "interests",
            &self.interests,
            1,
            "At least one interest is required.",
        );
        let purchase_behaviors = c.tags(
            "purchase_behaviors",
            &self.purchase_behaviors,
            1,
            "At least one purchase behavior is required.",
        );
        let purchase_frequency = c.choice::<PurchaseFrequency>(
            "purchase_frequency",
            self.purchase_frequency.as_deref(),
            "Please select a purchase frequency.",
        );
        let communication_preferences = c.choice_set::<CommunicationPreference>(
            "communication_preferences",
            &self.communication_preferences,
            "At least one communication preference is required.",
        );
        let social_media_usage = self
            .social_media_usage
            .as_ref()
            .map(|tags| tags.as_slice().to_vec());
        let brand_loyalty = scale(&mut c, "brand_loyalty", self.brand_loyalty);
        let price_sensitivity = scale(&mut c, "price_sensitivity", self.price_sensitivity);
        let tech_savviness = scale(&mut c, "tech_savviness", self.tech_savviness);
        let ml_engine_id = match c.optional_text(self.ml_engine_id.as_deref()) {
            Some(id) => Some(id),
            None => {
                c.reject("ml_engine_id", "Please select an ML engine");
                None
            }
        };

        let (
            Some(name),
            Some(age),
            Some(gender),
            Some(location),
            Some(income_level),
            Some(education_level),
            Some(interests),
            Some(purchase_behaviors),
            Some(purchase_frequency),
            Some(communication_preferences),
            Some(brand_loyalty),
            Some(price_sensitivity),
            Some(tech_savviness),
            Some(ml_engine_id),
        ) = (
            name,
            age,
            gender,
            location,
            income_level,
            education_level,
            interests,
            purchase_behaviors,
            purchase_frequency,
            communication_preferences,
            brand_loyalty,
            price_sensitivity,
            tech_savviness,
            ml_engine_id,
        )
        else {
            return Err(c.finish());
        };

        Ok(NewAgent {
            name,
            age,
            gender,
            location,
            occupation,
            income_level,
            education_level,
            interests,
            purchase_behaviors,
            purchase_frequency,
            communication_preferences,
            social_media_usage,
            brand_loyalty,
            price_sensitivity,
            tech_savviness,
            ml_engine_id,
        })
    }
}

/// In-progress campaign form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignDraft {
    pub name: String,
    pub description: String,
    pub target_audience: Option<String>,
    pub budget: String,
    pub marketing_channel: Option<String>,
    pub message_type: Option<String>,
    pub content: String,
}

impl Validate for CampaignDraft {
    type Output = NewCampaign;

    fn validate(&self) -> Result<NewCampaign, ValidationErrors> {
        let mut c = Checker::default();

        let name = c.text(
            "name",
            &self.name,
            2,
            None,
            "Campaign name must be at least 2 characters.",
        );
        let description = c.text(
            "description",
            &self.description,
            10,
            None,
            "Description must be at least 10 characters.",
        );
        let target_audience = c.choice::<TargetAudience>(
            "target_audience",
            self.target_audience.as_deref(),
            "Please select a target audience.",
        );
        let budget = c.text("budget", &self.budget, 1, None, "Budget is required.");
        let marketing_channel = c.choice::<MarketingChannel>(
            "marketing_channel",
            self.marketing_channel.as_deref(),
            "Please select a marketing channel.",
        );
        let message_type = c.choice::<MessageType>(
            "message_type",
            self.message_type.as_deref(),
            "Please select a message type.",
        );
        let content = c.text(
            "content",
            &self.content,
            10,
            None,
            "Content must be at least 10 characters.",
        );

        let (
            Some(name),
            Some(description),
            Some(target_audience),
            Some(budget),
            Some(marketing_channel),
            Some(message_type),
            Some(content),
        ) = (
            name,
            description,
            target_audience,
            budget,
            marketing_channel,
            message_type,
            content,
        )
        else {
            return Err(c.finish());
        };

        Ok(NewCampaign {
            name,
            description,
            target_audience,
            budget,
            marketing_channel,
            message_type,
            content,
        })
    }
}

/// In-progress ML engine form
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MlEngineDraft {
    pub name: String,
    pub provider: Option<String>,
    pub api_key: String,
    pub model_version: Option<String>,
    pub description: Option<String>,
}

impl fmt::Debug for MlEngineDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MlEngineDraft")
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("model_version", &self.model_version)
            .field("description", &self.description)
            .finish()
    }
}

impl Validate for MlEngineDraft {
    type Output = NewMlEngine;

    fn validate(&self) -> Result<NewMlEngine, ValidationErrors> {
        let mut c = Checker::default();

        let name = c.text("name", &self.name, 2, None, "Name must be at least 2 characters.");
        let provider =
            c.choice::<Provider>("provider", self.provider.as_deref(), "Please select a provider.");
        let api_key = c.text("api_key", &self.api_key, 10, None, "API key is required.");
        let model_version = c.optional_text(self.model_version.as_deref());
        let description = c.optional_text(self.description.as_deref());

        let (Some(name), Some(provider), Some(api_key)) = (name, provider, api_key) else {
            return Err(c.finish());
        };

        Ok(NewMlEngine {
            name,
            provider,
            api_key,
            model_version,
            description,
        })
    }
}

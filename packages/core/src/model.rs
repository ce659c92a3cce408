// ABOUTME: Data model for agents, campaigns and ML engines
// ABOUTME: Closed enumerations with their wire spellings plus read and create record shapes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a string is not a member of a closed enumeration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {kind}. Must be one of: {allowed}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub allowed: String,
}

/// Display label shared by every closed enumeration
pub trait EnumLabel {
    fn label(&self) -> &'static str;
}

/// Read-side value the backend stores as free text. Anything outside the enumeration is kept
/// verbatim instead of failing the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Known(T),
    Other(String),
}

impl<T: EnumLabel> Lenient<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Lenient::Known(value) => Some(value),
            Lenient::Other(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Lenient::Known(value) => value.label(),
            Lenient::Other(raw) => raw,
        }
    }
}

/// Declares a closed enumeration whose serde form, `FromStr` and `as_str` agree
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Human-readable label shown in forms and tables
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl EnumLabel for $name {
            fn label(&self) -> &'static str {
                $name::label(self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                        allowed: [$($wire),+].join(", "),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    Gender, "gender" {
        Male => ("MALE", "Male"),
        Female => ("FEMALE", "Female"),
        NonBinary => ("NON_BINARY", "Non-binary"),
        Other => ("OTHER", "Other"),
        PreferNotToSay => ("PREFER_NOT_TO_SAY", "Prefer not to say"),
    }
}

wire_enum! {
    EducationLevel, "education level" {
        HighSchool => ("HIGH_SCHOOL", "High School"),
        Associates => ("ASSOCIATES", "Associate's Degree"),
        Bachelors => ("BACHELORS", "Bachelor's Degree"),
        Masters => ("MASTERS", "Master's Degree"),
        Doctorate => ("DOCTORATE", "Doctorate"),
        None => ("NONE", "None"),
        Other => ("OTHER", "Other"),
    }
}

wire_enum! {
    PurchaseFrequency, "purchase frequency" {
        Daily => ("DAILY", "Daily"),
        Weekly => ("WEEKLY", "Weekly"),
        Monthly => ("MONTHLY", "Monthly"),
        Quarterly => ("QUARTERLY", "Quarterly"),
        Yearly => ("YEARLY", "Yearly"),
        Rarely => ("RARELY", "Rarely"),
    }
}

wire_enum! {
    CommunicationPreference, "communication preference" {
        Email => ("EMAIL", "Email"),
        Sms => ("SMS", "SMS"),
        Phone => ("PHONE", "Phone"),
        SocialMedia => ("SOCIAL_MEDIA", "Social Media"),
        DirectMail => ("DIRECT_MAIL", "Direct Mail"),
    }
}

wire_enum! {
    /// Coarse income bracket used by older agent records
    IncomeBand, "income band" {
        Low => ("LOW", "Low"),
        Medium => ("MEDIUM", "Medium"),
        High => ("HIGH", "High"),
    }
}

wire_enum! {
    TargetAudience, "target audience" {
        YoungAdults => ("young_adults", "Young Adults (18-25)"),
        Professionals => ("professionals", "Professionals (26-40)"),
        MiddleAged => ("middle_aged", "Middle Aged (41-55)"),
        Seniors => ("seniors", "Seniors (56+)"),
        Parents => ("parents", "Parents"),
        Students => ("students", "Students"),
    }
}

wire_enum! {
    MarketingChannel, "marketing channel" {
        SocialMedia => ("social_media", "Social Media"),
        Email => ("email", "Email"),
        SearchAds => ("search_ads", "Search Ads"),
        DisplayAds => ("display_ads", "Display Ads"),
        Tv => ("tv", "Television"),
        Radio => ("radio", "Radio"),
        Print => ("print", "Print"),
    }
}

wire_enum! {
    MessageType, "message type" {
        Informational => ("informational", "Informational"),
        Promotional => ("promotional", "Promotional"),
        Emotional => ("emotional", "Emotional"),
    }
}

wire_enum! {
    Provider, "provider" {
        OpenAi => ("openai", "OpenAI"),
        Anthropic => ("anthropic", "Anthropic"),
        Llama => ("llama", "Llama"),
        Gemini => ("gemini", "Google Gemini"),
    }
}

/// Upper bound for a USD income amount
pub const MAX_INCOME_USD: i64 = 1_000_000;

/// Income is a USD amount in current records and a band in older ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IncomeLevel {
    Amount(i64),
    Band(IncomeBand),
}

impl fmt::Display for IncomeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncomeLevel::Amount(usd) => write!(f, "${}", usd),
            IncomeLevel::Band(band) => f.write_str(band.label()),
        }
    }
}

/// Agent as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub gender: Option<Gender>,
    pub location: String,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub income_level: Option<IncomeLevel>,
    #[serde(default)]
    pub education_level: Option<EducationLevel>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub purchase_behaviors: Vec<String>,
    pub purchase_frequency: PurchaseFrequency,
    #[serde(default)]
    pub communication_preferences: Vec<CommunicationPreference>,
    #[serde(default)]
    pub social_media_usage: Option<Vec<String>>,
    pub brand_loyalty: u8,
    pub price_sensitivity: u8,
    pub tech_savviness: u8,
    #[serde(default)]
    pub ml_engine_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Validated agent creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAgent {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    pub income_level: IncomeLevel,
    pub education_level: EducationLevel,
    pub interests: Vec<String>,
    pub purchase_behaviors: Vec<String>,
    pub purchase_frequency: PurchaseFrequency,
    pub communication_preferences: Vec<CommunicationPreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media_usage: Option<Vec<String>>,
    pub brand_loyalty: u8,
    pub price_sensitivity: u8,
    pub tech_savviness: u8,
    pub ml_engine_id: String,
}

/// Campaign as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub description: String,
    pub target_audience: Lenient<TargetAudience>,
    pub budget: String,
    pub marketing_channel: Lenient<MarketingChannel>,
    pub message_type: MessageType,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Validated campaign creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCampaign {
    pub name: String,
    pub description: String,
    pub target_audience: TargetAudience,
    pub budget: String,
    pub marketing_channel: MarketingChannel,
    pub message_type: MessageType,
    pub content: String,
}

/// ML engine as returned by the backend. The API key is never read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlEngine {
    pub id: String,
    pub name: String,
    pub provider: Provider,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Validated ML engine creation request
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMlEngine {
    pub name: String,
    pub provider: Provider,
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl fmt::Debug for NewMlEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewMlEngine")
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("model_version", &self.model_version)
            .field("description", &self.description)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_enum_wire_spellings() {
        assert_eq!(Gender::PreferNotToSay.as_str(), "PREFER_NOT_TO_SAY");
        assert_eq!(
            serde_json::to_value(CommunicationPreference::DirectMail).unwrap(),
            json!("DIRECT_MAIL")
        );
        assert_eq!(
            serde_json::to_value(MarketingChannel::SearchAds).unwrap(),
            json!("search_ads")
        );
        assert_eq!("gemini".parse::<Provider>().unwrap(), Provider::Gemini);
    }

    #[test]
    fn test_enum_parse_rejects_other_case() {
        let err = "male".parse::<Gender>().unwrap_err();
        assert_eq!(err.kind, "gender");
        assert!(err.to_string().contains("MALE, FEMALE"));
        assert!("Promotional".parse::<MessageType>().is_err());
    }

    #[test]
    fn test_all_lists_every_variant_once() {
        assert_eq!(Gender::ALL.len(), 5);
        assert_eq!(EducationLevel::ALL.len(), 7);
        assert_eq!(PurchaseFrequency::ALL.len(), 6);
        assert_eq!(TargetAudience::ALL.len(), 6);
        assert_eq!(MarketingChannel::ALL.len(), 7);
        for level in EducationLevel::ALL {
            assert_eq!(level.as_str().parse::<EducationLevel>().unwrap(), *level);
        }
    }

    #[test]
    fn test_income_level_accepts_both_shapes() {
        let amount: IncomeLevel = serde_json::from_value(json!(55000)).unwrap();
        assert_eq!(amount, IncomeLevel::Amount(55000));

        let band: IncomeLevel = serde_json::from_value(json!("MEDIUM")).unwrap();
        assert_eq!(band, IncomeLevel::Band(IncomeBand::Medium));
        assert_eq!(band.to_string(), "Medium");
    }

    #[test]
    fn test_ml_engine_ignores_api_key_from_backend() {
        let engine: MlEngine = serde_json::from_value(json!({
            "id": "eng-1",
            "name": "gpt_main",
            "provider": "openai",
            "api_key": "sk-should-not-stick",
            "created_at": "2024-01-01T00:00:00"
        }))
        .unwrap();

        let rendered = serde_json::to_value(&engine).unwrap();
        assert!(rendered.get("api_key").is_none());
    }

    #[test]
    fn test_new_ml_engine_debug_redacts_key() {
        let engine = NewMlEngine {
            name: "claude_main".to_string(),
            provider: Provider::Anthropic,
            api_key: "sk-ant-secret-value".to_string(),
            model_version: None,
            description: None,
        };

        let debug = format!("{:?}", engine);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_campaign_keeps_free_text_audience_and_channel() {
        let campaigns: Vec<Campaign> = serde_json::from_value(json!([
            {
                "id": "c1",
                "name": "spring_sale",
                "description": "Seasonal discounts",
                "target_audience": "professionals",
                "budget": "5000",
                "marketing_channel": "email",
                "message_type": "promotional",
                "content": "Save 20% this spring"
            },
            {
                "id": "c2",
                "name": "launch",
                "description": "Launch teaser",
                "target_audience": "Gen Z gamers",
                "budget": "$5,000",
                "marketing_channel": "podcasts",
                "message_type": "emotional",
                "content": "Coming soon to a screen near you"
            }
        ]))
        .unwrap();

        assert_eq!(
            campaigns[0].target_audience,
            Lenient::Known(TargetAudience::Professionals)
        );
        assert_eq!(campaigns[0].target_audience.label(), "Professionals (26-40)");
        assert_eq!(campaigns[1].target_audience.known(), None);
        assert_eq!(campaigns[1].target_audience.label(), "Gen Z gamers");
        assert_eq!(campaigns[1].marketing_channel.label(), "podcasts");

        let rendered = serde_json::to_value(&campaigns[1]).unwrap();
        assert_eq!(rendered["target_audience"], "Gen Z gamers");
    }

    #[test]
    fn test_agent_reads_sparse_legacy_record() {
        let agent: Agent = serde_json::from_value(json!({
            "id": "a1",
            "name": "sam",
            "income_level": "HIGH",
            "purchase_behaviors": ["online"],
            "purchase_frequency": "WEEKLY",
            "communication_preferences": ["EMAIL"],
            "location": "Austin",
            "brand_loyalty": 5,
            "price_sensitivity": 6,
            "tech_savviness": 7,
            "ml_engine_id": "eng-1",
            "created_at": "2024-03-02T10:00:00"
        }))
        .unwrap();

        assert_eq!(agent.age, None);
        assert_eq!(agent.income_level, Some(IncomeLevel::Band(IncomeBand::High)));
        assert!(agent.interests.is_empty());
    }
}

//! Integration tests for the Persona client against a simulated backend

use persona_client::{ClientError, Listing, PersonaClient};
use persona_core::{
    AgentDraft, CampaignDraft, MlEngine, MlEngineDraft, Provider, TagList,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn agent_draft() -> AgentDraft {
    AgentDraft {
        name: "Weekend Gamer".to_string(),
        location: "Seattle".to_string(),
        interests: TagList::from_iter(["esports"]),
        purchase_behaviors: TagList::from_iter(["impulse buys"]),
        communication_preferences: vec!["SOCIAL_MEDIA".to_string()],
        ml_engine_id: Some("eng-7".to_string()),
        ..AgentDraft::default()
    }
}

fn agent_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "age": 30,
        "gender": "PREFER_NOT_TO_SAY",
        "location": "Seattle",
        "income_level": 50000,
        "education_level": "BACHELORS",
        "interests": ["esports"],
        "purchase_behaviors": ["impulse buys"],
        "purchase_frequency": "MONTHLY",
        "communication_preferences": ["SOCIAL_MEDIA"],
        "brand_loyalty": 5,
        "price_sensitivity": 5,
        "tech_savviness": 5,
        "ml_engine_id": "eng-7"
    })
}

fn engine_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "provider": "anthropic",
        "created_at": "2024-05-05T09:30:00"
    })
}

#[tokio::test]
async fn test_invalid_draft_is_never_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = PersonaClient::new(server.uri()).unwrap();
    let draft = CampaignDraft {
        name: "Fall".to_string(),
        description: "too short".to_string(),
        ..CampaignDraft::default()
    };

    let err = client.create_campaign(&draft).await.unwrap_err();

    assert!(err.is_validation());
    let violations = err.violations().unwrap();
    assert!(violations.has_field("description"));
    assert!(violations.has_field("target_audience"));
}

#[tokio::test]
async fn test_create_agent_sends_normalized_typed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/agents"))
        .and(body_partial_json(json!({
            "name": "weekend_gamer",
            "communication_preferences": ["SOCIAL_MEDIA"],
            "brand_loyalty": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(agent_json("a-9", "weekend_gamer")))
        .expect(1)
        .mount(&server)
        .await;

    let client = PersonaClient::new(server.uri()).unwrap();
    let agent = client.create_agent(&agent_draft()).await.unwrap();

    assert_eq!(agent.id, "a-9");
    assert_eq!(agent.name, "weekend_gamer");
}

#[tokio::test]
async fn test_get_agent_reports_backend_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/agents/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Agent not found"})))
        .mount(&server)
        .await;

    let client = PersonaClient::new(server.uri()).unwrap();
    let err = client.get_agent("missing").await.unwrap_err();

    match err {
        ClientError::Api(message) => assert_eq!(message, "Agent not found"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_get_agent_escapes_id_into_one_segment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/agents/a%2Fb%3Fx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(agent_json("a/b?x", "odd_id")))
        .expect(1)
        .mount(&server)
        .await;

    let client = PersonaClient::new(server.uri()).unwrap();
    let agent = client.get_agent("a/b?x").await.unwrap();

    assert_eq!(agent.id, "a/b?x");
}

#[tokio::test]
async fn test_list_failure_uses_fallback_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = PersonaClient::new(server.uri()).unwrap();
    let err = client.list_campaigns().await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to fetch campaigns");
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let client = PersonaClient::new("http://127.0.0.1:1").unwrap();
    let err = client.list_agents().await.unwrap_err();
    assert!(err.is_network_error());
}

#[tokio::test]
async fn test_listing_refetches_after_create() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ml-engines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([engine_json("e1", "first")])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/ml-engines"))
        .and(body_partial_json(json!({"name": "claude_main", "provider": "anthropic"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(engine_json("e2", "claude_main")))
        .expect(1)
        .mount(&server)
        .await;

    let client = PersonaClient::new(server.uri()).unwrap();
    let mut engines: Listing<MlEngine> = Listing::new();

    assert!(engines.refresh(&client).await);
    assert_eq!(engines.items().len(), 1);
    assert!(!engines.is_loading());

    Mock::given(method("GET"))
        .and(path("/api/ml-engines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            engine_json("e1", "first"),
            engine_json("e2", "claude_main")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let draft = MlEngineDraft {
        name: "Claude Main".to_string(),
        provider: Some("anthropic".to_string()),
        api_key: "sk-ant-0123456789".to_string(),
        ..MlEngineDraft::default()
    };
    let created = engines.create(&client, &draft).await.unwrap();

    assert_eq!(created.provider, Provider::Anthropic);
    assert_eq!(engines.items().len(), 2);
    assert_eq!(engines.last_error(), None);
    assert!(!engines.is_loading());
}

#[tokio::test]
async fn test_listing_keeps_items_and_clears_loading_on_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ml-engines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([engine_json("e1", "first")])))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/ml-engines"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = PersonaClient::new(server.uri()).unwrap();
    let mut engines: Listing<MlEngine> = Listing::new();

    assert!(engines.refresh(&client).await);
    assert!(!engines.refresh(&client).await);

    assert_eq!(engines.items().len(), 1);
    assert!(!engines.is_loading());
    assert_eq!(engines.last_error(), Some("Failed to fetch ML engines"));
}

#[tokio::test]
async fn test_listing_create_with_invalid_draft_makes_no_calls() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = PersonaClient::new(server.uri()).unwrap();
    let mut engines: Listing<MlEngine> = Listing::new();

    let err = engines
        .create(&client, &MlEngineDraft::default())
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert!(engines.items().is_empty());
    assert!(!engines.is_loading());
}

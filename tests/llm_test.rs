//! Analyst integration tests with a mocked chat-completions endpoint.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scoutia::llm::ScoutAnalyst;
use scoutia::ScoutError;

fn completion(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

async fn analyst(server: &MockServer) -> ScoutAnalyst {
    ScoutAnalyst::new("test-key")
        .unwrap()
        .with_base_url(server.uri())
}

#[tokio::test]
async fn test_analyze_report_parses_fenced_json() {
    let server = MockServer::start().await;

    let content = "```json\n{\n  \"athlete\": \"Endrick\",\n  \"position\": \"Attacker\",\n  \"scores\": { \"technical\": 8.5, \"tactical\": 7.0, \"physical\": 8.0, \"psychological\": 7.5 },\n  \"summary\": \"Direct runner, always on the last shoulder.\"\n}\n```";

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
        .mount(&server)
        .await;

    let analysis = analyst(&server)
        .await
        .analyze_report("Watched Endrick twice this month...")
        .await
        .unwrap();

    assert_eq!(analysis.athlete.as_deref(), Some("Endrick"));
    assert_eq!(analysis.scores.technical, 8.5);
    assert_eq!(analysis.scores.psychological, 7.5);
}

#[tokio::test]
async fn test_analyze_report_clamps_out_of_range_scores() {
    let server = MockServer::start().await;

    let content = r#"{ "athlete": "X", "position": "Attacker",
        "scores": { "technical": 14.0, "tactical": -2.0, "physical": 9.0, "psychological": 8.0 },
        "summary": "Overexcited model." }"#;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
        .mount(&server)
        .await;

    let analysis = analyst(&server).await.analyze_report("text").await.unwrap();
    assert_eq!(analysis.scores.technical, 10.0);
    assert_eq!(analysis.scores.tactical, 0.0);
}

#[tokio::test]
async fn test_analyze_report_rejects_prose() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "I'd be happy to analyze this scouting report for you!",
        )))
        .mount(&server)
        .await;

    let err = analyst(&server).await.analyze_report("text").await.unwrap_err();
    assert!(matches!(err, ScoutError::LlmFormat { .. }));
}

#[tokio::test]
async fn test_profile_psychology_parses() {
    let server = MockServer::start().await;

    let content = r#"{
        "leadership": 82, "adaptability": 74, "resilience": 90,
        "tactical_intelligence": 77, "emotional_stability": 68,
        "temperament": "driven, occasionally volatile",
        "strengths": ["composure under pressure", "vocal organizer"],
        "weaknesses": ["frustration when isolated"],
        "personality_tags": ["competitor", "leader"],
        "summary": "High-drive profile with strong recovery after setbacks."
    }"#;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
        .mount(&server)
        .await;

    let profile = analyst(&server)
        .await
        .profile_psychology("Report text")
        .await
        .unwrap();

    assert_eq!(profile.leadership, 82);
    assert_eq!(profile.personality_tags, vec!["competitor", "leader"]);
}

#[tokio::test]
async fn test_llm_http_error_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = analyst(&server).await.analyze_report("text").await.unwrap_err();
    assert!(matches!(err, ScoutError::Http(_)));
}

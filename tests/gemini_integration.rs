use serde_json::json;

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sahaay::config::ModelConfig;
use sahaay::providers::{GeminiProvider, GroundedModel};
use sahaay::{Coordinates, Session, Speaker, Turn};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn provider_for(server: &MockServer) -> GeminiProvider {
    let cfg = ModelConfig {
        api_key: Some("test-key".to_string()),
        api_base: Some(server.uri()),
        ..Default::default()
    };
    GeminiProvider::new(cfg).unwrap()
}

fn grounded_body() -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"parts": [{"text": "Head to Relief Camp A on MG Road."}]},
            "groundingMetadata": {"groundingChunks": [
                {"maps": {"title": "Relief Camp A", "uri": "https://maps.example/camp-a"}},
                {"web": {"title": "Flood Advisory", "uri": "https://example.com/advisory"}}
            ]}
        }]
    })
}

/// The request carries the API key header, the googleMaps tool, and the
/// retrieval bias when coordinates are known
#[tokio::test]
async fn test_gemini_sends_maps_tool_and_location_bias() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "tools": [{"googleMaps": {}}],
            "toolConfig": {
                "retrievalConfig": {
                    "latLng": {"latitude": 19.076, "longitude": 72.8777}
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(grounded_body()))
        .expect(1)
        .mount(&server)
        .await;

    let coords = Coordinates::new(19.076, 72.8777).unwrap();
    let turn = provider
        .converse(&[], "Where are relief camps near me?", Some(coords))
        .await;

    assert_eq!(turn.speaker, Speaker::Assistant);
    assert_eq!(turn.text, "Head to Relief Camp A on MG Road.");
    let maps = turn.map_citations.as_ref().unwrap();
    assert_eq!(maps.len(), 1);
    assert_eq!(maps[0].title, "Relief Camp A");
    let webs = turn.web_citations.as_ref().unwrap();
    assert_eq!(webs.len(), 1);
    assert_eq!(webs[0].uri, "https://example.com/advisory");
}

/// Without coordinates the payload keeps the maps tool but drops the bias
#[tokio::test]
async fn test_gemini_omits_bias_without_coords() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(grounded_body()))
        .expect(1)
        .mount(&server)
        .await;

    provider.converse(&[], "Safety tips please", None).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("toolConfig").is_none());
    assert_eq!(body["tools"], json!([{"googleMaps": {}}]));
}

/// Local notices stay local; everything else maps onto API roles with the
/// new utterance appended as the final user entry
#[tokio::test]
async fn test_gemini_history_excludes_local_notices() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(grounded_body()))
        .expect(1)
        .mount(&server)
        .await;

    let history = vec![
        Turn::assistant("Namaste."),
        Turn::system("connection restored"),
        Turn::user("hello"),
    ];
    provider.converse(&history, "Any shelters nearby?", None).await;

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();

    let contents = body["contents"].as_array().unwrap();
    let roles: Vec<&str> = contents
        .iter()
        .map(|content| content["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, vec!["model", "user", "user"]);
    assert_eq!(
        contents.last().unwrap()["parts"][0]["text"],
        "Any shelters nearby?"
    );
    assert!(!body.to_string().contains("connection restored"));
    assert!(body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("Sahaay AI"));
}

/// Evidence partitions into map and web lists in arrival order, and chunks
/// from unrecognized retrieval sources drop out
#[tokio::test]
async fn test_gemini_partitions_evidence_in_arrival_order() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);

    let body = json!({
        "candidates": [{
            "content": {"parts": [{"text": "Found two camps and one advisory."}]},
            "groundingMetadata": {"groundingChunks": [
                {"maps": {"title": "Camp A", "uri": "https://maps.example/a"}},
                {"retrievedContext": {"uri": "https://internal.example/doc"}},
                {"web": {"title": "Advisory", "uri": "https://example.com"}},
                {"maps": {"uri": "https://maps.example/b"}}
            ]}
        }]
    });

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let turn = provider.converse(&[], "camps?", None).await;

    let maps = turn.map_citations.as_ref().unwrap();
    assert_eq!(maps.len(), 2);
    assert_eq!(maps[0].title, "Camp A");
    // Untitled map results get the stock title
    assert_eq!(maps[1].title, "Nearby Resource");
    assert_eq!(maps[1].uri, "https://maps.example/b");
    let webs = turn.web_citations.as_ref().unwrap();
    assert_eq!(webs.len(), 1);
    assert_eq!(webs[0].title, "Advisory");
}

/// A reply with no text at all still reassures the user
#[tokio::test]
async fn test_gemini_placeholder_when_reply_has_no_text() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);

    let body = json!({
        "candidates": [{
            "groundingMetadata": {"groundingChunks": [
                {"retrievedContext": {"uri": "https://internal.example/doc"}}
            ]}
        }]
    });

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let turn = provider.converse(&[], "anyone there?", None).await;

    assert_eq!(turn.text, sahaay::prompts::SEARCHING_PLACEHOLDER);
    assert!(!turn.has_citations());
}

/// HTTP errors from the API produce the fixed fallback turn
#[tokio::test]
async fn test_gemini_http_error_falls_back() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let turn = provider.converse(&[], "help", None).await;

    assert_eq!(turn.speaker, Speaker::Assistant);
    assert_eq!(turn.text, sahaay::prompts::FALLBACK_MESSAGE);
    assert!(!turn.has_citations());
}

/// A refused connection also produces the fallback turn
#[tokio::test]
async fn test_gemini_connect_error_falls_back() {
    // Grab a local address, then shut the server down before the request
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let cfg = ModelConfig {
        api_key: Some("test-key".to_string()),
        api_base: Some(uri),
        ..Default::default()
    };
    let provider = GeminiProvider::new(cfg).unwrap();

    let turn = provider.converse(&[], "help", None).await;

    assert_eq!(turn.text, sahaay::prompts::FALLBACK_MESSAGE);
}

/// Full session flow: each exchange replays the growing history with the
/// welcome turn first and the new question last
#[tokio::test]
async fn test_session_replays_history_through_provider() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(grounded_body()))
        .expect(2)
        .mount(&server)
        .await;

    let session = Session::new(Box::new(provider), None);
    session.submit("Where are relief camps near me?").await.unwrap();
    session.submit("How do I get there?").await.unwrap();

    let turns = session.snapshot();
    assert_eq!(turns.len(), 5);
    let speakers: Vec<Speaker> = turns.iter().map(|t| t.speaker).collect();
    assert_eq!(
        speakers,
        vec![
            Speaker::Assistant,
            Speaker::User,
            Speaker::Assistant,
            Speaker::User,
            Speaker::Assistant
        ]
    );

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    // First exchange: welcome plus the new question
    let first: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(first["contents"].as_array().unwrap().len(), 2);

    // Second exchange: welcome, first question, first reply, new question
    let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    let contents = second["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 4);
    let roles: Vec<&str> = contents
        .iter()
        .map(|content| content["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, vec!["model", "user", "model", "user"]);
    assert_eq!(
        contents.last().unwrap()["parts"][0]["text"],
        "How do I get there?"
    );
}

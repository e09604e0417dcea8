use std::time::Duration;

use gauge_core::{build_request, CountRequest, FailureKind, InputState};
use gauge_engine::{ClientSettings, CountClient, Endpoint, EngineError, ReqwestCountClient};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(text: &str, chat_mode: bool) -> CountRequest {
    build_request(&InputState {
        text: text.to_string(),
        model_id: "openai".to_string(),
        chat_mode,
    })
    .expect("non-empty text builds a request")
}

fn client_for(server: &MockServer) -> ReqwestCountClient {
    ReqwestCountClient::new(ClientSettings::new(server.uri())).expect("client")
}

#[tokio::test]
async fn simple_request_posts_text_to_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/count"))
        .and(body_json(json!({ "text": "hello world", "model": "openai" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tokens": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server).count(&request("hello world", false)).await;
    assert_eq!(outcome, Ok(2));
}

#[tokio::test]
async fn chat_request_posts_messages_to_chat_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat-count"))
        .and(body_json(json!({
            "messages": [
                { "role": "system", "content": "You are helpful." },
                { "role": "user", "content": "hello world" }
            ],
            "model": "openai"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tokens": 13 })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server).count(&request("hello world", true)).await;
    assert_eq!(outcome, Ok(13));
}

#[tokio::test]
async fn repeated_request_yields_same_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tokens": 5 })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let req = request("same text", false);
    assert_eq!(client.count(&req).await, Ok(5));
    assert_eq!(client.count(&req).await, Ok(5));
}

#[tokio::test]
async fn service_error_carries_status_and_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/count"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "detail": "Counting failed: tokenizer missing" })),
        )
        .mount(&server)
        .await;

    let failure = client_for(&server)
        .count(&request("hello", false))
        .await
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::Service { status: 500 });
    assert_eq!(failure.message, "Counting failed: tokenizer missing");
}

#[tokio::test]
async fn service_error_without_detail_uses_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat-count"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad"))
        .mount(&server)
        .await;

    let failure = client_for(&server)
        .count(&request("hello", true))
        .await
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::Service { status: 400 });
    assert!(failure.message.contains("400"));
}

#[tokio::test]
async fn body_without_tokens_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 2 })))
        .mount(&server)
        .await;

    let failure = client_for(&server)
        .count(&request("hello", false))
        .await
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn slow_service_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/count"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "tokens": 1 })),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::new(server.uri())
    };
    let client = ReqwestCountClient::new(settings).unwrap();

    let failure = client.count(&request("hello", false)).await.unwrap_err();
    assert_eq!(failure.kind, FailureKind::Network);
}

#[tokio::test]
async fn unreachable_service_is_network_error() {
    // Port 9 (discard) is practically never listening on loopback.
    let client = ReqwestCountClient::new(ClientSettings::new("http://127.0.0.1:9")).unwrap();

    let failure = client.count(&request("hello", false)).await.unwrap_err();
    assert_eq!(failure.kind, FailureKind::Network);
}

#[test]
fn base_url_is_normalized_and_validated() {
    let client = ReqwestCountClient::new(ClientSettings::new("http://localhost:8000/api/")).unwrap();
    assert_eq!(
        client.endpoint_url(Endpoint::Count),
        "http://localhost:8000/api/count"
    );
    assert_eq!(
        client.endpoint_url(Endpoint::ChatCount),
        "http://localhost:8000/api/chat-count"
    );

    assert!(matches!(
        ReqwestCountClient::new(ClientSettings::new("not a url")),
        Err(EngineError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        ReqwestCountClient::new(ClientSettings::new("ftp://example.com")),
        Err(EngineError::UnsupportedScheme(_))
    ));
}

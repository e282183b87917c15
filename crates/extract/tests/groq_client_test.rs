use std::time::Duration;

use extract::llm::ChatMessage;
use extract::{ChatCompletion, CertificateExtractor, ClientSettings, ExtractError, GroqClient};
use httpmock::prelude::*;
use serde_json::json;

fn settings_for(server: &MockServer) -> ClientSettings {
    ClientSettings {
        base_url: server.url("/openai/v1"),
        model: "test-vision-model".to_string(),
        timeout: Some(Duration::from_secs(5)),
    }
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn sends_one_json_mode_request_with_bearer_key() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/openai/v1/chat/completions")
                .header("authorization", "Bearer gsk_test")
                .json_body_partial(
                    r#"{
                        "model": "test-vision-model",
                        "temperature": 0.0,
                        "response_format": {"type": "json_object"}
                    }"#,
                )
                .body_contains("data:image/jpeg;base64,");
            then.status(200).json_body(completion_body(
                r#"{"school_name": "Govt. High School", "last_class_attended": "10th Standard"}"#,
            ));
        })
        .await;

    let extractor = CertificateExtractor::groq("gsk_test", settings_for(&server)).unwrap();
    let extraction = extractor.extract("image/jpeg", b"\xff\xd8\xff").await.unwrap();

    mock.assert_async().await;
    assert_eq!(extraction.school_name, "Govt. High School");
    assert_eq!(extraction.last_class_attended, "10th Standard");
}

#[tokio::test]
async fn error_status_is_an_upstream_failure() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/openai/v1/chat/completions");
            then.status(401)
                .json_body(json!({"error": {"message": "Invalid API Key"}}));
        })
        .await;

    let client = GroqClient::new("bad", settings_for(&server)).unwrap();
    let err = client
        .complete_json(vec![ChatMessage::system("x")])
        .await
        .unwrap_err();

    mock.assert_hits_async(1).await;
    assert!(matches!(err, ExtractError::UpstreamStatus { status: 401, .. }));
    assert!(err.is_upstream());
}

#[tokio::test]
async fn empty_choices_is_an_upstream_failure() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/openai/v1/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;

    let client = GroqClient::new("k", settings_for(&server)).unwrap();
    let err = client
        .complete_json(vec![ChatMessage::system("x")])
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::EmptyResponse));
}

#[tokio::test]
async fn null_content_reads_as_empty_text() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/openai/v1/chat/completions");
            then.status(200)
                .json_body(json!({"choices": [{"message": {"role": "assistant", "content": null}}]}));
        })
        .await;

    let client = GroqClient::new("k", settings_for(&server)).unwrap();
    let text = client
        .complete_json(vec![ChatMessage::system("x")])
        .await
        .unwrap();

    assert_eq!(text, "");
}

#[tokio::test]
async fn garbage_envelope_is_a_transport_failure() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/openai/v1/chat/completions");
            then.status(200).body("<html>gateway</html>");
        })
        .await;

    let client = GroqClient::new("k", settings_for(&server)).unwrap();
    let err = client
        .complete_json(vec![ChatMessage::system("x")])
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::Transport(_)));
}

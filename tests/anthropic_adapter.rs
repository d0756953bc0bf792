mod common;

use std::sync::Arc;

use common::RecordingTransport;
use serde_json::json;
use unillm::{
    ChatRequest, ClientConfig, CompletionRequest, LLMClient, LLMError, LLMProvider, Message,
    ProviderKind, TokenUsage,
};

fn config() -> ClientConfig {
    ClientConfig::default()
        .with_anthropic_api_key("sk-ant")
        .with_model("claude-3-5-sonnet-20241022")
}

fn message_body(text: &str) -> serde_json::Value {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-5-sonnet-20241022",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "stop_sequence": null,
        "usage": {"input_tokens": 10, "output_tokens": 20}
    })
}

fn client(transport: &Arc<RecordingTransport>) -> LLMClient {
    LLMClient::with_transport(ProviderKind::Anthropic, config(), transport.clone())
        .expect("client")
}

#[tokio::test]
async fn chat_lifts_system_prompt_and_normalizes_usage() {
    let transport = Arc::new(RecordingTransport::new().respond(200, message_body("Hello!")));
    let client = client(&transport);

    let response = client
        .chat(ChatRequest::new([Message::system("S"), Message::user("Hello")]))
        .await
        .expect("chat should succeed");

    assert_eq!(response.content, "Hello!");
    assert_eq!(response.finish_reason.as_deref(), Some("end_turn"));
    assert_eq!(response.provider, ProviderKind::Anthropic);
    assert_eq!(
        response.usage,
        TokenUsage {
            prompt_tokens: Some(10),
            completion_tokens: Some(20),
            total_tokens: Some(30),
        }
    );

    let sent = transport.only_request();
    assert_eq!(sent.url, "https://api.anthropic.com/v1/messages");
    assert_eq!(sent.body["system"], json!("S"));
    assert_eq!(
        sent.body["messages"],
        json!([{"role": "user", "content": "Hello"}])
    );
    assert_eq!(sent.body["model"], json!("claude-3-5-sonnet-20241022"));
    assert_eq!(sent.body["max_tokens"], json!(1024));
    assert_eq!(sent.headers["anthropic-version"], "2023-06-01");
    assert_eq!(sent.headers["Authorization"], "Bearer sk-ant");
    assert_eq!(sent.headers["x-api-key"], "sk-ant");
    assert_eq!(sent.headers["Content-Type"], "application/json");
}

#[tokio::test]
async fn extra_system_entries_stay_in_messages() {
    let transport = Arc::new(RecordingTransport::new().respond(200, message_body("ok")));
    let client = client(&transport);

    client
        .chat(ChatRequest::new([
            Message::system("first"),
            Message::user("Hi"),
            Message::system("second"),
        ]))
        .await
        .expect("chat");

    let sent = transport.only_request();
    assert_eq!(sent.body["system"], json!("first"));
    assert_eq!(
        sent.body["messages"],
        json!([
            {"role": "user", "content": "Hi"},
            {"role": "system", "content": "second"}
        ])
    );
}

#[tokio::test]
async fn provider_options_pass_through() {
    let transport = Arc::new(RecordingTransport::new().respond(200, message_body("ok")));
    let client = client(&transport);

    client
        .chat(
            ChatRequest::from("Hello")
                .with_temperature(0.2)
                .with_extra("top_k", 5)
                .with_extra("stop_sequences", json!(["END"])),
        )
        .await
        .expect("chat");

    let sent = transport.only_request();
    assert!(sent.body.get("system").is_none());
    assert_eq!(sent.body["temperature"], json!(0.2));
    assert_eq!(sent.body["top_k"], json!(5));
    assert_eq!(sent.body["stop_sequences"], json!(["END"]));
}

#[tokio::test]
async fn complete_wraps_the_prompt_in_a_user_message() {
    let transport = Arc::new(RecordingTransport::new().respond(200, message_body("done")));
    let client = client(&transport);

    let response = client
        .complete(CompletionRequest::new("Complete this"))
        .await
        .expect("complete");
    assert_eq!(response.content, "done");

    let sent = transport.only_request();
    assert_eq!(sent.url, "https://api.anthropic.com/v1/messages");
    assert_eq!(
        sent.body["messages"],
        json!([{"role": "user", "content": "Complete this"}])
    );
}

#[tokio::test]
async fn models_do_not_touch_the_network() {
    let transport = Arc::new(RecordingTransport::new());
    let client = client(&transport);

    let models = client.models().await.expect("models");
    for expected in [
        "claude-3-opus-20240229",
        "claude-3-sonnet-20240229",
        "claude-3-haiku-20240307",
        "claude-3-5-sonnet-20241022",
    ] {
        assert!(models.iter().any(|m| m == expected), "{expected} missing");
    }
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn error_bodies_are_classified_with_provider_message() {
    let transport = Arc::new(
        RecordingTransport::new()
            .respond(
                401,
                json!({"type": "error", "error": {"type": "authentication_error", "message": "invalid x-api-key"}}),
            )
            .respond(
                400,
                json!({"type": "error", "error": {"type": "invalid_request_error", "message": "Invalid request format"}}),
            )
            .respond(
                529,
                json!({"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}}),
            ),
    );
    let client = client(&transport);

    let err = client.chat(ChatRequest::from("x")).await.expect_err("401");
    assert!(matches!(err, LLMError::Authentication { ref message } if message == "invalid x-api-key"));

    let err = client.chat(ChatRequest::from("x")).await.expect_err("400");
    assert!(matches!(err, LLMError::Api { status: Some(400), .. }));
    assert!(err.to_string().contains("Invalid request format"));

    let err = client.chat(ChatRequest::from("x")).await.expect_err("529");
    assert!(matches!(err, LLMError::Api { status: Some(529), ref message } if message == "Overloaded"));
}

#[test]
fn construction_requires_an_anthropic_credential() {
    let config = ClientConfig::default().with_model("claude-3-haiku-20240307");
    let err = LLMClient::new(ProviderKind::Anthropic, config)
        .err()
        .expect("construction should fail");
    assert!(
        matches!(err, LLMError::Configuration { ref message } if message == "Anthropic API key is required")
    );

    let config = ClientConfig::default().with_anthropic_api_key("sk-ant");
    let err = LLMClient::new(ProviderKind::Anthropic, config)
        .err()
        .expect("construction should fail");
    assert!(matches!(err, LLMError::Configuration { .. }));
}

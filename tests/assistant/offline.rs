use httpmock::Method::POST;
use rawg_rs::assistant::ASSISTANT_UNAVAILABLE;
use rawg_rs::{Assistant, ChatMessage, OpenAiCompatibleBackend, RetryConfig, Settings};
use std::sync::Arc;

use crate::common::{fixture, setup_server};

fn backend_for(server: &httpmock::MockServer) -> OpenAiCompatibleBackend {
    OpenAiCompatibleBackend::new("groq-key")
        .unwrap()
        .base_url(&format!("{}/openai/v1", server.base_url()))
        .unwrap()
        .retry_config(RetryConfig {
            enabled: false,
            ..RetryConfig::default()
        })
}

#[tokio::test]
async fn completion_content_is_returned() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/v1/chat/completions")
            .header("authorization", "Bearer groq-key");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("chat_completion"));
    });

    let assistant = Assistant::new(Arc::new(backend_for(&server)));
    let reply = assistant
        .respond(&[ChatMessage::user("Something like Dead Cells?")])
        .await;

    mock.assert();
    assert_eq!(reply, "Try Hades if you like fast roguelikes.");
}

#[tokio::test]
async fn backend_errors_become_an_apology() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/openai/v1/chat/completions");
        then.status(500).body("upstream down");
    });

    let assistant = Assistant::new(Arc::new(backend_for(&server)));
    let reply = assistant.respond(&[ChatMessage::user("hi")]).await;

    mock.assert_hits(1);
    assert!(reply.starts_with("Sorry"), "{reply}");
    assert!(!reply.contains("groq-key"));
}

#[tokio::test]
async fn unconfigured_settings_yield_unavailable_assistant() {
    let settings = Settings::from_lookup(|_| None).unwrap();
    let assistant = settings.assistant();
    assert_eq!(
        assistant.respond(&[ChatMessage::user("hi")]).await,
        ASSISTANT_UNAVAILABLE
    );
}

use std::sync::Arc;

use httpmock::prelude::*;
use serde_json::json;
use warga_chat::{
    ChatOrchestrator, CompletionRequest, ContextCollector, LlmClient, LlmError, LlmMessage,
    OpenAiCompatClient,
};
use warga_core::config::{AssistantConfig, LlmConfig};
use warga_storage::MemoryStore;

fn config_for(server: &MockServer) -> LlmConfig {
    LlmConfig {
        api_base: format!("{}/openai/v1", server.base_url()),
        api_key: "gsk_test".to_string(),
        timeout_secs: 5,
        ..LlmConfig::default()
    }
}

fn request(text: &str) -> CompletionRequest {
    CompletionRequest {
        model: "llama-3.3-70b-versatile".to_string(),
        temperature: 0.3,
        messages: vec![LlmMessage::system("konteks"), LlmMessage::user(text)],
    }
}

#[tokio::test]
async fn sends_two_message_completion_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/v1/chat/completions")
            .header("authorization", "Bearer gsk_test")
            .json_body_includes(
                json!({
                    "model": "llama-3.3-70b-versatile",
                    "messages": [
                        {"role": "system", "content": "konteks"},
                        {"role": "user", "content": "Halo"}
                    ]
                })
                .to_string(),
            )
            .body_includes("\"temperature\":0.3");
        then.status(200).json_body(json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Halo juga!"},
                "finish_reason": "stop"
            }]
        }));
    });

    let client = OpenAiCompatClient::new(&config_for(&server)).unwrap();
    let reply = client.complete(request("Halo")).await.unwrap();

    mock.assert();
    assert_eq!(reply, "Halo juga!");
}

#[tokio::test]
async fn unauthorized_is_auth_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/openai/v1/chat/completions");
        then.status(401)
            .json_body(json!({"error": {"message": "Invalid API Key"}}));
    });

    let client = OpenAiCompatClient::new(&config_for(&server)).unwrap();
    let err = client.complete(request("Halo")).await.unwrap_err();
    match err {
        LlmError::AuthFailure { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API Key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_reads_retry_after() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/openai/v1/chat/completions");
        then.status(429).header("retry-after", "12");
    });

    let client = OpenAiCompatClient::new(&config_for(&server)).unwrap();
    let err = client.complete(request("Halo")).await.unwrap_err();
    assert!(matches!(
        err,
        LlmError::RateLimited {
            retry_after_secs: Some(12)
        }
    ));
}

#[tokio::test]
async fn empty_choices_is_invalid_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/openai/v1/chat/completions");
        then.status(200).json_body(json!({"choices": []}));
    });

    let client = OpenAiCompatClient::new(&config_for(&server)).unwrap();
    let err = client.complete(request("Halo")).await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn server_error_is_provider_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/openai/v1/chat/completions");
        then.status(500).body("internal");
    });

    let client = OpenAiCompatClient::new(&config_for(&server)).unwrap();
    let err = client.complete(request("Halo")).await.unwrap_err();
    assert!(matches!(
        err,
        LlmError::Provider {
            status: Some(500),
            ..
        }
    ));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn orchestrator_retries_provider_once_configured() {
    let server = MockServer::start();
    let failing = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/v1/chat/completions")
            .body_includes("pertama");
        then.status(503).body("overloaded");
    });

    let mut config = config_for(&server);
    config.max_retries = 2;
    config.retry_backoff_ms = 1;
    let client = Arc::new(OpenAiCompatClient::new(&config).unwrap());
    let orchestrator = ChatOrchestrator::new(
        ContextCollector::new(Arc::new(MemoryStore::new())),
        client,
        &config,
        &AssistantConfig::default(),
    );

    let err = orchestrator.handle_message("pertama").await.unwrap_err();
    assert!(matches!(
        err,
        LlmError::Provider {
            status: Some(503),
            ..
        }
    ));
    failing.assert_calls(3);
}

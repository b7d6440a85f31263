//! LLM completion port and an OpenAI-compatible HTTP client (Groq).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use warga_core::config::LlmConfig;

use crate::error::LlmError;
use crate::types::CompletionRequest;

/// Anything that can turn a message sequence into reply text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

/// Client for `POST {api_base}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiCompatClient {
    client: reqwest::Client,
    api_base: String,
    timeout_ms: u64,
}

impl OpenAiCompatClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| LlmError::InvalidApiKey(e.to_string()))?,
        );

        let timeout_ms = config.timeout_secs.max(1) * 1000;
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| LlmError::Provider {
                status: None,
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_base: config.api_base.trim().to_string(),
            timeout_ms,
        })
    }

    fn chat_completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            return base.to_string();
        }
        format!("{base}/chat/completions")
    }

    fn map_transport_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.timeout_ms)
        } else {
            LlmError::Provider {
                status: err.status().map(|s| s.as_u16()),
                message: err.to_string(),
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionBody {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl LlmClient for OpenAiCompatClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let response = self
            .client
            .post(self.chat_completions_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body, retry_after_secs));
        }

        let body: CompletionBody = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("response has no message content".into()))?;

        debug!(model = %request.model, chars = content.len(), "LLM completion received");
        Ok(content)
    }
}

/// Classify a non-success provider status.
fn status_error(status: StatusCode, body: String, retry_after_secs: Option<u64>) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::AuthFailure {
            status: status.as_u16(),
            body,
        },
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited { retry_after_secs },
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => LlmError::Provider {
            status: Some(status.as_u16()),
            message: format!("provider timed out: {body}"),
        },
        _ => LlmError::Provider {
            status: Some(status.as_u16()),
            message: format!("status {}: {}", status.as_u16(), body),
        },
    }
}

//! Chat orchestrator: context collection, prompt assembly, LLM call.
//!
//! Each message runs as one sequential chain. Table-store failures degrade
//! to the fallback context; LLM failures are returned to the caller.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use warga_core::config::{AssistantConfig, LlmConfig};

use crate::collector::{ContextCollector, ContextOutcome};
use crate::error::LlmError;
use crate::llm::LlmClient;
use crate::prompt::{build_system_prompt, context_text};
use crate::types::{CompletionRequest, LlmMessage};

/// Central coordinator for `POST /chat`.
pub struct ChatOrchestrator {
    collector: ContextCollector,
    llm: Arc<dyn LlmClient>,
    model: String,
    temperature: f32,
    language: String,
    timeout: Duration,
    max_retries: u32,
    retry_backoff: Duration,
}

impl ChatOrchestrator {
    /// Create an orchestrator from its collaborators and configuration.
    pub fn new(
        collector: ContextCollector,
        llm: Arc<dyn LlmClient>,
        llm_config: &LlmConfig,
        assistant: &AssistantConfig,
    ) -> Self {
        Self {
            collector,
            llm,
            model: llm_config.model.clone(),
            temperature: llm_config.temperature,
            language: assistant.language.clone(),
            timeout: Duration::from_secs(llm_config.timeout_secs.max(1)),
            max_retries: llm_config.max_retries,
            retry_backoff: Duration::from_millis(llm_config.retry_backoff_ms),
        }
    }

    /// Override the per-attempt LLM timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Answer one resident message.
    pub async fn handle_message(&self, message: &str) -> Result<String, LlmError> {
        let request = self.build_request(message).await;

        let mut attempt: u32 = 0;
        loop {
            match self.complete_once(request.clone()).await {
                Ok(reply) => {
                    info!(attempt, reply_chars = reply.len(), "Chat reply generated");
                    return Ok(reply);
                }
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.retry_delay(&e);
                    warn!(
                        error = %e,
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying LLM call"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!(error = %e, attempt, "LLM call failed");
                    return Err(e);
                }
            }
        }
    }

    /// Collect context and assemble the two-message prompt.
    pub async fn build_request(&self, message: &str) -> CompletionRequest {
        let outcome = self.collector.collect().await;
        if let ContextOutcome::Unavailable(reason) = &outcome {
            info!(reason = %reason, "Answering without live data");
        }
        let system = build_system_prompt(context_text(&outcome), &self.language);

        CompletionRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages: vec![LlmMessage::system(system), LlmMessage::user(message)],
        }
    }

    /// Wait before the next attempt; a provider `Retry-After` extends the backoff.
    fn retry_delay(&self, err: &LlmError) -> Duration {
        match err {
            LlmError::RateLimited {
                retry_after_secs: Some(secs),
            } => self.retry_backoff.max(Duration::from_secs(*secs)),
            _ => self.retry_backoff,
        }
    }

    async fn complete_once(&self, request: CompletionRequest) -> Result<String, LlmError> {
        match tokio::time::timeout(self.timeout, self.llm.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

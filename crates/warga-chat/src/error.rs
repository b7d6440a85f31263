//! Error types for the LLM completion call.

use warga_core::error::WargaError;

/// Errors from asking the LLM for a reply.
///
/// Unlike table-store failures these are never masked; the HTTP layer maps
/// each variant to a status code.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("missing LLM API key")]
    MissingApiKey,
    #[error("LLM API key is not a valid header value: {0}")]
    InvalidApiKey(String),
    #[error("LLM request timed out after {0} ms")]
    Timeout(u64),
    #[error("LLM provider rejected credentials (status {status}): {body}")]
    AuthFailure { status: u16, body: String },
    #[error("LLM provider rate limit exceeded")]
    RateLimited { retry_after_secs: Option<u64> },
    #[error("LLM provider error: {message}")]
    Provider {
        status: Option<u16>,
        message: String,
    },
    #[error("invalid LLM response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Whether sending the same request again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Timeout(_) | LlmError::RateLimited { .. } => true,
            LlmError::Provider { status, .. } => status.map_or(true, |s| s >= 500),
            LlmError::MissingApiKey
            | LlmError::InvalidApiKey(_)
            | LlmError::AuthFailure { .. }
            | LlmError::InvalidResponse(_) => false,
        }
    }
}

impl From<LlmError> for WargaError {
    fn from(err: LlmError) -> Self {
        WargaError::Llm(err.to_string())
    }
}

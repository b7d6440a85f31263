//! Request/response types for the chat endpoint and the LLM call.

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Successful reply from `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Role of a message sent to the LLM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One entry of the prompt sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: MessageRole,
    pub content: String,
}

impl LlmMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// A single, non-streaming completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<LlmMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_requires_message() {
        let ok: ChatRequest = serde_json::from_value(json!({"message": "Halo"})).unwrap();
        assert_eq!(ok.message, "Halo");
        assert!(serde_json::from_value::<ChatRequest>(json!({})).is_err());
    }

    #[test]
    fn test_completion_request_wire_shape() {
        let request = CompletionRequest {
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.5,
            messages: vec![LlmMessage::system("ctx"), LlmMessage::user("Halo")],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "llama-3.3-70b-versatile",
                "temperature": 0.5,
                "messages": [
                    {"role": "system", "content": "ctx"},
                    {"role": "user", "content": "Halo"}
                ]
            })
        );
    }
}

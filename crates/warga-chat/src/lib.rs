//! Conversational core of the Warga assistant.
//!
//! Collects a live context block from the table-store, assembles the
//! system/user prompt, and asks the LLM completion service for a reply.

pub mod collector;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod prompt;
pub mod types;

pub use collector::{CommunitySnapshot, ContextCollector, ContextOutcome};
pub use error::LlmError;
pub use llm::{LlmClient, OpenAiCompatClient};
pub use orchestrator::ChatOrchestrator;
pub use types::{ChatRequest, ChatResponse, CompletionRequest, LlmMessage, MessageRole};

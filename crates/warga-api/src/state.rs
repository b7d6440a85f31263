//! Application state shared across route handlers.

use std::sync::Arc;

use warga_chat::ChatOrchestrator;

/// Shared application state.
///
/// Holds long-lived, read-only collaborators constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    /// Answers chat messages.
    pub orchestrator: Arc<ChatOrchestrator>,
    /// The single frontend origin allowed by CORS.
    pub allowed_origin: String,
}

impl AppState {
    pub fn new(orchestrator: ChatOrchestrator, allowed_origin: impl Into<String>) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            allowed_origin: allowed_origin.into(),
        }
    }
}

//! Route handler for `POST /chat`.

use axum::extract::State;
use axum::Json;

use warga_chat::{ChatRequest, ChatResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /chat - answer a resident's question using live community data.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    tracing::debug!(chars = req.message.len(), "Chat message received");
    let reply = state.orchestrator.handle_message(&req.message).await?;
    Ok(Json(ChatResponse { reply }))
}

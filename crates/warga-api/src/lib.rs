//! Warga API crate - axum HTTP surface for the chat assistant.
//!
//! Exposes a single `POST /chat` endpoint behind a one-origin CORS policy
//! and maps LLM failures to HTTP status codes.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;

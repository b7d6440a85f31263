//! Router setup with the chat route and middleware.
//!
//! Configures the axum Router with CORS and request tracing.

use axum::http::HeaderValue;
use axum::routing::post;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use warga_core::config::ServerConfig;
use warga_core::error::WargaError;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
///
/// Only `state.allowed_origin` may call the API cross-origin; from that
/// origin any method and any header are accepted.
pub fn create_router(state: AppState) -> Router {
    let origin = match HeaderValue::from_str(state.allowed_origin.trim()) {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(e) => {
            tracing::warn!(
                origin = %state.allowed_origin,
                error = %e,
                "Invalid allowed origin; cross-origin requests will be refused"
            );
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(handlers::chat))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured address.
///
/// Runs until Ctrl+C is received.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), WargaError> {
    let addr = format!("{}:{}", config.host, config.port);

    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| WargaError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!(addr = %addr, "API server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WargaError::Server(format!("Server error: {}", e)))?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

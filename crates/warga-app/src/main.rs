//! Warga application binary - composition root.
//!
//! 1. Resolve configuration (TOML file, environment, CLI flags)
//! 2. Build the table-store and LLM clients once
//! 3. Wire the context collector and chat orchestrator
//! 4. Serve `POST /chat` until Ctrl+C

mod cli;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use warga_api::{routes, AppState};
use warga_chat::{ChatOrchestrator, ContextCollector, OpenAiCompatClient};
use warga_core::config::WargaConfig;
use warga_storage::PostgrestStore;

use crate::cli::CliArgs;

/// Construct every long-lived collaborator from the resolved configuration.
fn build_state(config: &WargaConfig) -> warga_core::Result<AppState> {
    config.validate()?;

    let store = PostgrestStore::new(&config.store)?;
    tracing::info!(url = %config.store.url, "Table-store client ready");

    let llm = OpenAiCompatClient::new(&config.llm)?;
    tracing::info!(
        model = %config.llm.model,
        temperature = config.llm.temperature,
        timeout_secs = config.llm.timeout_secs,
        max_retries = config.llm.max_retries,
        "LLM client ready"
    );

    let collector = ContextCollector::new(Arc::new(store))
        .with_cache_ttl(Duration::from_secs(config.context.cache_ttl_secs));
    let orchestrator =
        ChatOrchestrator::new(collector, Arc::new(llm), &config.llm, &config.assistant);

    Ok(AppState::new(
        orchestrator,
        config.server.allowed_origin.clone(),
    ))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config_found = config_file.exists();
    let mut config = if config_found {
        WargaConfig::load(&config_file)?
    } else {
        WargaConfig::default()
    };
    config.apply_env_overrides();
    args.apply_to(&mut config);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Warga Assist v{}", env!("CARGO_PKG_VERSION"));
    if config_found {
        tracing::info!(path = %config_file.display(), "Configuration loaded");
    } else {
        tracing::info!(
            path = %config_file.display(),
            "No configuration file; using defaults and environment"
        );
    }

    let state = match build_state(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };
    tracing::info!(origin = %config.server.allowed_origin, "CORS origin configured");

    routes::start_server(&config.server, state).await?;

    Ok(())
}

//! CLI argument definitions for the Warga assistant server.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use warga_core::config::WargaConfig;

/// Warga Assist: answers residents' questions with live community data.
#[derive(Parser, Debug, Default)]
#[command(name = "warga", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Bind address.
    #[arg(long = "host")]
    pub host: Option<String>,

    /// API server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Frontend origin allowed to call the API.
    #[arg(long = "allowed-origin")]
    pub allowed_origin: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > WARGA_CONFIG env var > ./warga.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("WARGA_CONFIG") {
            return PathBuf::from(p);
        }
        PathBuf::from("warga.toml")
    }

    /// Apply flag overrides on top of an already env-merged config.
    pub fn apply_to(&self, config: &mut WargaConfig) {
        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ref origin) = self.allowed_origin {
            config.server.allowed_origin = origin.clone();
        }
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
    }
}

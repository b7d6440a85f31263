use thiserror::Error;

/// Top-level error type for the Warga assistant.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for WargaError` so that `?` works across crate
/// boundaries in the composition root.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WargaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Table-store error: {0}")]
    Store(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for WargaError {
    fn from(err: toml::de::Error) -> Self {
        WargaError::Config(err.to_string())
    }
}

/// A specialized `Result` type for Warga operations.
pub type Result<T> = std::result::Result<T, WargaError>;

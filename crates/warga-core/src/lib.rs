pub mod config;
pub mod error;

pub use config::WargaConfig;
pub use error::{Result, WargaError};

//! Error types for table-store access.

use warga_core::error::WargaError;

/// Errors from querying the table-store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("table-store returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed row: {0}")]
    MalformedRow(String),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("table-store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for WargaError {
    fn from(err: StoreError) -> Self {
        WargaError::Store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Status {
            status: 401,
            body: "invalid api key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "table-store returned status 401: invalid api key"
        );

        let err = StoreError::MalformedRow("nominal is not a number".to_string());
        assert_eq!(err.to_string(), "malformed row: nominal is not a number");

        let err = StoreError::Unavailable("offline".to_string());
        assert_eq!(err.to_string(), "table-store unavailable: offline");
    }

    #[test]
    fn test_store_error_into_warga_error() {
        let err: WargaError = StoreError::InvalidHeader("bad key".to_string()).into();
        assert!(matches!(err, WargaError::Store(_)));
        assert!(err.to_string().contains("bad key"));
    }
}

//! API error types and JSON error response formatting.
//!
//! Maps LLM failures to HTTP status codes. Error bodies never carry a
//! `reply` field.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use warga_chat::LlmError;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g., "upstream_timeout").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// 500 Internal Server Error - unexpected server error.
    Internal(String),
    /// 502 Bad Gateway - the LLM provider failed or answered nonsense.
    BadGateway(String),
    /// 503 Service Unavailable - the LLM provider is throttling us.
    ServiceUnavailable(String),
    /// 504 Gateway Timeout - the LLM provider did not answer in time.
    GatewayTimeout(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_code, message) = match self {
            ApiError::Internal(msg) => ("internal_error", msg),
            ApiError::BadGateway(msg) => ("bad_gateway", msg),
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg),
            ApiError::GatewayTimeout(msg) => ("upstream_timeout", msg),
        };

        let body = ErrorBody {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        let message = err.to_string();
        match err {
            LlmError::Timeout(_) => ApiError::GatewayTimeout(message),
            LlmError::RateLimited { .. } => ApiError::ServiceUnavailable(message),
            LlmError::AuthFailure { .. }
            | LlmError::Provider { .. }
            | LlmError::InvalidResponse(_) => ApiError::BadGateway(message),
            LlmError::MissingApiKey | LlmError::InvalidApiKey(_) => ApiError::Internal(message),
        }
    }
}

/*
[INPUT]:  Error sources (validation, exchange rejections, transport, decoding)
[OUTPUT]: Classified order errors with context
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ApiErrorResponse;

/// Main error type for order submission
#[derive(Error, Debug)]
pub enum OrderError {
    /// Request failed local validation; nothing was sent
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Exchange answered with an error code
    #[error("Exchange rejected order (code {code}): {message}")]
    ExchangeRejected { code: i64, message: String },

    /// Transport-level failure (timeout, connection, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Exchange answered 2xx with a body we could not decode
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client could not be constructed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OrderError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        OrderError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Classify a non-2xx response.
    ///
    /// The exchange normally answers with `{"code": <negative>, "msg": "..."}`;
    /// anything else (proxy pages, empty bodies) is reported with the HTTP
    /// status as the code and the raw body as the message.
    pub fn from_rejection(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorResponse>(body) {
            Ok(api) => OrderError::ExchangeRejected {
                code: api.code,
                message: api.msg,
            },
            Err(_) => OrderError::ExchangeRejected {
                code: i64::from(status.as_u16()),
                message: body.trim().to_string(),
            },
        }
    }

    /// Field name for validation failures
    pub fn field(&self) -> Option<&'static str> {
        match self {
            OrderError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Short classification label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::Validation { .. } => "validation",
            OrderError::ExchangeRejected { .. } => "exchange_rejected",
            OrderError::Network(_) => "network",
            OrderError::InvalidResponse(_) => "invalid_response",
            OrderError::Config(_) => "config",
        }
    }
}

impl From<reqwest::Error> for OrderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OrderError::Network(format!("request timed out: {err}"))
        } else if err.is_connect() {
            OrderError::Network(format!("connection failed: {err}"))
        } else {
            OrderError::Network(format!("HTTP transport error: {err}"))
        }
    }
}

/// Result type alias for order operations
pub type Result<T> = std::result::Result<T, OrderError>;

//! Service Layer Error Types
//!
//! Errors raised by the REST service wrappers. The registry controller
//! reports these to the operator and swallows them, so the variants carry
//! enough context for logs rather than for programmatic recovery.

use crate::models::ValidationError;
use thiserror::Error;

/// Service operation errors
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Transport-level failure (connect, timeout, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape
    #[error("Failed to decode {context}: {message}")]
    Decode { context: String, message: String },

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The payload or fetched data failed local validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The client could not be configured
    #[error("Client configuration error: {0}")]
    Config(String),
}

impl ServiceError {
    /// Create a status error
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the API reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

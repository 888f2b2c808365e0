//! # Payment Error Types
//!
//! Typed error handling for the razorpay relay.
//! All payment operations return `Result<T, PaymentError>`.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Amount missing, non-numeric, zero or negative.
    /// Carries the raw value so it can be echoed back to the caller.
    #[error("Valid amount is required")]
    InvalidAmount { received: Value },

    /// A required request field was absent or empty
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payment provider rejected the call or could not be reached
    #[error("Provider error [{provider}]: {description}")]
    ProviderError {
        provider: String,
        description: String,
        code: Option<String>,
    },

    /// Provider did not answer within the configured timeout
    #[error("Provider {provider} timed out after {after:?}")]
    ProviderTimeout { provider: String, after: Duration },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Provider error without a structured code
    pub fn provider(provider: impl Into<String>, description: impl Into<String>) -> Self {
        PaymentError::ProviderError {
            provider: provider.into(),
            description: description.into(),
            code: None,
        }
    }

    /// Returns true if the caller supplied bad input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PaymentError::InvalidAmount { .. }
                | PaymentError::MissingField(_)
                | PaymentError::InvalidRequest(_)
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::InvalidAmount { .. } => 400,
            PaymentError::MissingField(_) => 400,
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::ProviderError { .. } => 500,
            PaymentError::ProviderTimeout { .. } => 504,
            PaymentError::Serialization(_) => 500,
        }
    }

    /// Human-readable detail suitable for the `details` field of an error body
    pub fn details(&self) -> String {
        match self {
            PaymentError::ProviderError { description, .. } => description.clone(),
            other => other.to_string(),
        }
    }

    /// Provider-supplied error code, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            PaymentError::ProviderError { code, .. } => code.as_deref(),
            PaymentError::ProviderTimeout { .. } => Some("TIMEOUT"),
            _ => None,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

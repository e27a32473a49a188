//! Remote API error types

use thiserror::Error;

/// Errors raised while talking to the raffle API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape
    #[error("Unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    /// No token is configured; every endpoint requires one
    #[error("Not authenticated: no API token configured (set `token` in the config file or RAFFLE_TOKEN)")]
    NotAuthenticated,

    /// The base URL could not be combined with an endpoint path
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Status code for `Status` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl crate::core::error_handling::ContextualError for ApiError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ApiError::NotAuthenticated | ApiError::InvalidUrl(_))
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ApiError::NotAuthenticated => {
                Some("Not authenticated: configure an API token (config `token` or RAFFLE_TOKEN)")
            }
            ApiError::InvalidUrl(message) => Some(message),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

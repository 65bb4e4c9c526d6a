//! Error types for Twitter API operations
//!
//! Errors are categorized so callers can log them meaningfully. The purge pass
//! never retries, so there is no retry classification here.

use thiserror::Error;

/// Errors that can occur when talking to the Twitter API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TwitterError {
    /// Network-related errors (connection issues, DNS failures)
    #[error("Network error: {message}")]
    Network {
        /// Error message
        message: String,
    },

    /// Authentication errors (bad credentials, revoked token)
    #[error("Authentication error: {message}")]
    Auth {
        /// Error message
        message: String,
    },

    /// Rate limit reached; the pass does not back off
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        /// Error message
        message: String,
    },

    /// Invalid request errors (unknown status id, bad parameters)
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error message
        message: String,
    },

    /// Request took longer than the client timeout
    #[error("Request timeout after {seconds} seconds")]
    Timeout {
        /// Timeout duration in seconds
        seconds: u64,
    },

    /// Any other non-success answer from the API
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or error message
        message: String,
    },

    /// Response body could not be decoded
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message
        message: String,
    },

    /// A `created_at` value that is not in Twitter's date format
    #[error("Could not parse time {value:?}: {message}")]
    Timestamp {
        /// The raw timestamp
        value: String,
        /// Parser error
        message: String,
    },

    /// Client could not be configured
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },
}

impl TwitterError {
    /// Returns true if this error indicates an authentication problem
    pub fn is_auth_error(&self) -> bool {
        matches!(self, TwitterError::Auth { .. })
    }

    /// Returns true if this error indicates a rate limit
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, TwitterError::RateLimit { .. })
    }

    /// Creates a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates an authentication error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Creates a rate limit error
    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::RateLimit {
            message: message.into(),
        }
    }

    /// Creates an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a timeout error
    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// Creates a generic API error for an unexpected status
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates a timestamp parse error
    pub fn timestamp(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Timestamp {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Creates a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for TwitterError {
    fn from(err: serde_json::Error) -> Self {
        TwitterError::serialization(err.to_string())
    }
}

impl From<reqwest::Error> for TwitterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TwitterError::timeout(crate::twitter::client::REQUEST_TIMEOUT_SECS)
        } else if err.is_connect() {
            TwitterError::network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            TwitterError::serialization(format!("Failed to decode response: {}", err))
        } else {
            TwitterError::network(format!("Request failed: {}", err))
        }
    }
}

//! Error types for the x-follower-analyzer application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // API errors
    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    // Export errors
    #[error("Failed to write output: {0}")]
    OutputWrite(String),

    #[error("Chart rendering error: {0}")]
    Chart(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error is worth retrying after a backoff.
    ///
    /// Authentication failures and missing resources never recover by
    /// retrying; rate limits and transport errors usually do.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RateLimited(_) | Error::Network(_))
    }

    /// Whether the error must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Authentication(_))
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const EXPORT_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_and_network_are_retryable() {
        assert!(Error::RateLimited(60).is_retryable());
        assert!(Error::Network("connection reset".into()).is_retryable());
        assert!(!Error::NotFound("user 42".into()).is_retryable());
        assert!(!Error::Authentication("bad token".into()).is_retryable());
    }

    #[test]
    fn only_authentication_is_fatal() {
        assert!(Error::Authentication("expired".into()).is_fatal());
        assert!(!Error::RateLimited(10).is_fatal());
        assert!(!Error::Api("oops".into()).is_fatal());
    }
}

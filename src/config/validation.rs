//! Configuration validation logic.

use regex::Regex;

use crate::config::loader::{AnalysisOptions, Credentials};
use crate::error::{Error, Result};

/// Minimum length for a plausible bearer token.
const MIN_TOKEN_LENGTH: usize = 20;

/// Maximum handle length on the platform.
const MAX_USERNAME_LENGTH: usize = 15;

/// Validate the run options and credentials together.
pub fn validate_options(options: &AnalysisOptions, credentials: &Credentials) -> Result<()> {
    validate_username(&options.target_username)?;
    validate_limits(options)?;
    validate_token(&credentials.bearer_token)?;

    Ok(())
}

/// Validate and normalize a target username; returns it without a leading `@`.
pub fn clean_username(username: &str) -> Result<String> {
    let clean = username.trim().trim_start_matches('@');

    if clean.is_empty() {
        return Err(Error::ConfigValidation {
            field: "username".to_string(),
            message: "Target username cannot be empty".to_string(),
        });
    }

    Ok(clean.to_string())
}

/// Validate a normalized username.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(Error::MissingConfig("target username".to_string()));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(Error::ConfigValidation {
            field: "username".to_string(),
            message: format!(
                "Username '{}' is too long (maximum {} characters)",
                username, MAX_USERNAME_LENGTH
            ),
        });
    }

    // Handle pattern: 1-15 chars, alphanumeric and underscores
    let username_pattern = Regex::new(r"^[A-Za-z0-9_]{1,15}$").unwrap();
    if !username_pattern.is_match(username) {
        return Err(Error::ConfigValidation {
            field: "username".to_string(),
            message: format!(
                "Username '{}' contains invalid characters. Only alphanumeric and underscores allowed.",
                username
            ),
        });
    }

    Ok(())
}

/// Validate the numeric limits.
pub fn validate_limits(options: &AnalysisOptions) -> Result<()> {
    if options.max_followers == 0 {
        return Err(Error::ConfigValidation {
            field: "max_followers".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }

    if options.rate_limit_delay < 0.0 || !options.rate_limit_delay.is_finite() {
        return Err(Error::ConfigValidation {
            field: "rate_limit_delay".to_string(),
            message: format!(
                "Must be a non-negative number of seconds (got {})",
                options.rate_limit_delay
            ),
        });
    }

    Ok(())
}

/// Validate the bearer token.
pub fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(Error::MissingConfig("bearer token".to_string()));
    }

    if token.len() < MIN_TOKEN_LENGTH {
        return Err(Error::ConfigValidation {
            field: "bearer_token".to_string(),
            message: format!(
                "Token must be at least {} characters (got {})",
                MIN_TOKEN_LENGTH,
                token.len()
            ),
        });
    }

    // Check for placeholder values
    let token_lower = token.to_lowercase();
    if token_lower.contains("replaceme") || token_lower.contains("your_token") {
        return Err(Error::ConfigValidation {
            field: "bearer_token".to_string(),
            message: "Token appears to be a placeholder. Please provide your actual bearer token."
                .to_string(),
        });
    }

    Ok(())
}

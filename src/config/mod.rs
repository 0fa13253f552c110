//! Configuration module.
//!
//! This module handles:
//! - Loading API credentials from `.env` files and the environment
//! - Run options assembled from CLI arguments
//! - Configuration validation

pub mod formats;
pub mod loader;
pub mod validation;

pub use formats::OutputFormat;
pub use loader::{AnalysisOptions, Credentials, ENV_BEARER_TOKEN};
pub use validation::{clean_username, validate_options};

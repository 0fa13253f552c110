//! Configuration structures and environment loading.

use std::path::{Path, PathBuf};

use crate::config::formats::OutputFormat;
use crate::error::{Error, Result};

/// Environment variable holding the required bearer token.
pub const ENV_BEARER_TOKEN: &str = "X_BEARER_TOKEN";

/// X API credentials, loaded from a `.env`-style file and the environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// OAuth 2.0 bearer token (required, app-only auth).
    pub bearer_token: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub access_token: Option<String>,
    pub access_token_secret: Option<String>,
}

impl Credentials {
    /// Load credentials from the environment, optionally sourcing a
    /// `.env` file first. A missing file is not an error when no explicit
    /// path was given; the variables may already be exported.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| {
                    Error::Config(format!("Failed to load {}: {}", path.display(), e))
                })?;
            }
            None => {
                // Default lookup: ./.env, ignored when absent.
                let _ = dotenvy::dotenv();
            }
        }

        Self::from_env()
    }

    /// Build credentials from already-populated environment variables.
    pub fn from_env() -> Result<Self> {
        let bearer_token = std::env::var(ENV_BEARER_TOKEN).map_err(|_| {
            Error::MissingConfig(format!(
                "{} (set it in your .env file or environment)",
                ENV_BEARER_TOKEN
            ))
        })?;

        Ok(Self {
            bearer_token,
            api_key: std::env::var("X_API_KEY").ok(),
            api_secret: std::env::var("X_API_SECRET").ok(),
            access_token: std::env::var("X_ACCESS_TOKEN").ok(),
            access_token_secret: std::env::var("X_ACCESS_TOKEN_SECRET").ok(),
        })
    }
}

/// Options controlling a single analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Target account handle, without the leading `@`.
    pub target_username: String,

    /// Maximum number of followers to collect.
    pub max_followers: usize,

    /// Maximum recent posts fetched per follower (0 disables the fetch).
    pub max_posts_per_user: usize,

    /// Maximum liked posts fetched per follower (0 disables the fetch).
    pub max_likes_per_user: usize,

    pub output_format: OutputFormat,

    /// Output path; derived from the target username when not set.
    pub output_file: Option<PathBuf>,

    /// Whether reposts count toward the per-follower post list.
    pub include_reposts: bool,

    /// Minimum delay between consecutive API calls, in seconds.
    pub rate_limit_delay: f64,

    /// Retry attempts for rate-limited or transient network failures.
    pub rate_limit_retries: u32,

    /// Backoff used when the API reports a rate limit without a
    /// retry-after duration, in seconds.
    pub backoff_seconds: u64,

    /// Also write an HTML dashboard next to a csv/json primary output.
    pub generate_dashboard: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            target_username: String::new(),
            max_followers: 1000,
            max_posts_per_user: 10,
            max_likes_per_user: 20,
            output_format: OutputFormat::default(),
            output_file: None,
            include_reposts: true,
            rate_limit_delay: 1.0,
            rate_limit_retries: 2,
            backoff_seconds: 60,
            generate_dashboard: false,
        }
    }
}

impl AnalysisOptions {
    /// Effective output path: the configured file, or
    /// `{target}_followers_analysis.{ext}` in the working directory.
    pub fn output_path(&self) -> PathBuf {
        self.output_file.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}_followers_analysis.{}",
                self.target_username,
                self.output_format.extension()
            ))
        })
    }

    /// Path for the standalone dashboard written by `--generate-dashboard`,
    /// placed next to the primary output.
    pub fn dashboard_path(&self) -> PathBuf {
        let name = format!("{}_dashboard.html", self.target_username);
        match self.output_path().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
            _ => PathBuf::from(name),
        }
    }
}

//! X Follower Analyzer
//!
//! This library collects an X (Twitter) account's followers through the
//! v2 API, gathers each follower's profile, recent posts, and liked
//! posts, and exports the aggregated dataset.
//!
//! # Features
//!
//! - Cursor-based follower pagination with configurable caps
//! - Per-follower post and like collection
//! - Rate limiting with bounded retry and backoff
//! - CSV, JSON, and HTML dashboard export
//! - Deterministic testing via an in-memory API fixture
//!
//! # Example
//!
//! ```no_run
//! use x_follower_analyzer::{
//!     api::XApiClient,
//!     collect::FollowerCollector,
//!     config::AnalysisOptions,
//!     export::export_result,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = AnalysisOptions {
//!         target_username: "jack".to_string(),
//!         max_followers: 100,
//!         ..Default::default()
//!     };
//!     let api = XApiClient::new(std::env::var("X_BEARER_TOKEN")?)?;
//!
//!     let (result, _state) = FollowerCollector::new(&api, &options).run().await?;
//!     export_result(&result, &options)?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod output;
pub mod viz;

// Re-exports for convenience
pub use api::{FixtureApi, PlatformApi, RateLimiter, XApiClient};
pub use collect::{CollectState, FollowerCollector};
pub use config::{AnalysisOptions, Credentials, OutputFormat};
pub use error::{Error, Result};
pub use model::{AnalysisResult, FollowerAnalysis, LikedPost, Post, UserProfile};

//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{AnalysisOptions, OutputFormat};

/// X follower analyzer CLI.
#[derive(Parser, Debug)]
#[command(
    name = "x-follower-analyzer",
    version,
    about = "Analyze an X account's followers, their posts, and their likes",
    long_about = "Fetches an X (Twitter) account's followers through the v2 API, collects\n\
                  each follower's profile, recent posts, and liked posts, and exports the\n\
                  dataset as CSV, JSON, or an HTML dashboard."
)]
pub struct Args {
    /// Target X username (with or without leading @).
    pub username: String,

    /// Maximum number of followers to analyze.
    #[arg(long, default_value_t = 1000)]
    pub max_followers: usize,

    /// Maximum recent posts collected per follower.
    #[arg(long, alias = "max-tweets", default_value_t = 10)]
    pub max_posts: usize,

    /// Maximum liked posts collected per follower.
    #[arg(long, default_value_t = 20)]
    pub max_likes: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormatArg::Csv)]
    pub output_format: OutputFormatArg,

    /// Output file path (default: derived from the target username).
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Exclude reposts from collected posts.
    #[arg(long)]
    pub no_reposts: bool,

    /// Delay between API calls in seconds.
    #[arg(long, default_value_t = 1.0)]
    pub rate_limit_delay: f64,

    /// Retry attempts for rate-limited or transient failures.
    #[arg(long, default_value_t = 2)]
    pub rate_limit_retries: u32,

    /// Path to a .env file with API credentials (default: ./.env).
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Also write an HTML dashboard alongside the primary output.
    #[arg(long)]
    pub generate_dashboard: bool,

    /// Show the resolved configuration and exit without any API calls.
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI output format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// One flattened row per follower.
    Csv,
    /// Nested per-follower documents.
    Json,
    /// Interactive HTML dashboard.
    Html,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Html => OutputFormat::Html,
        }
    }
}

impl Args {
    /// Merge CLI arguments into run options. The username must already
    /// be normalized by the caller.
    pub fn merge_into_options(&self, options: &mut AnalysisOptions) {
        options.max_followers = self.max_followers;
        options.max_posts_per_user = self.max_posts;
        options.max_likes_per_user = self.max_likes;
        options.output_format = self.output_format.into();
        options.rate_limit_delay = self.rate_limit_delay;
        options.rate_limit_retries = self.rate_limit_retries;
        options.generate_dashboard = self.generate_dashboard;

        if let Some(path) = &self.output_file {
            options.output_file = Some(path.clone());
        }

        if self.no_reposts {
            options.include_reposts = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_match_documented_values() {
        let args = Args::parse_from(["x-follower-analyzer", "jack"]);
        assert_eq!(args.username, "jack");
        assert_eq!(args.max_followers, 1000);
        assert_eq!(args.max_posts, 10);
        assert_eq!(args.max_likes, 20);
        assert_eq!(args.output_format, OutputFormatArg::Csv);
        assert!(!args.dry_run);
    }

    #[test]
    fn max_tweets_alias_accepted() {
        let args = Args::parse_from(["x-follower-analyzer", "jack", "--max-tweets", "5"]);
        assert_eq!(args.max_posts, 5);
    }

    #[test]
    fn merge_overrides_options() {
        let args = Args::parse_from([
            "x-follower-analyzer",
            "jack",
            "--max-followers",
            "50",
            "--output-format",
            "json",
            "--no-reposts",
        ]);
        let mut options = AnalysisOptions::default();
        args.merge_into_options(&mut options);

        assert_eq!(options.max_followers, 50);
        assert_eq!(options.output_format, OutputFormat::Json);
        assert!(!options.include_reposts);
    }
}

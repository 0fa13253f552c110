//! X Follower Analyzer - CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use x_follower_analyzer::{
    api::{PlatformApi, XApiClient},
    cli::Args,
    collect::FollowerCollector,
    config::{clean_username, validate_options, AnalysisOptions, Credentials},
    error::{exit_codes, Error, Result},
    export::export_result,
    output::{
        print_banner, print_config_summary, print_error, print_info, print_run_summary,
        print_success,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::MissingConfig(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Authentication(_)
                | Error::Api(_)
                | Error::AccountNotFound(_)
                | Error::RateLimited(_)
                | Error::NotFound(_)
                | Error::Network(_)
                | Error::Http(_) => ExitCode::from(exit_codes::API_ERROR as u8),
                Error::OutputWrite(_) | Error::Chart(_) | Error::Csv(_) | Error::Json(_) => {
                    ExitCode::from(exit_codes::EXPORT_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    print_banner();

    // Load credentials from .env / environment
    let credentials = Credentials::load(args.env_file.as_deref())?;
    print_info("API credentials loaded");

    // Build run options from CLI arguments
    let mut options = AnalysisOptions {
        target_username: clean_username(&args.username)?,
        ..Default::default()
    };
    args.merge_into_options(&mut options);

    // Validate configuration
    validate_options(&options, &credentials)?;

    // Print configuration summary
    print_config_summary(
        &options.target_username,
        options.max_followers,
        options.max_posts_per_user,
        options.max_likes_per_user,
        &options.output_format.to_string(),
        &options.output_path().display().to_string(),
        options.rate_limit_delay,
    );

    let api = XApiClient::new(credentials.bearer_token.clone())?;
    let written = run_analysis(&api, &options, args.dry_run).await?;

    for path in &written {
        print_success(&format!("Wrote {}", path.display()));
    }

    Ok(())
}

/// Collect and export against any `PlatformApi`. A dry run stops before
/// the first API call and writes nothing.
async fn run_analysis(
    api: &dyn PlatformApi,
    options: &AnalysisOptions,
    dry_run: bool,
) -> Result<Vec<PathBuf>> {
    if dry_run {
        print_info("Dry run - exiting without collecting any data");
        return Ok(Vec::new());
    }

    print_info("Connecting to the X API...");
    let (result, state) = FollowerCollector::new(api, options).run().await?;

    if result.followers.is_empty() {
        print_info("No follower data collected");
    }

    let written = export_result(&result, options)?;

    // Run summary, including any warnings for skipped data
    print_run_summary(&state);

    Ok(written)
}

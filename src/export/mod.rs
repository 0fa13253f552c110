//! Exporters: serialize an [`AnalysisResult`] to the requested format.

pub mod csv;
pub mod json;

use std::path::PathBuf;

use crate::config::{AnalysisOptions, OutputFormat};
use crate::error::Result;
use crate::model::AnalysisResult;
use crate::viz::dashboard::write_dashboard;

pub use self::csv::write_csv;
pub use self::json::{read_json, write_json, JsonDocument};

/// Export the result to the configured format, plus the standalone
/// dashboard when requested. Returns the paths written.
pub fn export_result(result: &AnalysisResult, options: &AnalysisOptions) -> Result<Vec<PathBuf>> {
    let primary = options.output_path();
    let mut written = Vec::new();

    match options.output_format {
        OutputFormat::Csv => write_csv(result, &primary)?,
        OutputFormat::Json => write_json(result, &primary)?,
        OutputFormat::Html => write_dashboard(result, &primary)?,
    }
    written.push(primary);

    // An HTML primary output already is the dashboard.
    if options.generate_dashboard && options.output_format != OutputFormat::Html {
        let dashboard = options.dashboard_path();
        write_dashboard(result, &dashboard)?;
        written.push(dashboard);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserProfile;
    use tempfile::tempdir;

    fn empty_result() -> AnalysisResult {
        AnalysisResult::new(UserProfile {
            user_id: "100".into(),
            username: "target".into(),
            display_name: "Target".into(),
            description: None,
            followers_count: 0,
            following_count: 0,
            posts_count: 0,
            location: None,
            profile_image_url: None,
            verified: false,
            created_at: None,
            url: None,
        })
    }

    #[test]
    fn csv_primary_with_dashboard_writes_two_files() {
        let dir = tempdir().unwrap();
        let options = AnalysisOptions {
            target_username: "target".into(),
            output_file: Some(dir.path().join("out.csv")),
            generate_dashboard: true,
            ..Default::default()
        };

        let written = export_result(&empty_result(), &options).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[0].exists());
        // Dashboard lands next to the primary output.
        assert_eq!(written[1], dir.path().join("target_dashboard.html"));
        assert!(written[1].exists());
    }

    #[test]
    fn html_format_does_not_duplicate_dashboard() {
        let dir = tempdir().unwrap();
        let options = AnalysisOptions {
            target_username: "target".into(),
            output_format: OutputFormat::Html,
            output_file: Some(dir.path().join("out.html")),
            generate_dashboard: true,
            ..Default::default()
        };

        let written = export_result(&empty_result(), &options).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].exists());
    }
}

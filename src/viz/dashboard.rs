//! Self-contained HTML dashboard assembly.
//!
//! Charts are rendered to SVG and embedded inline so the page has no
//! external assets.

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::AnalysisResult;
use crate::viz::charts::{
    activity_timeline_chart, engagement_scatter_chart, follower_distribution_chart, hashtag_chart,
    location_chart, verification_pie_chart,
};
use crate::viz::summary::SummaryStats;

/// Render the dashboard and write it to `path`.
pub fn write_dashboard(result: &AnalysisResult, path: &Path) -> Result<()> {
    let html = render_dashboard(result)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::OutputWrite(format!("{}: {}", parent.display(), e)))?;
        }
    }

    std::fs::write(path, html)
        .map_err(|e| Error::OutputWrite(format!("{}: {}", path.display(), e)))?;

    tracing::info!("Dashboard written to {}", path.display());
    Ok(())
}

/// Build the full HTML page.
pub fn render_dashboard(result: &AnalysisResult) -> Result<String> {
    let stats = SummaryStats::compute(result);

    let follower_dist = follower_distribution_chart(&stats)?;
    let verification = verification_pie_chart(&stats)?;
    let locations = location_chart(&stats)?;
    let hashtags = hashtag_chart(&stats)?;
    let activity = activity_timeline_chart(&stats)?;
    let engagement = engagement_scatter_chart(&stats)?;

    let warnings_section = if result.warnings.is_empty() {
        String::new()
    } else {
        let items: String = result
            .warnings
            .iter()
            .map(|w| {
                format!(
                    "<li><strong>@{}</strong>: {}</li>\n",
                    escape(&w.subject),
                    escape(&w.message)
                )
            })
            .collect();
        format!(
            r#"<section class="warnings">
<h2>Warnings ({})</h2>
<ul>
{}</ul>
</section>"#,
            result.warnings.len(),
            items
        )
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Follower Analysis: @{target}</title>
<style>
  body {{ font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; margin: 0; background: #f5f8fa; color: #14171a; }}
  header {{ background: #1da1f2; color: #fff; padding: 24px 32px; }}
  header h1 {{ margin: 0; font-size: 24px; }}
  header p {{ margin: 4px 0 0; opacity: 0.9; }}
  .cards {{ display: flex; flex-wrap: wrap; gap: 16px; padding: 24px 32px; }}
  .card {{ background: #fff; border-radius: 8px; padding: 16px 24px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); min-width: 140px; }}
  .card .value {{ font-size: 28px; font-weight: 700; color: #1da1f2; }}
  .card .label {{ font-size: 13px; color: #657786; }}
  .charts {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(480px, 1fr)); gap: 24px; padding: 0 32px 32px; }}
  .chart {{ background: #fff; border-radius: 8px; padding: 12px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }}
  .chart svg {{ max-width: 100%; height: auto; }}
  .warnings {{ padding: 0 32px 32px; }}
  .warnings ul {{ background: #fff8e1; border-radius: 8px; padding: 16px 32px; }}
  footer {{ padding: 16px 32px; color: #657786; font-size: 13px; }}
</style>
</head>
<body>
<header>
  <h1>Follower Analysis: @{target}</h1>
  <p>Collected {collected_at}</p>
</header>
<div class="cards">
  <div class="card"><div class="value">{total_followers}</div><div class="label">Followers analyzed</div></div>
  <div class="card"><div class="value">{total_posts}</div><div class="label">Posts collected</div></div>
  <div class="card"><div class="value">{total_likes}</div><div class="label">Likes collected</div></div>
  <div class="card"><div class="value">{verified_rate:.1}%</div><div class="label">Verified accounts</div></div>
  <div class="card"><div class="value">{mean_followers:.0}</div><div class="label">Mean follower count</div></div>
  <div class="card"><div class="value">{median_followers:.0}</div><div class="label">Median follower count</div></div>
</div>
<div class="charts">
  <div class="chart">{follower_dist}</div>
  <div class="chart">{verification}</div>
  <div class="chart">{locations}</div>
  <div class="chart">{hashtags}</div>
  <div class="chart">{activity}</div>
  <div class="chart">{engagement}</div>
</div>
{warnings_section}
<footer>Generated by x-follower-analyzer</footer>
</body>
</html>
"#,
        target = escape(&result.target.username),
        collected_at = result.collected_at.format("%Y-%m-%d %H:%M UTC"),
        total_followers = stats.total_followers,
        total_posts = stats.total_posts,
        total_likes = stats.total_likes,
        verified_rate = stats.verified_rate * 100.0,
        mean_followers = stats.mean_follower_count,
        median_followers = stats.median_follower_count,
        follower_dist = follower_dist,
        verification = verification,
        locations = locations,
        hashtags = hashtags,
        activity = activity,
        engagement = engagement,
        warnings_section = warnings_section,
    ))
}

/// Minimal HTML escaping for user-controlled text.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

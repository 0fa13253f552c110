//! Chart rendering with plotters' SVG backend.
//!
//! Each chart renders into an SVG string that the dashboard embeds
//! inline. The chart type per metric is fixed: histogram for follower
//! counts, pie for verification, bars for locations and hashtags,
//! scatter for engagement.

use plotters::element::Pie;
use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::viz::summary::SummaryStats;

/// Canvas size for every chart.
const CHART_SIZE: (u32, u32) = (640, 420);

fn chart_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Chart(e.to_string())
}

/// Render a placeholder when a chart has nothing to show.
fn no_data_svg(title: &str) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;
        root.draw(&Text::new(
            title.to_string(),
            (20, 20),
            ("sans-serif", 18).into_font().color(&BLACK),
        ))
        .map_err(chart_err)?;
        root.draw(&Text::new(
            "No data available",
            (
                CHART_SIZE.0 as i32 / 2 - 70,
                CHART_SIZE.1 as i32 / 2,
            ),
            ("sans-serif", 16).into_font().color(&RGBColor(120, 120, 120)),
        ))
        .map_err(chart_err)?;
        root.present().map_err(chart_err)?;
    }
    Ok(svg)
}

/// Vertical bar chart over labeled categories.
fn bar_chart(title: &str, y_desc: &str, data: &[(String, u64)]) -> Result<String> {
    if data.iter().all(|(_, count)| *count == 0) {
        return no_data_svg(title);
    }

    let max = data.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1) as i64;
    let labels: Vec<&str> = data.iter().map(|(label, _)| label.as_str()).collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(60)
            .y_label_area_size(50)
            .build_cartesian_2d(0i64..data.len() as i64, 0i64..max + max / 10 + 1)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(data.len())
            .x_label_formatter(&|idx| {
                labels
                    .get(*idx as usize)
                    .map(|s| s.to_string())
                    .unwrap_or_default()
            })
            .y_desc(y_desc)
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(data.iter().enumerate().map(|(i, (_, count))| {
                Rectangle::new(
                    [(i as i64, 0), (i as i64 + 1, *count as i64)],
                    RGBColor(29, 161, 242).mix(0.8).filled(),
                )
            }))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }
    Ok(svg)
}

/// Horizontal bar chart over labeled categories, largest on top.
fn horizontal_bar_chart(title: &str, x_desc: &str, data: &[(String, u64)]) -> Result<String> {
    if data.is_empty() {
        return no_data_svg(title);
    }

    let max = data.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1) as i64;
    // Reverse so the largest category renders at the top.
    let rows: Vec<(&str, u64)> = data
        .iter()
        .rev()
        .map(|(label, count)| (label.as_str(), *count))
        .collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(120)
            .build_cartesian_2d(0i64..max + max / 10 + 1, 0i64..rows.len() as i64)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(rows.len())
            .y_label_formatter(&|idx| {
                rows.get(*idx as usize)
                    .map(|(label, _)| label.to_string())
                    .unwrap_or_default()
            })
            .x_desc(x_desc)
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(rows.iter().enumerate().map(|(i, (_, count))| {
                Rectangle::new(
                    [(0, i as i64), (*count as i64, i as i64 + 1)],
                    RGBColor(101, 119, 134).mix(0.8).filled(),
                )
            }))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }
    Ok(svg)
}

/// Follower-count distribution over the summary's histogram buckets.
pub fn follower_distribution_chart(stats: &SummaryStats) -> Result<String> {
    bar_chart(
        "Follower Count Distribution",
        "Followers in bucket",
        &stats.follower_buckets,
    )
}

/// Verified vs. non-verified accounts.
pub fn verification_pie_chart(stats: &SummaryStats) -> Result<String> {
    if stats.total_followers == 0 {
        return no_data_svg("Account Verification");
    }

    let verified = stats.verified_count as f64;
    let unverified = (stats.total_followers - stats.verified_count) as f64;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;
        root.draw(&Text::new(
            "Account Verification",
            (20, 20),
            ("sans-serif", 20).into_font().color(&BLACK),
        ))
        .map_err(chart_err)?;

        let center = (CHART_SIZE.0 as i32 / 2, CHART_SIZE.1 as i32 / 2 + 10);
        let radius = 140.0;
        let sizes = vec![verified, unverified];
        let colors = vec![RGBColor(29, 161, 242), RGBColor(101, 119, 134)];
        let labels = vec!["Verified", "Not verified"];

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 16).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 14).into_font().color(&WHITE));

        root.draw(&pie).map_err(chart_err)?;
        root.present().map_err(chart_err)?;
    }
    Ok(svg)
}

/// Top follower locations.
pub fn location_chart(stats: &SummaryStats) -> Result<String> {
    horizontal_bar_chart("Top Follower Locations", "Followers", &stats.top_locations)
}

/// Most frequent hashtags across collected posts.
pub fn hashtag_chart(stats: &SummaryStats) -> Result<String> {
    horizontal_bar_chart("Top Hashtags", "Occurrences", &stats.top_hashtags)
}

/// Posting activity per UTC hour of day. Odd hours keep empty labels so
/// the axis only ticks every two hours.
pub fn activity_timeline_chart(stats: &SummaryStats) -> Result<String> {
    let data: Vec<(String, u64)> = stats
        .posts_by_hour
        .iter()
        .enumerate()
        .map(|(hour, count)| {
            let label = if hour % 2 == 0 {
                hour.to_string()
            } else {
                String::new()
            };
            (label, *count)
        })
        .collect();

    bar_chart("Post Activity by Hour of Day (UTC)", "Posts", &data)
}

/// Follower count vs. mean likes per post, log-ish spread on x.
pub fn engagement_scatter_chart(stats: &SummaryStats) -> Result<String> {
    if stats.engagement_points.is_empty() {
        return no_data_svg("Engagement");
    }

    let x_max = stats
        .engagement_points
        .iter()
        .map(|(x, _)| *x)
        .fold(0.0f64, f64::max)
        .max(1.0);
    let y_max = stats
        .engagement_points
        .iter()
        .map(|(_, y)| *y)
        .fold(0.0f64, f64::max)
        .max(1.0);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Followers vs. Mean Likes", ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0..x_max * 1.1, 0.0..y_max * 1.1)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .x_desc("Follower count")
            .y_desc("Mean likes per post")
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(stats.engagement_points.iter().map(|(x, y)| {
                Circle::new((*x, *y), 4, RGBColor(29, 161, 242).mix(0.7).filled())
            }))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }
    Ok(svg)
}

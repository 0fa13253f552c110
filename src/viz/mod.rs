//! Visualization: summary statistics, SVG charts, and the HTML dashboard.

pub mod charts;
pub mod dashboard;
pub mod summary;

pub use dashboard::{render_dashboard, write_dashboard};
pub use summary::SummaryStats;

//! Collector pipeline: follower paging and per-follower data collection.

pub mod pipeline;
pub mod state;

pub use pipeline::FollowerCollector;
pub use state::CollectState;

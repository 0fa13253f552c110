//! X API layer: wire types, HTTP client, rate limiting, and the trait
//! seam that lets tests swap in fixture data.

pub mod adapter;
pub mod client;
pub mod fixture;
pub mod rate_limit;
pub mod types;

pub use adapter::{FollowerPage, PlatformApi};
pub use client::XApiClient;
pub use fixture::{FixtureApi, ScriptedFailure};
pub use rate_limit::RateLimiter;

//! The platform API seam.
//!
//! The collector pipeline only sees this trait. Production uses
//! [`XApiClient`](crate::api::client::XApiClient); tests use
//! [`FixtureApi`](crate::api::fixture::FixtureApi).

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{LikedPost, Post, UserProfile};

/// One page of followers with the cursor for the next page, if any.
#[derive(Debug, Clone, Default)]
pub struct FollowerPage {
    pub followers: Vec<UserProfile>,
    pub next_cursor: Option<String>,
}

#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Validate credentials by fetching the authenticated user.
    /// Fails with `Error::Authentication` on a bad token.
    async fn verify_credentials(&self) -> Result<UserProfile>;

    /// Look up a profile by handle (without `@`).
    async fn get_user_by_username(&self, username: &str) -> Result<UserProfile>;

    /// Fetch one page of followers. `cursor` is the opaque pagination
    /// token from a previous page; `None` starts from the beginning.
    async fn fetch_followers(
        &self,
        user_id: &str,
        page_size: usize,
        cursor: Option<&str>,
    ) -> Result<FollowerPage>;

    /// Fetch up to `limit` recent posts authored by the user.
    async fn fetch_recent_posts(&self, user_id: &str, limit: usize) -> Result<Vec<Post>>;

    /// Fetch up to `limit` posts the user has liked.
    async fn fetch_liked_posts(&self, user_id: &str, limit: usize) -> Result<Vec<LikedPost>>;
}

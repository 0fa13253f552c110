//! Follower collection pipeline.
//!
//! Pages through the target's followers, then fetches each follower's
//! recent posts and liked posts, one request at a time with the rate
//! limiter between calls. Per-follower failures degrade to warnings;
//! authentication failures abort the run.

use crate::api::client::MAX_PAGE_SIZE;
use crate::api::{PlatformApi, RateLimiter};
use crate::collect::state::CollectState;
use crate::config::AnalysisOptions;
use crate::error::{Error, Result};
use crate::model::{AnalysisResult, FollowerAnalysis, UserProfile};
use crate::output::progress::{create_item_bar, create_spinner};

/// Consecutive empty follower pages tolerated before pagination stops,
/// even when the API keeps returning a next cursor.
const MAX_EMPTY_PAGES: u64 = 3;

/// Orchestrates one collection run against a `PlatformApi`.
pub struct FollowerCollector<'a> {
    api: &'a dyn PlatformApi,
    options: &'a AnalysisOptions,
    limiter: RateLimiter,
}

impl<'a> FollowerCollector<'a> {
    pub fn new(api: &'a dyn PlatformApi, options: &'a AnalysisOptions) -> Self {
        let limiter = RateLimiter::new(
            options.rate_limit_delay,
            options.rate_limit_retries,
            options.backoff_seconds,
        );
        Self {
            api,
            options,
            limiter,
        }
    }

    /// Run the full collection. Fatal errors (authentication, unknown
    /// target) propagate; everything else degrades into warnings on the
    /// returned state.
    pub async fn run(mut self) -> Result<(AnalysisResult, CollectState)> {
        let mut state = CollectState::new(self.options.target_username.clone());
        let api = self.api;

        // Validate credentials before anything else.
        let me = self
            .limiter
            .call_with_retry(|| api.verify_credentials())
            .await?;
        tracing::info!("Authenticated as @{}", me.username);

        let target_username = self.options.target_username.clone();
        let target = self
            .limiter
            .call_with_retry(|| api.get_user_by_username(&target_username))
            .await?;
        tracing::info!(
            "Target @{}: {} followers",
            target.username,
            target.followers_count
        );

        let followers = self.collect_followers(&target, &mut state).await?;

        let mut result = AnalysisResult::new(target);
        let bar = create_item_bar(followers.len() as u64, "Collecting follower data");

        for follower in followers {
            let analysis = self.collect_follower_data(follower, &mut state).await?;
            state.followers_collected += 1;
            state.posts_collected += analysis.recent_posts.len() as u64;
            state.likes_collected += analysis.liked_posts.len() as u64;
            result.followers.push(analysis);
            bar.inc(1);
        }

        bar.finish_and_clear();
        result.warnings = state.warnings.clone();

        Ok((result, state))
    }

    /// Page through followers until the cap is hit or pages run out.
    async fn collect_followers(
        &mut self,
        target: &UserProfile,
        state: &mut CollectState,
    ) -> Result<Vec<UserProfile>> {
        let api = self.api;
        let mut followers: Vec<UserProfile> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut empty_pages = 0u64;
        let spinner = create_spinner("Fetching follower pages");

        while followers.len() < self.options.max_followers {
            let remaining = self.options.max_followers - followers.len();
            let page_size = remaining.min(MAX_PAGE_SIZE);

            let target_id = target.user_id.clone();
            let cursor_ref = cursor.clone();
            let page = match self
                .limiter
                .call_with_retry(|| {
                    api.fetch_followers(&target_id, page_size, cursor_ref.as_deref())
                })
                .await
            {
                Ok(page) => page,
                Err(e) if e.is_fatal() => {
                    spinner.finish_and_clear();
                    return Err(e);
                }
                Err(e) => {
                    // Keep what we have; the run continues with a warning.
                    state.warn(
                        &target.username,
                        format!("Follower page fetch failed, stopping pagination: {}", e),
                    );
                    break;
                }
            };

            state.pages_fetched += 1;
            spinner.set_message(format!("Fetching follower pages ({} collected)", followers.len()));

            if page.followers.is_empty() {
                if page.next_cursor.is_none() {
                    break;
                }
                empty_pages += 1;
                if empty_pages >= MAX_EMPTY_PAGES {
                    state.warn(
                        &target.username,
                        format!(
                            "{} consecutive empty follower pages, stopping pagination",
                            empty_pages
                        ),
                    );
                    break;
                }
            } else {
                empty_pages = 0;
            }

            for follower in page.followers {
                if followers.len() >= self.options.max_followers {
                    break;
                }
                followers.push(follower);
            }

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        spinner.finish_and_clear();
        tracing::info!("Collected {} follower profiles", followers.len());
        Ok(followers)
    }

    /// Fetch one follower's posts and likes. Missing data is recorded as
    /// a warning and leaves the corresponding list empty.
    async fn collect_follower_data(
        &mut self,
        profile: UserProfile,
        state: &mut CollectState,
    ) -> Result<FollowerAnalysis> {
        let api = self.api;
        let mut analysis = FollowerAnalysis::new(profile);
        let user_id = analysis.profile.user_id.clone();
        let username = analysis.profile.username.clone();
        let mut degraded = false;

        if self.options.max_posts_per_user > 0 {
            let limit = self.options.max_posts_per_user;
            match self
                .limiter
                .call_with_retry(|| api.fetch_recent_posts(&user_id, limit))
                .await
            {
                Ok(mut posts) => {
                    if !self.options.include_reposts {
                        posts.retain(|p| !p.is_repost());
                    }
                    posts.truncate(limit);
                    analysis.recent_posts = posts;
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    degraded = true;
                    state.warn(&username, format!("Posts unavailable: {}", e));
                }
            }
        }

        if self.options.max_likes_per_user > 0 {
            let limit = self.options.max_likes_per_user;
            match self
                .limiter
                .call_with_retry(|| api.fetch_liked_posts(&user_id, limit))
                .await
            {
                Ok(likes) => analysis.liked_posts = likes,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    degraded = true;
                    state.warn(&username, format!("Likes unavailable: {}", e));
                }
            }
        }

        if degraded {
            state.followers_degraded += 1;
        }

        Ok(analysis)
    }
}

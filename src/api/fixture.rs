//! In-memory platform API used for deterministic pipeline tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::adapter::{FollowerPage, PlatformApi};
use crate::error::{Error, Result};
use crate::model::{LikedPost, Post, UserProfile};

/// A failure to inject before a fixture endpoint succeeds.
#[derive(Debug, Clone)]
pub enum ScriptedFailure {
    RateLimited(u64),
    Network,
    NotFound,
    Authentication,
}

impl ScriptedFailure {
    fn into_error(self, subject: &str) -> Error {
        match self {
            ScriptedFailure::RateLimited(secs) => Error::RateLimited(secs),
            ScriptedFailure::Network => Error::Network(format!("scripted failure for {}", subject)),
            ScriptedFailure::NotFound => Error::NotFound(subject.to_string()),
            ScriptedFailure::Authentication => {
                Error::Authentication(format!("scripted failure for {}", subject))
            }
        }
    }
}

/// Fake `PlatformApi` backed by fixture data.
///
/// Failures are queued per endpoint key and consumed one per call, so a
/// test can script "rate limited once, then succeed". The call counter
/// lets tests assert how many (or that zero) API calls happened.
#[derive(Default)]
pub struct FixtureApi {
    me: Option<UserProfile>,
    users: HashMap<String, UserProfile>,
    followers: Vec<UserProfile>,
    posts: HashMap<String, Vec<Post>>,
    likes: HashMap<String, Vec<LikedPost>>,
    failures: Mutex<HashMap<String, VecDeque<ScriptedFailure>>>,
    calls: AtomicUsize,
}

impl FixtureApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the authenticated user returned by `verify_credentials`.
    pub fn with_me(mut self, profile: UserProfile) -> Self {
        self.users
            .insert(profile.username.clone(), profile.clone());
        self.me = Some(profile);
        self
    }

    /// Register a user resolvable by handle.
    pub fn with_user(mut self, profile: UserProfile) -> Self {
        self.users.insert(profile.username.clone(), profile);
        self
    }

    /// Append followers returned by `fetch_followers`, in order.
    pub fn with_followers(mut self, followers: Vec<UserProfile>) -> Self {
        self.followers.extend(followers);
        self
    }

    pub fn with_posts(mut self, user_id: &str, posts: Vec<Post>) -> Self {
        self.posts.insert(user_id.to_string(), posts);
        self
    }

    pub fn with_likes(mut self, user_id: &str, likes: Vec<LikedPost>) -> Self {
        self.likes.insert(user_id.to_string(), likes);
        self
    }

    /// Queue a failure for an endpoint key: `verify`, `lookup:{handle}`,
    /// `followers`, `posts:{user_id}`, or `likes:{user_id}`.
    pub fn with_failure(self, key: &str, failure: ScriptedFailure) -> Self {
        self.failures
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push_back(failure);
        self
    }

    /// Total calls made against the fixture.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, key: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut failures = self.failures.lock().unwrap();
        if let Some(queue) = failures.get_mut(key) {
            if let Some(failure) = queue.pop_front() {
                return Err(failure.into_error(key));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PlatformApi for FixtureApi {
    async fn verify_credentials(&self) -> Result<UserProfile> {
        self.check("verify")?;
        self.me
            .clone()
            .ok_or_else(|| Error::Authentication("no authenticated user in fixture".into()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<UserProfile> {
        self.check(&format!("lookup:{}", username))?;
        self.users
            .get(username)
            .cloned()
            .ok_or_else(|| Error::AccountNotFound(username.to_string()))
    }

    async fn fetch_followers(
        &self,
        _user_id: &str,
        page_size: usize,
        cursor: Option<&str>,
    ) -> Result<FollowerPage> {
        self.check("followers")?;

        let start: usize = cursor.map(|c| c.parse().unwrap_or(0)).unwrap_or(0);
        let end = (start + page_size).min(self.followers.len());
        let followers = self.followers[start.min(end)..end].to_vec();

        let next_cursor = if end < self.followers.len() {
            Some(end.to_string())
        } else {
            None
        };

        Ok(FollowerPage {
            followers,
            next_cursor,
        })
    }

    async fn fetch_recent_posts(&self, user_id: &str, limit: usize) -> Result<Vec<Post>> {
        self.check(&format!("posts:{}", user_id))?;
        let mut posts = self.posts.get(user_id).cloned().unwrap_or_default();
        posts.truncate(limit);
        Ok(posts)
    }

    async fn fetch_liked_posts(&self, user_id: &str, limit: usize) -> Result<Vec<LikedPost>> {
        self.check(&format!("likes:{}", user_id))?;
        let mut likes = self.likes.get(user_id).cloned().unwrap_or_default();
        likes.truncate(limit);
        Ok(likes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PostKind;

    fn profile(id: &str, username: &str) -> UserProfile {
        UserProfile {
            user_id: id.into(),
            username: username.into(),
            display_name: username.to_uppercase(),
            description: None,
            followers_count: 0,
            following_count: 0,
            posts_count: 0,
            location: None,
            profile_image_url: None,
            verified: false,
            created_at: None,
            url: None,
        }
    }

    #[tokio::test]
    async fn paginates_followers_with_cursor() {
        let api = FixtureApi::new().with_followers(vec![
            profile("1", "a"),
            profile("2", "b"),
            profile("3", "c"),
        ]);

        let page1 = api.fetch_followers("0", 2, None).await.unwrap();
        assert_eq!(page1.followers.len(), 2);
        let cursor = page1.next_cursor.unwrap();

        let page2 = api.fetch_followers("0", 2, Some(&cursor)).await.unwrap();
        assert_eq!(page2.followers.len(), 1);
        assert!(page2.next_cursor.is_none());
    }

    #[tokio::test]
    async fn scripted_failures_consumed_in_order() {
        let api = FixtureApi::new()
            .with_posts(
                "1",
                vec![Post {
                    post_id: "p1".into(),
                    user_id: "1".into(),
                    text: "hi".into(),
                    created_at: None,
                    repost_count: 0,
                    like_count: 0,
                    reply_count: 0,
                    kind: PostKind::Original,
                    hashtags: vec![],
                    mentions: vec![],
                }],
            )
            .with_failure("posts:1", ScriptedFailure::RateLimited(5));

        assert!(matches!(
            api.fetch_recent_posts("1", 10).await,
            Err(Error::RateLimited(5))
        ));
        // Second call succeeds.
        assert_eq!(api.fetch_recent_posts("1", 10).await.unwrap().len(), 1);
        assert_eq!(api.call_count(), 2);
    }
}

//! Core data model: follower profiles, posts, likes, and the aggregated
//! analysis result consumed by the exporters and the dashboard.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An X user profile as collected for a follower (or the target account).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub posts_count: u64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Classification of a collected post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    Original,
    Reply,
    Repost,
}

impl Default for PostKind {
    fn default() -> Self {
        PostKind::Original
    }
}

/// A post authored by a follower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: String,
    /// Follower that authored the post.
    pub user_id: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub repost_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub kind: PostKind,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub mentions: Vec<String>,
}

impl Post {
    pub fn is_repost(&self) -> bool {
        self.kind == PostKind::Repost
    }

    pub fn engagement(&self) -> u64 {
        self.repost_count + self.like_count + self.reply_count
    }
}

/// A post liked by a follower, with its original author resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedPost {
    pub post_id: String,
    /// Follower that liked the post.
    pub user_id: String,
    pub author_id: String,
    pub author_username: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Complete collected data for a single follower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowerAnalysis {
    pub profile: UserProfile,
    #[serde(default)]
    pub recent_posts: Vec<Post>,
    #[serde(default)]
    pub liked_posts: Vec<LikedPost>,
}

impl FollowerAnalysis {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            recent_posts: Vec::new(),
            liked_posts: Vec::new(),
        }
    }

    /// Mean of a metric over this follower's recent posts, 0.0 when empty.
    fn mean_over_posts(&self, metric: impl Fn(&Post) -> u64) -> f64 {
        if self.recent_posts.is_empty() {
            return 0.0;
        }
        let total: u64 = self.recent_posts.iter().map(metric).sum();
        round2(total as f64 / self.recent_posts.len() as f64)
    }

    pub fn avg_repost_count(&self) -> f64 {
        self.mean_over_posts(|p| p.repost_count)
    }

    pub fn avg_like_count(&self) -> f64 {
        self.mean_over_posts(|p| p.like_count)
    }

    pub fn avg_reply_count(&self) -> f64 {
        self.mean_over_posts(|p| p.reply_count)
    }

    /// Fraction of recent posts that are reposts, 0.0 when empty.
    pub fn repost_ratio(&self) -> f64 {
        if self.recent_posts.is_empty() {
            return 0.0;
        }
        let reposts = self.recent_posts.iter().filter(|p| p.is_repost()).count();
        round2(reposts as f64 / self.recent_posts.len() as f64)
    }

    pub fn follower_following_ratio(&self) -> f64 {
        round2(self.profile.followers_count as f64 / self.profile.following_count.max(1) as f64)
    }

    /// Unique hashtags across recent posts, most frequent first.
    pub fn top_hashtags(&self, limit: usize) -> Vec<String> {
        top_by_count(
            self.recent_posts
                .iter()
                .flat_map(|p| p.hashtags.iter().cloned()),
            limit,
        )
    }

    /// Unique mentioned handles across recent posts, most frequent first.
    pub fn top_mentions(&self, limit: usize) -> Vec<String> {
        top_by_count(
            self.recent_posts
                .iter()
                .flat_map(|p| p.mentions.iter().cloned()),
            limit,
        )
    }

    /// Most-liked authors as `(username, like count)`, most liked first.
    pub fn top_liked_authors(&self, limit: usize) -> Vec<(String, u64)> {
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for liked in &self.liked_posts {
            *counts.entry(liked.author_username.as_str()).or_default() += 1;
        }
        let mut ranked: Vec<(String, u64)> =
            counts.into_iter().map(|(a, c)| (a.to_string(), c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }

    /// Rough activity bucket from lifetime post volume.
    pub fn activity_level(&self, now: DateTime<Utc>) -> ActivityLevel {
        let Some(created_at) = self.profile.created_at else {
            return ActivityLevel::Low;
        };
        let days = (now - created_at).num_days().max(1) as f64;
        let posts_per_day = self.profile.posts_count as f64 / days;
        if posts_per_day > 5.0 {
            ActivityLevel::VeryActive
        } else if posts_per_day > 1.0 {
            ActivityLevel::Active
        } else if posts_per_day > 0.1 {
            ActivityLevel::Moderate
        } else {
            ActivityLevel::Low
        }
    }

    /// Engagement bucket from mean engagement per recent post.
    pub fn engagement_level(&self) -> EngagementLevel {
        if self.recent_posts.is_empty() {
            return EngagementLevel::NoRecentPosts;
        }
        let total: u64 = self.recent_posts.iter().map(|p| p.engagement()).sum();
        let avg = total as f64 / self.recent_posts.len() as f64;
        if avg > 100.0 {
            EngagementLevel::High
        } else if avg > 10.0 {
            EngagementLevel::Medium
        } else if avg > 1.0 {
            EngagementLevel::Low
        } else {
            EngagementLevel::Minimal
        }
    }
}

/// Activity classification from lifetime posting rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    VeryActive,
    Active,
    Moderate,
    Low,
}

/// Engagement classification from recent posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    High,
    Medium,
    Low,
    Minimal,
    NoRecentPosts,
}

/// A recoverable problem recorded during collection instead of aborting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunWarning {
    /// Username of the follower affected, or the target account.
    pub subject: String,
    pub message: String,
}

impl RunWarning {
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// The full result of one collection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub target: UserProfile,
    pub followers: Vec<FollowerAnalysis>,
    #[serde(default)]
    pub warnings: Vec<RunWarning>,
    pub collected_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(target: UserProfile) -> Self {
        Self {
            target,
            followers: Vec::new(),
            warnings: Vec::new(),
            collected_at: Utc::now(),
        }
    }

    pub fn total_posts(&self) -> usize {
        self.followers.iter().map(|f| f.recent_posts.len()).sum()
    }

    pub fn total_likes(&self) -> usize {
        self.followers.iter().map(|f| f.liked_posts.len()).sum()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn top_by_count(items: impl Iterator<Item = String>, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for item in items {
        *counts.entry(item).or_default() += 1;
    }
    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked.into_iter().map(|(item, _)| item).collect()
}

//! Aggregate statistics over an analysis result, feeding the charts and
//! the dashboard stat cards.

use std::collections::HashMap;

use chrono::Timelike;

use crate::model::AnalysisResult;

/// Follower-count histogram buckets (upper bounds, last is open-ended).
pub const BUCKET_BOUNDS: &[(u64, &str)] = &[
    (10, "0-10"),
    (100, "11-100"),
    (1_000, "101-1K"),
    (10_000, "1K-10K"),
    (100_000, "10K-100K"),
    (u64::MAX, "100K+"),
];

/// Summary statistics computed once per export.
#[derive(Debug, Clone)]
pub struct SummaryStats {
    pub total_followers: usize,
    pub total_posts: usize,
    pub total_likes: usize,
    pub verified_count: usize,
    pub verified_rate: f64,
    pub mean_follower_count: f64,
    pub median_follower_count: f64,
    /// Counts per [`BUCKET_BOUNDS`] bucket, in order.
    pub follower_buckets: Vec<(String, u64)>,
    pub top_locations: Vec<(String, u64)>,
    pub top_hashtags: Vec<(String, u64)>,
    pub top_liked_authors: Vec<(String, u64)>,
    /// `(follower count, mean likes per recent post)` per follower with posts.
    pub engagement_points: Vec<(f64, f64)>,
    /// Posts per UTC hour of day, indexed 0..24.
    pub posts_by_hour: Vec<u64>,
    pub warning_count: usize,
}

impl SummaryStats {
    pub fn compute(result: &AnalysisResult) -> Self {
        let followers = &result.followers;

        let mut counts: Vec<u64> = followers
            .iter()
            .map(|f| f.profile.followers_count)
            .collect();
        counts.sort_unstable();

        let verified_count = followers.iter().filter(|f| f.profile.verified).count();

        let mut buckets = vec![0u64; BUCKET_BOUNDS.len()];
        for &count in &counts {
            let idx = BUCKET_BOUNDS
                .iter()
                .position(|(bound, _)| count <= *bound)
                .unwrap_or(BUCKET_BOUNDS.len() - 1);
            buckets[idx] += 1;
        }

        let mut locations: HashMap<String, u64> = HashMap::new();
        let mut hashtags: HashMap<String, u64> = HashMap::new();
        let mut liked_authors: HashMap<String, u64> = HashMap::new();
        let mut engagement_points = Vec::new();
        let mut posts_by_hour = vec![0u64; 24];

        for follower in followers {
            if let Some(location) = &follower.profile.location {
                if !location.trim().is_empty() {
                    *locations.entry(location.trim().to_string()).or_default() += 1;
                }
            }
            for post in &follower.recent_posts {
                for tag in &post.hashtags {
                    *hashtags.entry(tag.clone()).or_default() += 1;
                }
                if let Some(created_at) = post.created_at {
                    posts_by_hour[created_at.hour() as usize] += 1;
                }
            }
            for liked in &follower.liked_posts {
                *liked_authors
                    .entry(liked.author_username.clone())
                    .or_default() += 1;
            }
            if !follower.recent_posts.is_empty() {
                engagement_points.push((
                    follower.profile.followers_count as f64,
                    follower.avg_like_count(),
                ));
            }
        }

        Self {
            total_followers: followers.len(),
            total_posts: result.total_posts(),
            total_likes: result.total_likes(),
            verified_count,
            verified_rate: if followers.is_empty() {
                0.0
            } else {
                verified_count as f64 / followers.len() as f64
            },
            mean_follower_count: mean(&counts),
            median_follower_count: median(&counts),
            follower_buckets: BUCKET_BOUNDS
                .iter()
                .zip(buckets)
                .map(|((_, label), count)| (label.to_string(), count))
                .collect(),
            top_locations: top_n(locations, 10),
            top_hashtags: top_n(hashtags, 15),
            top_liked_authors: top_n(liked_authors, 10),
            engagement_points,
            posts_by_hour,
            warning_count: result.warnings.len(),
        }
    }
}

fn mean(sorted: &[u64]) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    sorted.iter().sum::<u64>() as f64 / sorted.len() as f64
}

fn median(sorted: &[u64]) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}

fn top_n(counts: HashMap<String, u64>, limit: usize) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FollowerAnalysis, Post, PostKind, UserProfile};

    fn follower(followers_count: u64, verified: bool, location: Option<&str>) -> FollowerAnalysis {
        FollowerAnalysis::new(UserProfile {
            user_id: format!("{}", followers_count),
            username: format!("u{}", followers_count),
            display_name: "U".into(),
            description: None,
            followers_count,
            following_count: 1,
            posts_count: 0,
            location: location.map(String::from),
            profile_image_url: None,
            verified,
            created_at: None,
            url: None,
        })
    }

    fn result_of(followers: Vec<FollowerAnalysis>) -> AnalysisResult {
        let mut result = AnalysisResult::new(follower(0, false, None).profile);
        result.followers = followers;
        result
    }

    #[test]
    fn empty_result_yields_zeroed_stats() {
        let stats = SummaryStats::compute(&result_of(vec![]));
        assert_eq!(stats.total_followers, 0);
        assert_eq!(stats.verified_rate, 0.0);
        assert_eq!(stats.median_follower_count, 0.0);
        assert!(stats.engagement_points.is_empty());
    }

    #[test]
    fn verified_rate_and_median() {
        let stats = SummaryStats::compute(&result_of(vec![
            follower(5, true, None),
            follower(50, false, None),
            follower(500, false, None),
        ]));
        assert_eq!(stats.verified_count, 1);
        assert!((stats.verified_rate - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.median_follower_count, 50.0);
    }

    #[test]
    fn follower_buckets_cover_all_counts() {
        let stats = SummaryStats::compute(&result_of(vec![
            follower(3, false, None),
            follower(99, false, None),
            follower(2_000_000, false, None),
        ]));
        let total: u64 = stats.follower_buckets.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 3);
        assert_eq!(stats.follower_buckets.last().unwrap().1, 1);
    }

    #[test]
    fn locations_trimmed_and_ranked() {
        let stats = SummaryStats::compute(&result_of(vec![
            follower(1, false, Some("Tokyo")),
            follower(2, false, Some(" Tokyo ")),
            follower(3, false, Some("Osaka")),
            follower(4, false, Some("  ")),
        ]));
        assert_eq!(stats.top_locations[0], ("Tokyo".to_string(), 2));
        assert_eq!(stats.top_locations.len(), 2);
    }

    #[test]
    fn hashtags_counted_across_followers() {
        let mut f1 = follower(1, false, None);
        f1.recent_posts.push(Post {
            post_id: "p1".into(),
            user_id: "1".into(),
            text: "x".into(),
            created_at: None,
            repost_count: 0,
            like_count: 4,
            reply_count: 0,
            kind: PostKind::Original,
            hashtags: vec!["rust".into(), "async".into()],
            mentions: vec![],
        });
        let stats = SummaryStats::compute(&result_of(vec![f1]));
        assert_eq!(stats.top_hashtags.len(), 2);
        assert_eq!(stats.engagement_points, vec![(1.0, 4.0)]);
    }

    #[test]
    fn posts_bucketed_by_utc_hour() {
        use chrono::{TimeZone, Utc};

        let mut f1 = follower(1, false, None);
        for (i, hour) in [9u32, 9, 23].iter().enumerate() {
            f1.recent_posts.push(Post {
                post_id: format!("p{}", i),
                user_id: "1".into(),
                text: "x".into(),
                created_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, *hour, 30, 0).unwrap()),
                repost_count: 0,
                like_count: 0,
                reply_count: 0,
                kind: PostKind::Original,
                hashtags: vec![],
                mentions: vec![],
            });
        }
        // One post without a timestamp is left out of the histogram.
        f1.recent_posts.push(Post {
            post_id: "p3".into(),
            user_id: "1".into(),
            text: "x".into(),
            created_at: None,
            repost_count: 0,
            like_count: 0,
            reply_count: 0,
            kind: PostKind::Original,
            hashtags: vec![],
            mentions: vec![],
        });

        let stats = SummaryStats::compute(&result_of(vec![f1]));
        assert_eq!(stats.posts_by_hour[9], 2);
        assert_eq!(stats.posts_by_hour[23], 1);
        assert_eq!(stats.posts_by_hour.iter().sum::<u64>(), 3);
    }
}

//! JSON export: a metadata envelope plus nested per-follower documents
//! with full post/like arrays and derived summary metrics.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{
    ActivityLevel, AnalysisResult, EngagementLevel, FollowerAnalysis, RunWarning, UserProfile,
};

/// Top-level JSON document.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDocument {
    pub metadata: ExportMetadata,
    pub target: UserProfile,
    pub followers: Vec<FollowerDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub export_timestamp: DateTime<Utc>,
    pub target_username: String,
    pub total_followers: usize,
    pub total_posts: usize,
    pub total_likes: usize,
    #[serde(default)]
    pub warnings: Vec<RunWarning>,
}

/// One follower with collected data and derived metrics.
#[derive(Debug, Serialize, Deserialize)]
pub struct FollowerDocument {
    #[serde(flatten)]
    pub data: FollowerAnalysis,
    pub summary: FollowerSummary,
}

/// Derived per-follower metrics, recomputable from the raw data.
#[derive(Debug, Serialize, Deserialize)]
pub struct FollowerSummary {
    pub avg_reposts_per_post: f64,
    pub avg_likes_per_post: f64,
    pub avg_replies_per_post: f64,
    pub repost_ratio: f64,
    pub follower_following_ratio: f64,
    pub primary_hashtags: Vec<String>,
    pub frequent_mentions: Vec<String>,
    pub most_liked_authors: Vec<LikedAuthor>,
    pub activity_level: ActivityLevel,
    pub engagement_level: EngagementLevel,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikedAuthor {
    pub username: String,
    pub likes_count: u64,
}

impl FollowerSummary {
    pub fn from_analysis(analysis: &FollowerAnalysis, now: DateTime<Utc>) -> Self {
        Self {
            avg_reposts_per_post: analysis.avg_repost_count(),
            avg_likes_per_post: analysis.avg_like_count(),
            avg_replies_per_post: analysis.avg_reply_count(),
            repost_ratio: analysis.repost_ratio(),
            follower_following_ratio: analysis.follower_following_ratio(),
            primary_hashtags: analysis.top_hashtags(5),
            frequent_mentions: analysis.top_mentions(5),
            most_liked_authors: analysis
                .top_liked_authors(5)
                .into_iter()
                .map(|(username, likes_count)| LikedAuthor {
                    username,
                    likes_count,
                })
                .collect(),
            activity_level: analysis.activity_level(now),
            engagement_level: analysis.engagement_level(),
        }
    }
}

/// Write the analysis result as pretty-printed JSON.
pub fn write_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::OutputWrite(format!("{}: {}", parent.display(), e)))?;
        }
    }

    let document = build_document(result);

    let file = File::create(path)
        .map_err(|e| Error::OutputWrite(format!("{}: {}", path.display(), e)))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &document)?;

    tracing::info!(
        "JSON exported to {} ({} followers)",
        path.display(),
        result.followers.len()
    );

    Ok(())
}

/// Reload a previously exported document.
pub fn read_json(path: &Path) -> Result<JsonDocument> {
    let file = File::open(path)?;
    let document: JsonDocument = serde_json::from_reader(BufReader::new(file))?;
    Ok(document)
}

fn build_document(result: &AnalysisResult) -> JsonDocument {
    let now = Utc::now();

    JsonDocument {
        metadata: ExportMetadata {
            export_timestamp: now,
            target_username: result.target.username.clone(),
            total_followers: result.followers.len(),
            total_posts: result.total_posts(),
            total_likes: result.total_likes(),
            warnings: result.warnings.clone(),
        },
        target: result.target.clone(),
        followers: result
            .followers
            .iter()
            .map(|analysis| FollowerDocument {
                data: analysis.clone(),
                summary: FollowerSummary::from_analysis(analysis, now),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LikedPost, Post, PostKind};
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn profile(id: &str, username: &str) -> UserProfile {
        UserProfile {
            user_id: id.into(),
            username: username.into(),
            display_name: username.to_uppercase(),
            description: Some("bio".into()),
            followers_count: 42,
            following_count: 7,
            posts_count: 100,
            location: Some("Berlin".into()),
            profile_image_url: Some("https://example.com/a.png".into()),
            verified: true,
            created_at: Some(Utc.with_ymd_and_hms(2019, 6, 1, 12, 0, 0).unwrap()),
            url: Some("https://example.com".into()),
        }
    }

    fn sample_result() -> AnalysisResult {
        let mut result = AnalysisResult::new(profile("100", "target"));
        for i in 1..=3 {
            let id = format!("{}", i);
            let mut follower = FollowerAnalysis::new(profile(&id, &format!("user_{}", id)));
            follower.recent_posts.push(Post {
                post_id: format!("p{}", id),
                user_id: id.clone(),
                text: "hello #rust".into(),
                created_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()),
                repost_count: 1,
                like_count: 5,
                reply_count: 0,
                kind: PostKind::Original,
                hashtags: vec!["rust".into()],
                mentions: vec![],
            });
            follower.liked_posts.push(LikedPost {
                post_id: format!("l{}", id),
                user_id: id.clone(),
                author_id: "77".into(),
                author_username: "author".into(),
                text: "liked".into(),
                created_at: None,
            });
            result.followers.push(follower);
        }
        result.warnings.push(RunWarning::new("user_2", "partial"));
        result
    }

    #[test]
    fn round_trip_preserves_follower_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let result = sample_result();

        write_json(&result, &path).unwrap();
        let reloaded = read_json(&path).unwrap();

        assert_eq!(reloaded.followers.len(), result.followers.len());
        for (reloaded_doc, original) in reloaded.followers.iter().zip(&result.followers) {
            assert_eq!(reloaded_doc.data, *original);
        }
        assert_eq!(reloaded.target, result.target);
        assert_eq!(reloaded.metadata.warnings, result.warnings);
    }

    #[test]
    fn metadata_totals_match_collections() {
        let document = build_document(&sample_result());
        assert_eq!(document.metadata.total_followers, 3);
        assert_eq!(document.metadata.total_posts, 3);
        assert_eq!(document.metadata.total_likes, 3);
    }

    #[test]
    fn summary_includes_liked_authors() {
        let document = build_document(&sample_result());
        let summary = &document.followers[0].summary;
        assert_eq!(summary.most_liked_authors[0].username, "author");
        assert_eq!(summary.avg_likes_per_post, 5.0);
    }
}

//! CSV export: one flattened row per follower with profile fields and
//! summary columns for their collected posts and likes.

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{AnalysisResult, FollowerAnalysis};

/// Sample posts included in the text summary column.
const SAMPLE_POST_COUNT: usize = 3;

/// Truncation length for each sampled post text.
const SAMPLE_TEXT_LEN: usize = 100;

/// Columns written, in order.
pub const HEADERS: &[&str] = &[
    "user_id",
    "username",
    "display_name",
    "description",
    "followers_count",
    "following_count",
    "posts_count",
    "location",
    "profile_image_url",
    "verified",
    "created_at",
    "url",
    "recent_posts_count",
    "recent_posts_sample",
    "recent_hashtags",
    "recent_mentions",
    "avg_repost_count",
    "avg_like_count",
    "repost_ratio",
    "liked_posts_count",
    "top_liked_authors",
];

/// Write the analysis result as CSV.
pub fn write_csv(result: &AnalysisResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::OutputWrite(format!("{}: {}", parent.display(), e)))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| Error::OutputWrite(format!("{}: {}", path.display(), e)))?;

    writer.write_record(HEADERS)?;

    for follower in &result.followers {
        writer.write_record(flatten_follower(follower))?;
    }

    writer
        .flush()
        .map_err(|e| Error::OutputWrite(format!("{}: {}", path.display(), e)))?;

    tracing::info!(
        "CSV exported to {} ({} rows)",
        path.display(),
        result.followers.len()
    );

    Ok(())
}

/// Flatten one follower into a CSV record matching [`HEADERS`].
fn flatten_follower(follower: &FollowerAnalysis) -> Vec<String> {
    let profile = &follower.profile;

    vec![
        profile.user_id.clone(),
        profile.username.clone(),
        profile.display_name.clone(),
        profile.description.clone().unwrap_or_default(),
        profile.followers_count.to_string(),
        profile.following_count.to_string(),
        profile.posts_count.to_string(),
        profile.location.clone().unwrap_or_default(),
        profile.profile_image_url.clone().unwrap_or_default(),
        profile.verified.to_string(),
        profile
            .created_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
        profile.url.clone().unwrap_or_default(),
        follower.recent_posts.len().to_string(),
        sample_post_texts(follower),
        follower.top_hashtags(10).join(", "),
        follower.top_mentions(10).join(", "),
        format!("{}", follower.avg_repost_count()),
        format!("{}", follower.avg_like_count()),
        format!("{}", follower.repost_ratio()),
        follower.liked_posts.len().to_string(),
        follower
            .top_liked_authors(5)
            .into_iter()
            .map(|(author, count)| format!("@{}({})", author, count))
            .collect::<Vec<_>>()
            .join(", "),
    ]
}

/// Join the first few post texts, newlines collapsed, each truncated.
fn sample_post_texts(follower: &FollowerAnalysis) -> String {
    follower
        .recent_posts
        .iter()
        .take(SAMPLE_POST_COUNT)
        .map(|post| {
            let text = post.text.replace(['\n', '\r'], " ");
            if text.chars().count() > SAMPLE_TEXT_LEN {
                let truncated: String = text.chars().take(SAMPLE_TEXT_LEN - 3).collect();
                format!("{}...", truncated)
            } else {
                text
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Post, PostKind, UserProfile};
    use tempfile::tempdir;

    fn profile(id: &str, username: &str) -> UserProfile {
        UserProfile {
            user_id: id.into(),
            username: username.into(),
            display_name: username.to_uppercase(),
            description: Some("bio, with comma".into()),
            followers_count: 10,
            following_count: 5,
            posts_count: 100,
            location: Some("Tokyo".into()),
            profile_image_url: None,
            verified: false,
            created_at: None,
            url: None,
        }
    }

    fn post(id: &str, user_id: &str) -> Post {
        Post {
            post_id: id.into(),
            user_id: user_id.into(),
            text: format!("text of {}\nwith newline", id),
            created_at: None,
            repost_count: 3,
            like_count: 7,
            reply_count: 1,
            kind: PostKind::Original,
            hashtags: vec!["rust".into()],
            mentions: vec![],
        }
    }

    fn result_with(followers: usize, posts_each: usize) -> AnalysisResult {
        let mut result = AnalysisResult::new(profile("100", "target"));
        for i in 0..followers {
            let id = format!("{}", i + 1);
            let mut follower = FollowerAnalysis::new(profile(&id, &format!("user_{}", id)));
            follower.recent_posts = (0..posts_each)
                .map(|j| post(&format!("p{}_{}", id, j), &id))
                .collect();
            result.followers.push(follower);
        }
        result
    }

    #[test]
    fn three_followers_two_posts_yield_three_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&result_with(3, 2), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        let post_count_idx = headers
            .iter()
            .position(|h| h == "recent_posts_count")
            .unwrap();

        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(&row[post_count_idx], "2");
        }
    }

    #[test]
    fn header_matches_flattened_record_width() {
        let result = result_with(1, 1);
        assert_eq!(flatten_follower(&result.followers[0]).len(), HEADERS.len());
    }

    #[test]
    fn newlines_collapsed_in_sample_texts() {
        let result = result_with(1, 2);
        let sample = sample_post_texts(&result.followers[0]);
        assert!(!sample.contains('\n'));
        assert!(sample.contains(" | "));
    }

    #[test]
    fn creates_missing_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.csv");

        write_csv(&result_with(1, 0), &path).unwrap();
        assert!(path.exists());
    }
}

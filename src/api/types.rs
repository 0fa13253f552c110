//! Serde definitions for the X API v2 wire format, plus conversions into
//! the crate's data model.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::{LikedPost, Post, PostKind, UserProfile};

/// Generic v2 response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    pub meta: Option<ResultMeta>,
    pub includes: Option<Includes>,
    #[serde(default)]
    pub errors: Vec<ApiProblem>,
}

/// Pagination metadata.
#[derive(Debug, Deserialize)]
pub struct ResultMeta {
    pub next_token: Option<String>,
    pub result_count: Option<u64>,
}

/// Expanded objects referenced by the primary data.
#[derive(Debug, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub users: Vec<ApiUser>,
}

/// Partial error attached to an otherwise successful response.
#[derive(Debug, Deserialize)]
pub struct ApiProblem {
    pub title: Option<String>,
    pub detail: Option<String>,
}

/// A user object with the fields we request.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: String,
    pub name: String,
    pub username: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub profile_image_url: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub verified: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub public_metrics: Option<UserMetrics>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMetrics {
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub tweet_count: u64,
}

/// A tweet object with the fields we request.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTweet {
    pub id: String,
    pub text: String,
    pub author_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub public_metrics: Option<TweetMetrics>,
    pub entities: Option<TweetEntities>,
    #[serde(default)]
    pub referenced_tweets: Vec<ReferencedTweet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TweetMetrics {
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub like_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TweetEntities {
    #[serde(default)]
    pub hashtags: Vec<HashtagEntity>,
    #[serde(default)]
    pub mentions: Vec<MentionEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HashtagEntity {
    pub tag: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MentionEntity {
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReferencedTweet {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl ApiUser {
    /// Convert into the crate's profile model.
    pub fn into_profile(self) -> UserProfile {
        let metrics = self.public_metrics.unwrap_or_default();
        UserProfile {
            user_id: self.id,
            username: self.username,
            display_name: self.name,
            description: self.description,
            followers_count: metrics.followers_count,
            following_count: metrics.following_count,
            posts_count: metrics.tweet_count,
            location: self.location,
            profile_image_url: self.profile_image_url,
            verified: self.verified,
            created_at: self.created_at,
            url: self.url,
        }
    }
}

impl ApiTweet {
    /// Classify the tweet from its `referenced_tweets` annotations.
    pub fn kind(&self) -> PostKind {
        for reference in &self.referenced_tweets {
            match reference.kind.as_str() {
                "retweeted" => return PostKind::Repost,
                "replied_to" => return PostKind::Reply,
                _ => {}
            }
        }
        PostKind::Original
    }

    /// Convert into a post authored by `user_id`.
    pub fn into_post(self, user_id: &str) -> Post {
        let kind = self.kind();
        let metrics = self.public_metrics.clone().unwrap_or_default();
        let entities = self.entities.unwrap_or_default();

        Post {
            post_id: self.id,
            user_id: user_id.to_string(),
            text: self.text,
            created_at: self.created_at,
            repost_count: metrics.retweet_count,
            like_count: metrics.like_count,
            reply_count: metrics.reply_count,
            kind,
            hashtags: entities.hashtags.into_iter().map(|h| h.tag).collect(),
            mentions: entities.mentions.into_iter().map(|m| m.username).collect(),
        }
    }

    /// Convert into a liked post attributed to `user_id`, resolving the
    /// original author's handle via the response includes.
    pub fn into_liked_post(self, user_id: &str, includes: &Includes) -> LikedPost {
        let author_id = self.author_id.clone().unwrap_or_default();
        let author_username = includes
            .users
            .iter()
            .find(|u| u.id == author_id)
            .map(|u| u.username.clone())
            .unwrap_or_else(|| "unknown".to_string());

        LikedPost {
            post_id: self.id,
            user_id: user_id.to_string(),
            author_id,
            author_username,
            text: self.text,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_envelope() {
        let body = r#"{
            "data": {
                "id": "2244994945",
                "name": "X Dev",
                "username": "XDevelopers",
                "verified": true,
                "created_at": "2013-12-14T04:35:55.000Z",
                "public_metrics": {
                    "followers_count": 513961,
                    "following_count": 2039,
                    "tweet_count": 3635
                }
            }
        }"#;

        let envelope: ApiEnvelope<ApiUser> = serde_json::from_str(body).unwrap();
        let profile = envelope.data.unwrap().into_profile();
        assert_eq!(profile.username, "XDevelopers");
        assert_eq!(profile.followers_count, 513961);
        assert!(profile.verified);
        assert!(profile.created_at.is_some());
    }

    #[test]
    fn parses_follower_page_with_cursor() {
        let body = r#"{
            "data": [
                {"id": "1", "name": "A", "username": "a_user"},
                {"id": "2", "name": "B", "username": "b_user"}
            ],
            "meta": {"result_count": 2, "next_token": "7140dibdnow9c7btw482"}
        }"#;

        let envelope: ApiEnvelope<Vec<ApiUser>> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.unwrap().len(), 2);
        assert_eq!(
            envelope.meta.unwrap().next_token.as_deref(),
            Some("7140dibdnow9c7btw482")
        );
    }

    #[test]
    fn tweet_kind_from_referenced_tweets() {
        let body = r#"{
            "id": "100",
            "text": "RT @someone: hello",
            "referenced_tweets": [{"type": "retweeted", "id": "99"}],
            "entities": {"hashtags": [{"tag": "rust"}], "mentions": [{"username": "someone"}]}
        }"#;

        let tweet: ApiTweet = serde_json::from_str(body).unwrap();
        assert_eq!(tweet.kind(), PostKind::Repost);

        let post = tweet.into_post("42");
        assert_eq!(post.kind, PostKind::Repost);
        assert_eq!(post.hashtags, vec!["rust".to_string()]);
        assert_eq!(post.mentions, vec!["someone".to_string()]);
    }

    #[test]
    fn liked_post_resolves_author_from_includes() {
        let includes = Includes {
            users: vec![ApiUser {
                id: "9".into(),
                name: "Author".into(),
                username: "the_author".into(),
                description: None,
                location: None,
                profile_image_url: None,
                url: None,
                verified: false,
                created_at: None,
                public_metrics: None,
            }],
        };

        let tweet = ApiTweet {
            id: "55".into(),
            text: "liked content".into(),
            author_id: Some("9".into()),
            created_at: None,
            public_metrics: None,
            entities: None,
            referenced_tweets: vec![],
        };

        let liked = tweet.into_liked_post("42", &includes);
        assert_eq!(liked.author_username, "the_author");
        assert_eq!(liked.user_id, "42");
    }
}

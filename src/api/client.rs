//! X API v2 HTTP client.

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};

use crate::api::adapter::{FollowerPage, PlatformApi};
use crate::api::types::*;
use crate::error::{Error, Result};
use crate::model::{LikedPost, Post, UserProfile};

/// X API v2 base URL.
const API_BASE: &str = "https://api.twitter.com/2";

/// Maximum followers per page accepted by the API.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Timeline and likes endpoints accept 5..=100 results per request.
const TWEET_PAGE_MIN: usize = 5;
const TWEET_PAGE_MAX: usize = 100;

/// User fields requested on every user-returning endpoint.
const USER_FIELDS: &str =
    "created_at,description,location,public_metrics,profile_image_url,url,verified";

/// Tweet fields requested for timelines.
const TWEET_FIELDS: &str = "created_at,public_metrics,entities,referenced_tweets,author_id";

/// Backoff reported when the API omits a retry-after header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// X API client authenticated with an app-only bearer token.
pub struct XApiClient {
    client: Client,
    bearer_token: String,
}

impl XApiClient {
    /// Create a new API client.
    pub fn new(bearer_token: String) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            bearer_token,
        })
    }

    /// Make an authenticated GET request and map error statuses.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        let url = format!("{}{}", API_BASE, path);

        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited(retry_after_secs(&response)));
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Auth error response: {}", body);
            return Err(Error::Authentication(format!(
                "HTTP {}: {}",
                status,
                if body.is_empty() {
                    "Authentication failed"
                } else {
                    &body
                }
            )));
        }

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("HTTP 404 for {}", path)));
        }

        if status.is_server_error() {
            return Err(Error::Network(format!("HTTP {} for {}", status, path)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("HTTP {}: {}", status, body)));
        }

        Ok(response)
    }

    /// Fetch and deserialize an envelope, surfacing partial errors.
    async fn get_envelope<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiEnvelope<T>> {
        let response = self.get(path, query).await?;
        let text = response.text().await.map_err(Error::Http)?;

        let envelope: ApiEnvelope<T> = serde_json::from_str(&text)
            .map_err(|e| Error::Api(format!("Failed to parse response: {} - {}", e, text)))?;

        for problem in &envelope.errors {
            tracing::debug!(
                "Partial API error: {} - {}",
                problem.title.as_deref().unwrap_or("unknown"),
                problem.detail.as_deref().unwrap_or("")
            );
        }

        Ok(envelope)
    }
}

/// Parse the retry-after header, falling back to the default backoff.
fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Clamp a requested limit into the endpoint's accepted page-size range.
fn tweet_page_size(limit: usize) -> usize {
    limit.clamp(TWEET_PAGE_MIN, TWEET_PAGE_MAX)
}

#[async_trait]
impl PlatformApi for XApiClient {
    async fn verify_credentials(&self) -> Result<UserProfile> {
        let envelope: ApiEnvelope<ApiUser> = self
            .get_envelope("/users/me", &[("user.fields", USER_FIELDS.to_string())])
            .await?;

        envelope
            .data
            .map(ApiUser::into_profile)
            .ok_or_else(|| Error::Authentication("No account data in /users/me response".into()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<UserProfile> {
        let path = format!("/users/by/username/{}", username);
        let envelope: ApiEnvelope<ApiUser> = self
            .get_envelope(&path, &[("user.fields", USER_FIELDS.to_string())])
            .await?;

        envelope
            .data
            .map(ApiUser::into_profile)
            .ok_or_else(|| Error::AccountNotFound(username.to_string()))
    }

    async fn fetch_followers(
        &self,
        user_id: &str,
        page_size: usize,
        cursor: Option<&str>,
    ) -> Result<FollowerPage> {
        let path = format!("/users/{}/followers", user_id);
        let mut query = vec![
            ("max_results", page_size.min(MAX_PAGE_SIZE).to_string()),
            ("user.fields", USER_FIELDS.to_string()),
        ];
        if let Some(token) = cursor {
            query.push(("pagination_token", token.to_string()));
        }

        let envelope: ApiEnvelope<Vec<ApiUser>> = self.get_envelope(&path, &query).await?;

        let followers = envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .map(ApiUser::into_profile)
            .collect();

        Ok(FollowerPage {
            followers,
            next_cursor: envelope.meta.and_then(|m| m.next_token),
        })
    }

    async fn fetch_recent_posts(&self, user_id: &str, limit: usize) -> Result<Vec<Post>> {
        let path = format!("/users/{}/tweets", user_id);
        let query = vec![
            ("max_results", tweet_page_size(limit).to_string()),
            ("tweet.fields", TWEET_FIELDS.to_string()),
        ];

        let envelope: ApiEnvelope<Vec<ApiTweet>> = self.get_envelope(&path, &query).await?;

        let posts = envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .map(|tweet| tweet.into_post(user_id))
            .collect();

        Ok(posts)
    }

    async fn fetch_liked_posts(&self, user_id: &str, limit: usize) -> Result<Vec<LikedPost>> {
        let path = format!("/users/{}/liked_tweets", user_id);
        let query = vec![
            ("max_results", tweet_page_size(limit).to_string()),
            ("tweet.fields", "created_at,author_id".to_string()),
            ("expansions", "author_id".to_string()),
            ("user.fields", "username".to_string()),
        ];

        let envelope: ApiEnvelope<Vec<ApiTweet>> = self.get_envelope(&path, &query).await?;
        let includes = envelope.includes.unwrap_or_default();

        let liked = envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .map(|tweet| tweet.into_liked_post(user_id, &includes))
            .collect();

        Ok(liked)
    }
}

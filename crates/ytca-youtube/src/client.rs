//! YouTube Data API HTTP client.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use ytca_models::{normalize_page_token, CommentPage, RelatedVideos};

use crate::error::{YoutubeError, YoutubeResult};
use crate::types::{CommentThreadListResponse, ErrorResponse, SearchListResponse};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Configuration for the YouTube client.
#[derive(Debug, Clone)]
pub struct YoutubeClientConfig {
    /// Base URL of the Data API
    pub base_url: String,
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for YoutubeClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl YoutubeClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("YOUTUBE_API_URL").unwrap_or(defaults.base_url),
            api_key: std::env::var("YOUTUBE_API_KEY").unwrap_or_default(),
            timeout: std::env::var("YOUTUBE_API_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Client for the YouTube Data API.
#[derive(Debug, Clone)]
pub struct YoutubeClient {
    http: Client,
    config: YoutubeClientConfig,
}

impl YoutubeClient {
    /// Create a new YouTube client.
    pub fn new(config: YoutubeClientConfig) -> YoutubeResult<Self> {
        if config.api_key.is_empty() {
            return Err(YoutubeError::invalid_argument("YouTube API key is not configured"));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(YoutubeError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> YoutubeResult<Self> {
        Self::new(YoutubeClientConfig::from_env())
    }

    /// Fetch videos related to `video_id`.
    ///
    /// Only search hits that are actual videos are returned.
    pub async fn fetch_related_videos(
        &self,
        video_id: &str,
        page_token: Option<&str>,
        max_results: Option<u32>,
    ) -> YoutubeResult<RelatedVideos> {
        if video_id.is_empty() {
            return Err(YoutubeError::invalid_argument("videoId must not be empty"));
        }

        let query = [
            ("key", self.config.api_key.clone()),
            ("part", "snippet".to_string()),
            ("type", "video".to_string()),
            ("relatedToVideoId", video_id.to_string()),
            ("maxResults", max_results.unwrap_or(DEFAULT_MAX_RESULTS).to_string()),
            ("pageToken", page_token.unwrap_or_default().to_string()),
        ];

        debug!(video_id = %video_id, "Fetching related videos");
        let response: SearchListResponse = self.get("search", &query).await?;

        let videos = response
            .items
            .into_iter()
            .filter_map(|item| item.into_related_video())
            .collect();

        Ok(RelatedVideos {
            videos,
            next_page_token: normalize_page_token(response.next_page_token),
        })
    }

    /// Fetch one page of top-level comments for `video_id`, most relevant first.
    pub async fn fetch_comments(
        &self,
        video_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> YoutubeResult<CommentPage> {
        if video_id.is_empty() {
            return Err(YoutubeError::invalid_argument("videoId must not be empty"));
        }

        let query = [
            ("key", self.config.api_key.clone()),
            ("part", "snippet".to_string()),
            ("videoId", video_id.to_string()),
            ("maxResults", max_results.to_string()),
            ("pageToken", page_token.unwrap_or_default().to_string()),
            ("order", "relevance".to_string()),
        ];

        debug!(video_id = %video_id, max_results, "Fetching comment threads");
        let response: CommentThreadListResponse = self.get("commentThreads", &query).await?;

        Ok(CommentPage {
            comments: response
                .items
                .into_iter()
                .map(|thread| thread.into_comment())
                .collect(),
            next_page_token: normalize_page_token(response.next_page_token),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, String)],
    ) -> YoutubeResult<T> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), resource);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(resource, status = %status, "YouTube API request failed");
            return Err(classify_failure(status, body));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            YoutubeError::InvalidResponse(format!("Failed to parse {} response: {}", resource, e))
        })
    }
}

/// Map a non-2xx response onto an error, singling out quota exhaustion.
fn classify_failure(status: StatusCode, body: String) -> YoutubeError {
    if status == StatusCode::FORBIDDEN {
        if let Ok(envelope) = serde_json::from_str::<ErrorResponse>(&body) {
            if envelope.is_quota_exceeded() {
                return YoutubeError::QuotaExceeded(envelope.error.message);
            }
        }
    }

    YoutubeError::Status {
        status: status.as_u16(),
        body,
    }
}

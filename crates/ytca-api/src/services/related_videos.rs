//! Related videos pipeline: fetch, filter, project.

use tracing::info;
use ytca_models::RelatedVideos;
use ytca_youtube::YoutubeClient;

use crate::error::ApiResult;
use crate::metrics;

/// Page size when the caller does not ask for one.
pub const DEFAULT_RELATED_VIDEOS: u32 = 10;

/// Largest page the search API accepts.
pub const MAX_RELATED_VIDEOS: u32 = 50;

/// Fetch up to `max_results` videos related to `video_id`, starting at `page_token`.
pub async fn get_related_videos(
    youtube: &YoutubeClient,
    video_id: &str,
    page_token: &str,
    max_results: Option<u32>,
) -> ApiResult<RelatedVideos> {
    let max_results = max_results
        .unwrap_or(DEFAULT_RELATED_VIDEOS)
        .clamp(1, MAX_RELATED_VIDEOS);

    let related = youtube
        .fetch_related_videos(video_id, Some(page_token), Some(max_results))
        .await;
    metrics::record_upstream_call("youtube", related.is_ok());
    let related = related?;

    info!(
        video_id = %video_id,
        videos = related.videos.len(),
        "Fetched related videos"
    );

    Ok(related)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use ytca_youtube::YoutubeClientConfig;

    async fn expect_page_size(server: &MockServer, max_results: &str) {
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("maxResults", max_results))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_page_size_is_clamped() {
        let server = MockServer::start().await;
        expect_page_size(&server, "50").await;
        expect_page_size(&server, "1").await;
        expect_page_size(&server, "10").await;

        let youtube = YoutubeClient::new(YoutubeClientConfig {
            base_url: server.uri(),
            api_key: "yt-key".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        for max_results in [Some(500), Some(0), None] {
            let related = get_related_videos(&youtube, "PZmCYeG3uh4", "", max_results)
                .await
                .unwrap();
            assert!(related.videos.is_empty());
        }
    }
}

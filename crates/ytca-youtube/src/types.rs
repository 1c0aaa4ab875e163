//! YouTube Data API wire types.
//!
//! Only the fields the analyzer reads are modelled; everything is optional or
//! defaulted so that a sparse upstream payload still deserializes and the
//! projection decides what to keep.

use serde::Deserialize;
use ytca_models::{Comment, RelatedVideo};

/// Resource kind marker for videos in search results.
pub const VIDEO_KIND: &str = "youtube#video";

/// Upstream error reasons that mean the API key ran out of quota.
const QUOTA_REASONS: [&str; 2] = ["quotaExceeded", "dailyLimitExceeded"];

/// Response of `GET /search`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: Option<ResourceId>,
    pub snippet: Option<SearchSnippet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub kind: String,
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub channel_id: Option<String>,
    pub channel_title: Option<String>,
    pub published_at: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

impl SearchResult {
    /// Project a search hit onto a related video.
    ///
    /// Returns `None` unless the hit has a snippet and an id of kind
    /// `youtube#video` carrying a non-empty video ID.
    pub fn into_related_video(self) -> Option<RelatedVideo> {
        let snippet = self.snippet?;
        let id = self.id?;
        if id.kind != VIDEO_KIND {
            return None;
        }
        let video_id = id.video_id.filter(|v| !v.is_empty())?;

        let thumbnail_url = snippet
            .thumbnails
            .and_then(|t| t.default)
            .map(|t| t.url)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| RelatedVideo::default_thumbnail_url(&video_id));

        Some(RelatedVideo {
            video_id,
            title: snippet.title,
            description: snippet.description,
            channel_id: snippet.channel_id,
            channel_title: snippet.channel_title,
            published_at: snippet.published_at,
            thumbnail_url,
        })
    }
}

/// Response of `GET /commentThreads`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    #[serde(default)]
    pub text_display: String,
    #[serde(default)]
    pub text_original: String,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub published_at: String,
}

impl CommentThread {
    pub fn into_comment(self) -> Comment {
        let snippet = self.snippet.top_level_comment.snippet;
        let text = if snippet.text_display.is_empty() {
            snippet.text_original
        } else {
            snippet.text_display
        };

        Comment {
            text,
            like_count: snippet.like_count,
            published_at: snippet.published_at,
        }
    }
}

/// Error envelope returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub reason: String,
}

impl ErrorResponse {
    pub fn is_quota_exceeded(&self) -> bool {
        self.error
            .errors
            .iter()
            .any(|e| QUOTA_REASONS.contains(&e.reason.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search_result(value: serde_json::Value) -> SearchResult {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_video_hit_is_projected() {
        let hit = search_result(json!({
            "id": {"kind": "youtube#video", "videoId": "dQw4w9WgXcQ"},
            "snippet": {
                "title": "Never Gonna Give You Up",
                "description": "Official video",
                "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw",
                "channelTitle": "Rick Astley",
                "publishedAt": "2009-10-25T06:57:33Z",
                "thumbnails": {
                    "default": {"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg"},
                    "high": {"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"}
                }
            }
        }));

        let video = hit.into_related_video().unwrap();
        assert_eq!(video.video_id, "dQw4w9WgXcQ");
        assert_eq!(video.title, "Never Gonna Give You Up");
        assert_eq!(video.channel_title.as_deref(), Some("Rick Astley"));
        assert_eq!(video.thumbnail_url, "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg");
    }

    #[test]
    fn test_non_video_hits_are_dropped() {
        let channel = search_result(json!({
            "id": {"kind": "youtube#channel", "channelId": "UC123"},
            "snippet": {"title": "A channel"}
        }));
        assert!(channel.into_related_video().is_none());

        let no_snippet = search_result(json!({
            "id": {"kind": "youtube#video", "videoId": "dQw4w9WgXcQ"}
        }));
        assert!(no_snippet.into_related_video().is_none());

        let no_video_id = search_result(json!({
            "id": {"kind": "youtube#video", "videoId": ""},
            "snippet": {"title": "Deleted"}
        }));
        assert!(no_video_id.into_related_video().is_none());

        let no_id = search_result(json!({"snippet": {"title": "Orphan"}}));
        assert!(no_id.into_related_video().is_none());
    }

    #[test]
    fn test_missing_default_thumbnail_falls_back() {
        let hit = search_result(json!({
            "id": {"kind": "youtube#video", "videoId": "abcdefghijk"},
            "snippet": {"title": "No thumbs", "thumbnails": {}}
        }));
        let video = hit.into_related_video().unwrap();
        assert_eq!(video.thumbnail_url, "https://i.ytimg.com/vi/abcdefghijk/default.jpg");
    }

    #[test]
    fn test_comment_projection_prefers_display_text() {
        let thread: CommentThread = serde_json::from_value(json!({
            "snippet": {"topLevelComment": {"snippet": {
                "textDisplay": "Great video!",
                "textOriginal": "Great video!!",
                "likeCount": 12,
                "publishedAt": "2022-03-01T10:00:00Z"
            }}}
        }))
        .unwrap();

        let comment = thread.into_comment();
        assert_eq!(comment.text, "Great video!");
        assert_eq!(comment.like_count, 12);
        assert_eq!(comment.published_at, "2022-03-01T10:00:00Z");
    }

    #[test]
    fn test_quota_error_detection() {
        let quota: ErrorResponse = serde_json::from_value(json!({
            "error": {"code": 403, "message": "quota", "errors": [{"reason": "quotaExceeded"}]}
        }))
        .unwrap();
        assert!(quota.is_quota_exceeded());

        let forbidden: ErrorResponse = serde_json::from_value(json!({
            "error": {"code": 403, "message": "disabled", "errors": [{"reason": "commentsDisabled"}]}
        }))
        .unwrap();
        assert!(!forbidden.is_quota_exceeded());
    }
}

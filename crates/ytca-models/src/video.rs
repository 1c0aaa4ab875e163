//! Related video models.

use serde::{Deserialize, Serialize};

/// Video returned by a related-videos search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedVideo {
    pub video_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    /// URL of the "default" thumbnail variant
    pub thumbnail_url: String,
}

impl RelatedVideo {
    /// Thumbnail URL YouTube serves for the "default" variant of a video.
    pub fn default_thumbnail_url(video_id: &str) -> String {
        format!("https://i.ytimg.com/vi/{}/default.jpg", video_id)
    }
}

/// One page of related videos.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedVideos {
    pub videos: Vec<RelatedVideo>,
    /// Empty when there are no further pages
    pub next_page_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted() {
        let video = RelatedVideo {
            video_id: "dQw4w9WgXcQ".to_string(),
            title: "Never Gonna Give You Up".to_string(),
            description: None,
            channel_id: None,
            channel_title: Some("Rick Astley".to_string()),
            published_at: None,
            thumbnail_url: RelatedVideo::default_thumbnail_url("dQw4w9WgXcQ"),
        };

        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["videoId"], "dQw4w9WgXcQ");
        assert_eq!(json["channelTitle"], "Rick Astley");
        assert_eq!(json["thumbnailUrl"], "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg");
        assert!(json.get("description").is_none());
        assert!(json.get("channelId").is_none());
    }
}

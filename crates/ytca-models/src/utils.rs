//! Utility functions for video ID resolution and pagination.
//!
//! These mirror the rules the browser client applies before it talks to the
//! API, so the server accepts exactly what a user can paste into the page.

use url::Url;

/// Inputs shorter than this cannot be a video ID or a video URL.
const MIN_VIDEO_INPUT_LEN: usize = 8;

const EMBED_SEGMENT: &str = "/embed/";

/// Resolve a user-supplied video ID or YouTube URL to a video ID.
///
/// - Inputs shorter than 8 characters resolve to nothing
/// - `https://` URLs yield their `v` query parameter, or the path after `/embed/`
/// - Anything else is taken to be a video ID already
pub fn resolve_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.len() < MIN_VIDEO_INPUT_LEN {
        return None;
    }

    if !input.starts_with("https://") {
        return Some(input.to_string());
    }

    let url = Url::parse(input).ok()?;

    if let Some((_, v)) = url.query_pairs().find(|(key, _)| key == "v") {
        if !v.is_empty() {
            return Some(v.into_owned());
        }
    }

    extract_from_embed_path(url.path())
}

/// Extract the ID from a `/embed/VIDEO_ID` path.
fn extract_from_embed_path(path: &str) -> Option<String> {
    let start = path.find(EMBED_SEGMENT)? + EMBED_SEGMENT.len();
    let id = &path[start..];
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Normalize an upstream page token; a missing token means "no further page".
pub fn normalize_page_token(token: Option<String>) -> String {
    token.unwrap_or_default()
}

/// How the browser client presents a failed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Token rejected or quota exhausted; the user should supply their own API key
    Auth,
    /// Anything else
    Generic,
}

impl ErrorClass {
    /// GraphQL error code reserved for the auth/quota class.
    pub const AUTH_CODE: &'static str = "UNAUTHENTICATED";

    /// Classify a GraphQL error by its `extensions.code`.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some(Self::AUTH_CODE) => ErrorClass::Auth,
            _ => ErrorClass::Generic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_video_id() {
        assert_eq!(resolve_video_id("PZmCYeG3uh4"), Some("PZmCYeG3uh4".to_string()));
        assert_eq!(resolve_video_id("  PZmCYeG3uh4 "), Some("PZmCYeG3uh4".to_string()));
    }

    #[test]
    fn test_resolve_rejects_short_input() {
        assert_eq!(resolve_video_id(""), None);
        assert_eq!(resolve_video_id("abc1234"), None);
    }

    #[test]
    fn test_resolve_watch_url() {
        assert_eq!(
            resolve_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            resolve_video_id("https://www.youtube.com/watch?list=PL1&v=dQw4w9WgXcQ&t=30"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_resolve_embed_url() {
        assert_eq!(
            resolve_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            resolve_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_resolve_unrecognized_url() {
        assert_eq!(resolve_video_id("https://www.youtube.com/feed/trending"), None);
        assert_eq!(resolve_video_id("https://www.youtube.com/embed/"), None);
        assert_eq!(resolve_video_id("https://www.youtube.com/watch?v="), None);
    }

    #[test]
    fn test_normalize_page_token() {
        assert_eq!(normalize_page_token(None), "");
        assert_eq!(normalize_page_token(Some("CAoQAA".to_string())), "CAoQAA");
    }

    #[test]
    fn test_error_class_from_code() {
        assert_eq!(ErrorClass::from_code(Some("UNAUTHENTICATED")), ErrorClass::Auth);
        assert_eq!(ErrorClass::from_code(Some("INTERNAL_SERVER_ERROR")), ErrorClass::Generic);
        assert_eq!(ErrorClass::from_code(None), ErrorClass::Generic);
    }
}

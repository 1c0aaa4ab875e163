//! Shared data models for the YouTube comment analyzer.
//!
//! This crate provides Serde-serializable types for:
//! - Comments as fetched from YouTube and as annotated by the analysis pipeline
//! - Inference results (detected language, translation, sentiment)
//! - Related videos
//! - Page-token normalization and video ID resolution

pub mod comment;
pub mod inference;
pub mod utils;
pub mod video;

// Re-export common types
pub use comment::{AnalyzedComment, Comment, CommentAnalysis, CommentPage};
pub use inference::{DetectedLanguage, Sentiment, Translation};
pub use utils::{normalize_page_token, resolve_video_id, ErrorClass};
pub use video::{RelatedVideo, RelatedVideos};

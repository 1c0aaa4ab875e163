//! Business logic services.

pub mod comment_analysis;
pub mod related_videos;

pub use comment_analysis::{analyze_comments, COMMENTS_PAGE_SIZE};
pub use related_videos::{get_related_videos, DEFAULT_RELATED_VIDEOS, MAX_RELATED_VIDEOS};

//! YouTube client error types.

use thiserror::Error;

pub type YoutubeResult<T> = Result<T, YoutubeError>;

#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("YouTube API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("YouTube API quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl YoutubeError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, YoutubeError::QuotaExceeded(_))
    }
}

//! Inference client error types.

use thiserror::Error;

pub type InferenceResult<T> = Result<T, InferenceError>;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("No bearer token available for the inference gateway")]
    MissingToken,

    #[error("Inference gateway rejected the token ({0})")]
    Unauthorized(u16),

    #[error("Inference gateway returned {status}: {body}")]
    Status { status: u16, body: String },

    /// HTTP 200 whose payload is an error envelope.
    #[error("{0}")]
    Embedded(String),

    #[error("No translation endpoint for language: {0}")]
    UnsupportedLanguage(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl InferenceError {
    /// The gateway refused the caller's credentials or quota.
    pub fn is_auth(&self) -> bool {
        matches!(self, InferenceError::MissingToken | InferenceError::Unauthorized(_))
    }
}

//! Comment models.

use serde::{Deserialize, Serialize};

use crate::inference::{Sentiment, Translation};

/// Top-level YouTube comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub text: String,
    pub published_at: String,
    pub like_count: u64,
}

/// One page of comments as returned by the comment-threads API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    /// Empty when there are no further pages
    pub next_page_token: String,
}

/// Comment annotated with its sentiment and, when it was not in English,
/// the translation the sentiment was computed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedComment {
    #[serde(flatten)]
    pub comment: Comment,
    pub sentiment_label: String,
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<Translation>,
}

impl AnalyzedComment {
    pub fn new(comment: Comment, translation: Option<Translation>, sentiment: Sentiment) -> Self {
        Self {
            comment,
            sentiment_label: sentiment.label,
            confidence_score: sentiment.score,
            translation,
        }
    }

    pub fn sentiment(&self) -> Sentiment {
        Sentiment::new(self.sentiment_label.clone(), self.confidence_score)
    }
}

/// Result of analyzing one page of comments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAnalysis {
    /// Same order as the fetched comments
    pub results: Vec<AnalyzedComment>,
    pub next_page_token: String,
}

impl CommentAnalysis {
    pub fn empty() -> Self {
        Self::default()
    }
}

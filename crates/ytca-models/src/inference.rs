//! Inference result models.

use serde::{Deserialize, Serialize};

/// Label reported when the sentiment classifier returns no classification.
pub const UNKNOWN_SENTIMENT_LABEL: &str = "UNKNOWN";

/// Top language classification for a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedLanguage {
    /// Language code as reported by the detector (e.g. `fr`, `zh_cht`)
    pub label: String,
    /// Classifier confidence
    pub score: f64,
}

impl DetectedLanguage {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Both label and score carry a usable value.
    pub fn is_present(&self) -> bool {
        !self.label.is_empty() && self.score > 0.0
    }
}

/// English translation of a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
    /// Normalized source language code used to pick the translation endpoint
    pub source_language: String,
    /// Confidence of the language detection that triggered the translation
    pub score: f64,
}

/// Sentiment classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: String,
    pub score: f64,
}

impl Sentiment {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Sentinel used when the classifier answers with an empty result set.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_SENTIMENT_LABEL, 0.0)
    }
}

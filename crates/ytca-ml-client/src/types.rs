//! Inference gateway request/response types.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ytca_models::{DetectedLanguage, Sentiment};

use crate::error::{InferenceError, InferenceResult};

/// Request body shared by every gateway model.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest<'a> {
    pub input: &'a str,
}

/// Response envelope.
///
/// A success is `{response: [...]}`. The gateway sometimes answers HTTP 200
/// with an error envelope (`statusCode` + `body`) instead, either at the top
/// level or inside `response`. Only a JSON object carrying `statusCode` counts
/// as such an envelope; any other unexpected shape is an invalid response.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayResponse<T> {
    Items(Vec<T>),
    Embedded(EmbeddedError),
}

/// Error wrapped in a successful HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedError {
    pub status_code: Value,
    pub body: Value,
}

impl EmbeddedError {
    /// Read an error envelope; `None` unless `value` is an object with `statusCode`.
    fn from_envelope(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let status_code = object.get("statusCode")?.clone();
        Some(Self {
            status_code,
            body: object.get("body").cloned().unwrap_or(Value::Null),
        })
    }

    /// Text of the embedded body, falling back to the status code.
    pub fn message(&self) -> String {
        match &self.body {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Null => format!("Inference gateway error {}", self.status_code),
            other => other.to_string(),
        }
    }
}

impl<T: DeserializeOwned> GatewayResponse<T> {
    /// Classify a decoded gateway payload.
    pub fn from_value(payload: Value) -> InferenceResult<Self> {
        if let Some(embedded) = EmbeddedError::from_envelope(&payload) {
            return Ok(Self::Embedded(embedded));
        }

        let response = payload
            .get("response")
            .ok_or_else(|| InferenceError::InvalidResponse("missing `response` field".to_string()))?;

        if let Some(embedded) = EmbeddedError::from_envelope(response) {
            return Ok(Self::Embedded(embedded));
        }

        Vec::<T>::deserialize(response)
            .map(Self::Items)
            .map_err(|e| InferenceError::InvalidResponse(format!("unexpected `response` shape: {}", e)))
    }
}

impl<T> GatewayResponse<T> {
    /// Unwrap the result list, raising embedded errors.
    pub fn into_items(self) -> InferenceResult<Vec<T>> {
        match self {
            GatewayResponse::Items(items) => Ok(items),
            GatewayResponse::Embedded(e) => Err(InferenceError::Embedded(e.message())),
        }
    }
}

/// Single classification emitted by the detection and sentiment models.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Classification {
    pub label: String,
    pub score: f64,
}

/// Highest-scoring classification; the first one wins ties.
pub fn top_classification(items: Vec<Classification>) -> Option<Classification> {
    items.into_iter().fold(None, |best, item| match best {
        Some(b) if b.score >= item.score => Some(b),
        _ => Some(item),
    })
}

impl From<Classification> for DetectedLanguage {
    fn from(c: Classification) -> Self {
        DetectedLanguage::new(c.label, c.score)
    }
}

impl From<Classification> for Sentiment {
    fn from(c: Classification) -> Self {
        Sentiment::new(c.label, c.score)
    }
}

/// Single output of a translation model.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationOutput {
    #[serde(alias = "translatedText")]
    pub translation_text: String,
}

/// Translated text together with the language it was translated from.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedText {
    pub translated_text: String,
    pub source_language: String,
}

//! Inference gateway HTTP client.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};
use ytca_models::{DetectedLanguage, Sentiment};

use crate::error::{InferenceError, InferenceResult};
use crate::language::{translation_endpoint, SUPPORTED_SOURCE_LANGUAGES};
use crate::types::{
    top_classification, Classification, GatewayResponse, InferenceRequest, TranslatedText,
    TranslationOutput,
};

/// Configuration for the inference client.
#[derive(Debug, Clone)]
pub struct InferenceClientConfig {
    /// Base URL of the gateway; model endpoints are resolved below it
    pub base_url: String,
    /// Server-side key used when the caller does not supply a bearer token
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Endpoint of the language detection model
    pub language_detection_endpoint: String,
    /// Endpoint of the sentiment model
    pub sentiment_endpoint: String,
}

impl Default for InferenceClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            language_detection_endpoint: "language-detection".to_string(),
            sentiment_endpoint: "sentiment-analysis".to_string(),
        }
    }
}

impl InferenceClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("INFERENCE_API_URL").unwrap_or(defaults.base_url),
            api_key: std::env::var("INFERENCE_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            timeout: std::env::var("INFERENCE_API_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            language_detection_endpoint: std::env::var("INFERENCE_LANGUAGE_DETECTION_ENDPOINT")
                .unwrap_or(defaults.language_detection_endpoint),
            sentiment_endpoint: std::env::var("INFERENCE_SENTIMENT_ENDPOINT")
                .unwrap_or(defaults.sentiment_endpoint),
        }
    }
}

/// Client for the inference gateway.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: Client,
    config: InferenceClientConfig,
}

impl InferenceClient {
    /// Create a new inference client.
    pub fn new(config: InferenceClientConfig) -> InferenceResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(InferenceError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> InferenceResult<Self> {
        Self::new(InferenceClientConfig::from_env())
    }

    /// Pick the bearer token for a request: the caller's own, else the server key.
    pub fn resolve_token(&self, inbound: Option<&str>) -> InferenceResult<String> {
        inbound
            .filter(|token| !token.is_empty())
            .or(self.config.api_key.as_deref())
            .map(str::to_string)
            .ok_or(InferenceError::MissingToken)
    }

    /// Detect the language of `text`; `Ok(None)` when the model returns nothing.
    ///
    /// Callers treat a failure as "language unknown" rather than aborting.
    pub async fn detect_language(
        &self,
        text: &str,
        token: &str,
    ) -> InferenceResult<Option<DetectedLanguage>> {
        let items: Vec<Classification> = self
            .infer(&self.config.language_detection_endpoint, text, token)
            .await?;
        Ok(top_classification(items).map(DetectedLanguage::from))
    }

    /// Translate `text` from `source_language` to English.
    ///
    /// `source_language` must be one of [`SUPPORTED_SOURCE_LANGUAGES`].
    pub async fn translate_to_english(
        &self,
        text: &str,
        source_language: &str,
        token: &str,
    ) -> InferenceResult<TranslatedText> {
        if !SUPPORTED_SOURCE_LANGUAGES.contains(&source_language) {
            return Err(InferenceError::UnsupportedLanguage(source_language.to_string()));
        }

        let endpoint = translation_endpoint(source_language);
        let items: Vec<TranslationOutput> = self.infer(&endpoint, text, token).await?;
        let output = items.into_iter().next().ok_or_else(|| {
            InferenceError::InvalidResponse(format!("{} returned no translation", endpoint))
        })?;

        Ok(TranslatedText {
            translated_text: output.translation_text,
            source_language: source_language.to_string(),
        })
    }

    /// Classify the sentiment of `text`.
    ///
    /// An empty classification list yields [`Sentiment::unknown`].
    pub async fn classify_sentiment(&self, text: &str, token: &str) -> InferenceResult<Sentiment> {
        let items: Vec<Classification> = self
            .infer(&self.config.sentiment_endpoint, text, token)
            .await?;
        Ok(top_classification(items)
            .map(Sentiment::from)
            .unwrap_or_else(Sentiment::unknown))
    }

    /// POST `{input}` to a model endpoint and unwrap its result list.
    async fn infer<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        input: &str,
        token: &str,
    ) -> InferenceResult<Vec<T>> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint);

        debug!("Sending inference request to {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&InferenceRequest { input })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(endpoint, status = %status, "Inference request failed");
            return Err(classify_failure(status, body));
        }

        let bytes = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&bytes).map_err(|e| {
            InferenceError::InvalidResponse(format!("Failed to parse {} response: {}", endpoint, e))
        })?;

        GatewayResponse::<T>::from_value(payload)
            .and_then(GatewayResponse::into_items)
            .inspect_err(|e| {
                error!(endpoint, error = %e, "Inference gateway returned an unusable response");
            })
    }
}

fn classify_failure(status: StatusCode, body: String) -> InferenceError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            InferenceError::Unauthorized(status.as_u16())
        }
        _ => InferenceError::Status {
            status: status.as_u16(),
            body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> InferenceClient {
        InferenceClient::new(InferenceClientConfig {
            base_url: server.uri(),
            api_key: Some("server-key".to_string()),
            timeout: Duration::from_secs(5),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = InferenceClientConfig::default();
        assert_eq!(config.language_detection_endpoint, "language-detection");
        assert_eq!(config.sentiment_endpoint, "sentiment-analysis");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_resolve_token_prefers_caller() {
        let client = InferenceClient::new(InferenceClientConfig {
            api_key: Some("server-key".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.resolve_token(Some("user-key")).unwrap(), "user-key");
        assert_eq!(client.resolve_token(Some("")).unwrap(), "server-key");
        assert_eq!(client.resolve_token(None).unwrap(), "server-key");

        let keyless = InferenceClient::new(InferenceClientConfig::default()).unwrap();
        assert!(matches!(keyless.resolve_token(None), Err(InferenceError::MissingToken)));
    }

    #[tokio::test]
    async fn test_detect_language_returns_top_label() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/language-detection"))
            .and(header("authorization", "Bearer user-key"))
            .and(body_json(json!({"input": "Bonjour le monde"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": [{"label": "fr", "score": 0.9}, {"label": "it", "score": 0.04}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let detected = client_for(&server)
            .detect_language("Bonjour le monde", "user-key")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detected, DetectedLanguage::new("fr", 0.9));
    }

    #[tokio::test]
    async fn test_detect_language_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/language-detection"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let result = client_for(&server).detect_language("hola", "user-key").await;
        assert!(matches!(result, Err(InferenceError::Status { status: 502, .. })));
    }

    #[tokio::test]
    async fn test_translate_uses_language_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translation-fr-en"))
            .and(body_json(json!({"input": "Bonjour le monde"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": [{"translation_text": "Hello world"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let translated = client_for(&server)
            .translate_to_english("Bonjour le monde", "fr", "user-key")
            .await
            .unwrap();
        assert_eq!(translated.translated_text, "Hello world");
        assert_eq!(translated.source_language, "fr");
    }

    #[tokio::test]
    async fn test_translate_rejects_unsupported_language() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .translate_to_english("Olá mundo", "pt", "user-key")
            .await;
        assert!(matches!(result, Err(InferenceError::UnsupportedLanguage(_))));
    }

    #[tokio::test]
    async fn test_sentiment_empty_list_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sentiment-analysis"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": []})))
            .mount(&server)
            .await;

        let sentiment = client_for(&server)
            .classify_sentiment("meh", "user-key")
            .await
            .unwrap();
        assert_eq!(sentiment, Sentiment::unknown());
    }

    #[tokio::test]
    async fn test_sentiment_embedded_error_is_raised() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sentiment-analysis"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "statusCode": 500,
                "body": "Internal model error"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .classify_sentiment("Great video", "user-key")
            .await
            .unwrap_err();
        match err {
            InferenceError::Embedded(msg) => assert_eq!(msg, "Internal model error"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejected_token_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sentiment-analysis"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .classify_sentiment("Great video", "bad-key")
            .await
            .unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_malformed_sentiment_list_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sentiment-analysis"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": [[{"label": "POSITIVE", "score": 0.9}]]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .classify_sentiment("Great video", "user-key")
            .await
            .unwrap_err();
        assert!(matches!(err, InferenceError::InvalidResponse(_)));
    }
}

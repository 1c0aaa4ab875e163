//! Comment analysis pipeline.
//!
//! One page of comments moves through five stages, strictly in order:
//!
//! 1. fetch: up to [`COMMENTS_PAGE_SIZE`] top comments
//! 2. detect: language of every comment, best effort
//! 3. translate: to English, for comments in a supported language
//! 4. classify: sentiment of the translation, or of the original text
//! 5. assemble: annotated comments in fetch order
//!
//! Within a stage every outbound call is issued concurrently and the stage
//! ends once all of them have settled. A failed language detection degrades
//! to "unknown language"; a failed fetch, translation or classification
//! aborts the whole request.

use std::time::Instant;

use futures::future::join_all;
use tracing::{debug, info, warn};
use ytca_ml_client::{translation_source, InferenceClient, InferenceResult};
use ytca_models::{
    AnalyzedComment, Comment, CommentAnalysis, DetectedLanguage, Sentiment, Translation,
};
use ytca_youtube::YoutubeClient;

use crate::error::ApiResult;
use crate::metrics;

/// Comments analyzed per request.
pub const COMMENTS_PAGE_SIZE: u32 = 10;

/// Comment after the detect stage.
#[derive(Debug, Clone)]
struct DetectedComment {
    comment: Comment,
    language: Option<DetectedLanguage>,
}

/// Comment after the translate stage.
#[derive(Debug, Clone)]
struct TranslatedComment {
    comment: Comment,
    translation: Option<Translation>,
}

impl TranslatedComment {
    fn untranslated(comment: Comment) -> Self {
        Self {
            comment,
            translation: None,
        }
    }

    /// Text the sentiment model sees.
    fn sentiment_input(&self) -> &str {
        self.translation
            .as_ref()
            .map(|t| t.translated_text.as_str())
            .unwrap_or(&self.comment.text)
    }
}

/// Analyze one page of comments on `video_id`.
///
/// `bearer` is the caller's inference token; without one the server key is used.
pub async fn analyze_comments(
    youtube: &YoutubeClient,
    inference: &InferenceClient,
    video_id: &str,
    page_token: &str,
    bearer: Option<&str>,
) -> ApiResult<CommentAnalysis> {
    let started = Instant::now();

    let page = youtube
        .fetch_comments(video_id, COMMENTS_PAGE_SIZE, Some(page_token))
        .await;
    metrics::record_upstream_call("youtube", page.is_ok());
    let page = page?;
    metrics::record_pipeline_stage("fetch", started.elapsed().as_secs_f64());

    if page.comments.is_empty() {
        debug!(video_id = %video_id, "No comments on this page");
        return Ok(CommentAnalysis::empty());
    }

    let token = inference.resolve_token(bearer)?;
    let count = page.comments.len();

    let detected = detect_languages(inference, page.comments, &token).await;
    let translated = translate_comments(inference, detected, &token).await?;
    let sentiments = classify_comments(inference, &translated, &token).await?;

    let stage = Instant::now();
    let results = translated
        .into_iter()
        .zip(sentiments)
        .map(|(t, sentiment)| AnalyzedComment::new(t.comment, t.translation, sentiment))
        .collect::<Vec<_>>();
    metrics::record_pipeline_stage("assemble", stage.elapsed().as_secs_f64());

    info!(
        video_id = %video_id,
        comments = count,
        translated = results.iter().filter(|r| r.translation.is_some()).count(),
        duration_ms = %started.elapsed().as_millis(),
        "Analyzed comments"
    );

    Ok(CommentAnalysis {
        results,
        next_page_token: page.next_page_token,
    })
}

async fn detect_languages(
    inference: &InferenceClient,
    comments: Vec<Comment>,
    token: &str,
) -> Vec<DetectedComment> {
    let stage = Instant::now();

    let languages = join_all(comments.iter().map(|c| detect_one(inference, &c.text, token))).await;
    metrics::record_pipeline_stage("detect", stage.elapsed().as_secs_f64());

    comments
        .into_iter()
        .zip(languages)
        .map(|(comment, language)| DetectedComment { comment, language })
        .collect()
}

/// Best effort: a failed detection leaves the language unknown.
async fn detect_one(inference: &InferenceClient, text: &str, token: &str) -> Option<DetectedLanguage> {
    let result = inference.detect_language(text, token).await;
    metrics::record_upstream_call("inference", result.is_ok());

    result.unwrap_or_else(|e| {
        warn!(error = %e, "Language detection failed, treating language as unknown");
        None
    })
}

async fn translate_comments(
    inference: &InferenceClient,
    detected: Vec<DetectedComment>,
    token: &str,
) -> InferenceResult<Vec<TranslatedComment>> {
    let stage = Instant::now();

    let translated = join_all(detected.into_iter().map(|d| translate_one(inference, d, token))).await;
    metrics::record_pipeline_stage("translate", stage.elapsed().as_secs_f64());

    translated.into_iter().collect()
}

async fn translate_one(
    inference: &InferenceClient,
    detected: DetectedComment,
    token: &str,
) -> InferenceResult<TranslatedComment> {
    let DetectedComment { comment, language } = detected;

    let Some(language) = language else {
        return Ok(TranslatedComment::untranslated(comment));
    };
    let Some(source) = translation_source(&language) else {
        return Ok(TranslatedComment::untranslated(comment));
    };

    let result = inference
        .translate_to_english(&comment.text, source, token)
        .await;
    metrics::record_upstream_call("inference", result.is_ok());
    let translated = result?;

    Ok(TranslatedComment {
        comment,
        translation: Some(Translation {
            translated_text: translated.translated_text,
            source_language: translated.source_language,
            score: language.score,
        }),
    })
}

async fn classify_comments(
    inference: &InferenceClient,
    translated: &[TranslatedComment],
    token: &str,
) -> InferenceResult<Vec<Sentiment>> {
    let stage = Instant::now();

    let sentiments = join_all(
        translated
            .iter()
            .map(|t| inference.classify_sentiment(t.sentiment_input(), token)),
    )
    .await;

    for sentiment in &sentiments {
        metrics::record_upstream_call("inference", sentiment.is_ok());
    }
    metrics::record_pipeline_stage("classify", stage.elapsed().as_secs_f64());

    sentiments.into_iter().collect()
}

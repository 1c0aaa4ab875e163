//! GraphQL schema.
//!
//! Both queries return an open `JSON` value. The pre-rename field names the
//! first browser client used remain as deprecated aliases.

use std::sync::Arc;

use async_graphql::{Context, EmptyMutation, EmptySubscription, ErrorExtensions, Json, Object, Schema};
use tracing::debug;
use ytca_ml_client::InferenceClient;
use ytca_models::{resolve_video_id, CommentAnalysis, RelatedVideos};
use ytca_youtube::YoutubeClient;

use crate::error::{ApiError, ApiResult};
use crate::services::{analyze_comments, get_related_videos};

pub type AnalyzerSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Upstream clients shared by every request.
#[derive(Clone)]
pub struct Services {
    pub youtube: Arc<YoutubeClient>,
    pub inference: Arc<InferenceClient>,
    /// Log resolver arguments and request context
    pub debug: bool,
}

/// Per-request data taken from the inbound HTTP request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Bearer token forwarded to the inference gateway
    pub bearer: Option<String>,
    pub request_id: Option<String>,
}

/// Build the schema around the upstream clients.
pub fn build_schema(services: Services) -> AnalyzerSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(services)
        .limit_depth(16)
        .finish()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Analyze the sentiment of one page of top comments on a video.
    async fn analyze_comments(
        &self,
        ctx: &Context<'_>,
        video_id: String,
        page_token: Option<String>,
    ) -> async_graphql::Result<Json<CommentAnalysis>> {
        self.run_analyze_comments(ctx, video_id, page_token).await
    }

    /// Fetch videos related to a video.
    async fn get_related_videos(
        &self,
        ctx: &Context<'_>,
        video_id: String,
        page_token: Option<String>,
        max_results: Option<i32>,
    ) -> async_graphql::Result<Json<RelatedVideos>> {
        self.run_get_related_videos(ctx, video_id, page_token, max_results)
            .await
    }

    #[graphql(deprecation = "Use analyzeComments")]
    async fn analyze_youtube_comments(
        &self,
        ctx: &Context<'_>,
        video_id: String,
        page_token: Option<String>,
    ) -> async_graphql::Result<Json<CommentAnalysis>> {
        self.run_analyze_comments(ctx, video_id, page_token).await
    }

    #[graphql(deprecation = "Use getRelatedVideos")]
    async fn get_youtube_related_videos(
        &self,
        ctx: &Context<'_>,
        video_id: String,
        page_token: Option<String>,
        max_results: Option<i32>,
    ) -> async_graphql::Result<Json<RelatedVideos>> {
        self.run_get_related_videos(ctx, video_id, page_token, max_results)
            .await
    }
}

impl QueryRoot {
    async fn run_analyze_comments(
        &self,
        ctx: &Context<'_>,
        video_id: String,
        page_token: Option<String>,
    ) -> async_graphql::Result<Json<CommentAnalysis>> {
        let services = ctx.data::<Services>()?;
        let request = ctx.data_opt::<RequestContext>();
        let page_token = page_token.unwrap_or_default();

        if services.debug {
            log_resolver("analyzeComments", &video_id, &page_token, None, request);
        }

        let video_id = require_video_id(&video_id).map_err(|e| e.extend())?;
        analyze_comments(
            &services.youtube,
            &services.inference,
            &video_id,
            &page_token,
            request.and_then(|r| r.bearer.as_deref()),
        )
        .await
        .map(Json)
        .map_err(|e| e.extend())
    }

    async fn run_get_related_videos(
        &self,
        ctx: &Context<'_>,
        video_id: String,
        page_token: Option<String>,
        max_results: Option<i32>,
    ) -> async_graphql::Result<Json<RelatedVideos>> {
        let services = ctx.data::<Services>()?;
        let request = ctx.data_opt::<RequestContext>();
        let page_token = page_token.unwrap_or_default();

        if services.debug {
            log_resolver("getRelatedVideos", &video_id, &page_token, max_results, request);
        }

        let video_id = require_video_id(&video_id).map_err(|e| e.extend())?;
        let max_results = max_results.map(|n| n.max(0) as u32);
        get_related_videos(&services.youtube, &video_id, &page_token, max_results)
            .await
            .map(Json)
            .map_err(|e| e.extend())
    }
}

fn require_video_id(input: &str) -> ApiResult<String> {
    resolve_video_id(input)
        .ok_or_else(|| ApiError::bad_request("videoId is not a YouTube video ID or URL"))
}

fn log_resolver(
    field: &str,
    video_id: &str,
    page_token: &str,
    max_results: Option<i32>,
    request: Option<&RequestContext>,
) {
    debug!(
        field,
        video_id,
        page_token,
        ?max_results,
        request_id = ?request.and_then(|r| r.request_id.as_deref()),
        has_bearer = request.is_some_and(|r| r.bearer.is_some()),
        "Resolving query"
    );
}

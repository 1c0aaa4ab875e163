//! API error types.
//!
//! Upstream failures are collapsed here: the caller learns that an API call
//! failed and, through the error code, whether re-authenticating could help.
//! Details stay in the logs.

use async_graphql::ErrorExtensions;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use ytca_ml_client::InferenceError;
use ytca_youtube::YoutubeError;

pub type ApiResult<T> = Result<T, ApiError>;

/// GraphQL error codes, following the Apollo server convention.
pub mod codes {
    pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const RATE_LIMITED: &str = "RATE_LIMITED";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Token rejected, token missing, or quota exhausted upstream.
    #[error("API call failed")]
    Unauthenticated,

    /// Any other transport or upstream failure.
    #[error("API call failed")]
    ApiCallFailed,

    /// Error message embedded in an otherwise successful upstream response.
    #[error("{0}")]
    Upstream(String),

    #[error("Rate limited")]
    RateLimited,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Error code reported in GraphQL `extensions.code` and REST bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => codes::BAD_USER_INPUT,
            ApiError::Unauthenticated => codes::UNAUTHENTICATED,
            ApiError::RateLimited => codes::RATE_LIMITED,
            ApiError::ApiCallFailed | ApiError::Upstream(_) => codes::INTERNAL_SERVER_ERROR,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::ApiCallFailed | ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<YoutubeError> for ApiError {
    fn from(e: YoutubeError) -> Self {
        error!(error = %e, "YouTube API call failed");
        match e {
            YoutubeError::InvalidArgument(msg) => ApiError::BadRequest(msg),
            e if e.is_quota_exceeded() => ApiError::Unauthenticated,
            _ => ApiError::ApiCallFailed,
        }
    }
}

impl From<InferenceError> for ApiError {
    fn from(e: InferenceError) -> Self {
        error!(error = %e, "Inference API call failed");
        match e {
            e if e.is_auth() => ApiError::Unauthenticated,
            InferenceError::Embedded(msg) => ApiError::Upstream(msg),
            _ => ApiError::ApiCallFailed,
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| ext.set("code", self.code()))
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.to_string(),
            code: self.code(),
        };

        let mut response = (self.status_code(), Json(body)).into_response();
        if matches!(self, ApiError::RateLimited) {
            response
                .headers_mut()
                .insert("Retry-After", axum::http::HeaderValue::from_static("1"));
        }
        response
    }
}

//! Axum GraphQL API server.
//!
//! This crate provides:
//! - A single GraphQL endpoint exposing comment analysis and related videos
//! - The comment-analysis and related-videos pipelines behind it
//! - CORS allow-listing, rate limiting and security headers
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use schema::{build_schema, AnalyzerSchema};
pub use state::AppState;

//! Client for the YouTube Data API.
//!
//! Wraps the two read-only calls the comment analyzer needs:
//! - `search` scoped to videos related to a given video
//! - `commentThreads` ordered by relevance

pub mod client;
pub mod error;
pub mod types;

pub use client::{YoutubeClient, YoutubeClientConfig, DEFAULT_MAX_RESULTS};
pub use error::{YoutubeError, YoutubeResult};

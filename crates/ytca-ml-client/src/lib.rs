//! Client for the hosted ML inference gateway.
//!
//! Every model behind the gateway shares one contract: `POST {input}` with a
//! bearer token, answered by `{response: [...]}`. This crate wraps the three
//! models the comment analyzer chains together:
//! - language detection
//! - translation to English (one endpoint per source language)
//! - sentiment classification

pub mod client;
pub mod error;
pub mod language;
pub mod types;

pub use client::{InferenceClient, InferenceClientConfig};
pub use error::{InferenceError, InferenceResult};
pub use language::{translation_endpoint, translation_source, SUPPORTED_SOURCE_LANGUAGES};
pub use types::TranslatedText;

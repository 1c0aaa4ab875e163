//! Application state.

use std::sync::Arc;

use ytca_ml_client::{InferenceClient, InferenceClientConfig};
use ytca_youtube::{YoutubeClient, YoutubeClientConfig};

use crate::config::ApiConfig;
use crate::schema::{build_schema, AnalyzerSchema, Services};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub schema: AnalyzerSchema,
}

impl AppState {
    /// Create application state, building the upstream clients from their configs.
    pub fn new(
        config: ApiConfig,
        youtube: YoutubeClientConfig,
        inference: InferenceClientConfig,
    ) -> anyhow::Result<Self> {
        let youtube = YoutubeClient::new(youtube)?;
        let inference = InferenceClient::new(inference)?;
        Ok(Self::from_clients(config, youtube, inference))
    }

    /// Create application state around existing clients.
    pub fn from_clients(config: ApiConfig, youtube: YoutubeClient, inference: InferenceClient) -> Self {
        let schema = build_schema(Services {
            youtube: Arc::new(youtube),
            inference: Arc::new(inference),
            debug: config.is_debug(),
        });

        Self { config, schema }
    }
}

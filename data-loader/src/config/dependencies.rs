//! Dependency initialization and wiring for the data loader.

use std::sync::Arc;
use tracing::info;

use crate::config::LoaderConfig;
use crate::LoaderError;
use data_loader_ingest::{ProviderFactory, Uploader};
use data_loader_repository::{
    OpenSearchClient, SearchIndexConfig, SearchIndexError, SearchIndexProvider,
};

/// Builds a new OpenSearch client for every upload.
#[derive(Debug, Clone)]
pub struct OpenSearchFactory {
    url: String,
    config: SearchIndexConfig,
}

impl OpenSearchFactory {
    pub fn new(url: impl Into<String>, config: SearchIndexConfig) -> Self {
        Self {
            url: url.into(),
            config,
        }
    }
}

impl ProviderFactory for OpenSearchFactory {
    fn connect(&self) -> Result<Box<dyn SearchIndexProvider>, SearchIndexError> {
        let client = OpenSearchClient::new(&self.url, self.config.clone())?;
        Ok(Box::new(client))
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The uploader ready to run.
    pub uploader: Uploader,
}

impl Dependencies {
    /// Initialize all dependencies from the loader configuration.
    ///
    /// The cluster is probed once through a short-lived connection; each
    /// upload opens its own.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(LoaderError)` - If the cluster is unreachable or unhealthy
    pub async fn new(config: &LoaderConfig) -> Result<Self, LoaderError> {
        info!(
            opensearch_url = %config.opensearch_url,
            bulk_chunk_size = config.bulk_chunk_size,
            "Initializing dependencies"
        );

        let factory = OpenSearchFactory::new(
            config.opensearch_url.clone(),
            SearchIndexConfig::with_bulk_chunk_size(config.bulk_chunk_size),
        );

        let probe = factory
            .connect()
            .map_err(|e| LoaderError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        let healthy = probe
            .health_check()
            .await
            .map_err(|e| LoaderError::config(format!("OpenSearch health check failed: {}", e)))?;

        if !healthy {
            return Err(LoaderError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        Ok(Self {
            uploader: Uploader::new(Arc::new(factory)),
        })
    }
}

//! Configuration for the data loader.

mod dependencies;

pub use dependencies::{Dependencies, OpenSearchFactory};

use data_loader_repository::config::DEFAULT_BULK_CHUNK_SIZE;

/// Default OpenSearch URL.
pub const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Parse the value of `LOG_FORMAT`. Anything but `json` means pretty.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pretty,
        }
    }

    /// Read the format from the `LOG_FORMAT` environment variable.
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

/// Settings for one loader run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// OpenSearch server URL.
    pub opensearch_url: String,
    /// Actions per bulk request.
    pub bulk_chunk_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            opensearch_url: DEFAULT_OPENSEARCH_URL.to_string(),
            bulk_chunk_size: DEFAULT_BULK_CHUNK_SIZE,
        }
    }
}

impl LoaderConfig {
    pub fn new(opensearch_url: impl Into<String>, bulk_chunk_size: usize) -> Self {
        Self {
            opensearch_url: opensearch_url.into(),
            bulk_chunk_size,
        }
    }
}

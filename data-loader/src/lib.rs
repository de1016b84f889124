//! # Data Loader
//!
//! Main library for the research data loader.
//!
//! This crate provides the configuration, dependency wiring and example
//! input for uploading Opportunity and Project CSV files into the search
//! index.

pub mod config;
pub mod example_csv;

pub use config::{Dependencies, LoaderConfig, LogFormat, OpenSearchFactory};

use thiserror::Error;

/// Errors that can occur during loader initialization or execution.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Upload error.
    #[error("Upload error: {0}")]
    IngestError(#[from] data_loader_ingest::IngestError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] data_loader_repository::SearchIndexError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LoaderError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

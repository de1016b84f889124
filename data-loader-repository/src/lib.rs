//! # Data Loader Repository
//!
//! This crate provides the index definitions for each document type, the
//! `SearchIndexProvider` trait the ingest pipeline writes through, and a
//! concrete implementation for OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod schema;
pub mod types;

pub use config::SearchIndexConfig;
pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::OpenSearchClient;
pub use schema::{definition_for, IndexDefinition};
pub use types::{BulkOutcome, IndexStatus, RejectedItem};

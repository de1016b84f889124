//! Search index provider trait definition.
//!
//! This module defines the abstract interface for the search index operations
//! the loader needs, allowing for different backend implementations
//! (OpenSearch, Elasticsearch, in-memory mocks).

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::schema::IndexDefinition;
use crate::types::{BulkOutcome, IndexStatus};
use data_loader_shared::IndexAction;

/// Abstracts the underlying search index implementation.
///
/// Implementations are handed to the ingest pipeline for the duration of one
/// upload. All methods return `Result<T, SearchIndexError>` for consistent
/// error handling across backends.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Create the index described by `definition` unless it already exists.
    ///
    /// # Returns
    ///
    /// * `Ok(IndexStatus::Created)` - The index was created
    /// * `Ok(IndexStatus::AlreadyExists)` - The index existed and was left untouched
    /// * `Err(SearchIndexError)` - Any other failure (connectivity, authorization, bad mapping)
    async fn ensure_index(
        &self,
        definition: &IndexDefinition,
    ) -> Result<IndexStatus, SearchIndexError>;

    /// Delete an index. A missing index is not an error.
    async fn delete_index(&self, index_name: &str) -> Result<(), SearchIndexError>;

    /// Write all actions as one logical bulk operation.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkOutcome)` - Every action got a verdict; rejected items are listed
    /// * `Err(SearchIndexError)` - The bulk request itself failed
    async fn bulk_index(&self, actions: &[IndexAction]) -> Result<BulkOutcome, SearchIndexError>;

    /// Check if the search engine is healthy and reachable.
    async fn health_check(&self) -> Result<bool, SearchIndexError>;
}

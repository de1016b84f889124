//! Search index error types.
//!
//! This module defines the error types that can occur while talking to the
//! search engine. Per-document bulk rejections are not errors; they are
//! reported through `BulkOutcome`.

use thiserror::Error;

/// Errors that can occur during search index operations.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Failed to reach the search engine or build the transport.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Index creation failed for a reason other than the index already existing.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Index deletion failed.
    #[error("Index deletion error: {0}")]
    IndexDeletionError(String),

    /// The bulk request as a whole failed.
    #[error("Bulk operation error: {0}")]
    BulkOperationError(String),

    /// Failed to serialize a document for the search engine.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create an index deletion error.
    pub fn index_deletion(msg: impl Into<String>) -> Self {
        Self::IndexDeletionError(msg.into())
    }

    /// Create a bulk operation error.
    pub fn bulk_operation(msg: impl Into<String>) -> Self {
        Self::BulkOperationError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

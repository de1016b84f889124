//! Error types for the data loader ingest.

use std::num::ParseIntError;

use data_loader_repository::SearchIndexError;
use thiserror::Error;

/// Errors that abort a whole upload.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The search engine connection could not be set up.
    #[error("Connection error: {0}")]
    ConnectionError(#[source] SearchIndexError),

    /// The target index could not be provisioned; no rows were read.
    #[error("Provisioning error: {0}")]
    ProvisioningError(#[source] SearchIndexError),

    /// The bulk write itself failed; the counts are not reliable.
    #[error("Submission error: {0}")]
    SubmissionError(#[source] SearchIndexError),

    /// The input stream could not be read.
    #[error("Read error: {0}")]
    ReadError(String),
}

impl IngestError {
    /// Create a read error.
    pub fn read(msg: impl Into<String>) -> Self {
        Self::ReadError(msg.into())
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::ReadError(err.to_string())
    }
}

/// Errors that reject a single row. These are counted, never propagated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// A column the rules need is not in the header.
    #[error("missing field '{0}'")]
    MissingField(String),

    /// A column that must hold a base-10 integer does not.
    #[error("field '{field}' is not an integer: '{value}' ({source})")]
    InvalidInteger {
        field: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The row has a different number of values than the header has columns.
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// A value is not valid UTF-8.
    #[error("field {column} is not valid UTF-8")]
    InvalidEncoding { column: usize },
}

impl TransformError {
    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }
}

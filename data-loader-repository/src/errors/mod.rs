//! Error types for the data loader repository.

mod search_index_error;

pub use search_index_error::SearchIndexError;

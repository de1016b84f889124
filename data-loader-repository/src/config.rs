//! Configuration types for the search index provider.

/// Default number of actions sent per bulk request.
pub const DEFAULT_BULK_CHUNK_SIZE: usize = 500;

/// Configuration for the search index provider.
#[derive(Debug, Clone)]
pub struct SearchIndexConfig {
    /// Maximum number of actions sent in one bulk HTTP request.
    /// A larger write is split into consecutive requests of this size.
    /// Set to None to send every action in a single request.
    pub bulk_chunk_size: Option<usize>,
}

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            bulk_chunk_size: Some(DEFAULT_BULK_CHUNK_SIZE),
        }
    }
}

impl SearchIndexConfig {
    /// Create a config that never splits a bulk write.
    pub fn unlimited() -> Self {
        Self {
            bulk_chunk_size: None,
        }
    }

    /// Create a config with a custom chunk size. Zero is treated as one.
    pub fn with_bulk_chunk_size(bulk_chunk_size: usize) -> Self {
        Self {
            bulk_chunk_size: Some(bulk_chunk_size.max(1)),
        }
    }

    /// The chunk size to use for a write of `len` actions.
    pub fn chunk_size_for(&self, len: usize) -> usize {
        self.bulk_chunk_size.unwrap_or(len).max(1)
    }
}

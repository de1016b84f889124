//! Coordinator module for the data loader ingest.
//!
//! Writes transformed documents to the search index and reconciles the
//! engine's verdicts into the upload counts.

use tracing::{debug, info, instrument, warn};

use crate::errors::IngestError;
use data_loader_repository::SearchIndexProvider;
use data_loader_shared::UploadResult;

/// Submits the queued actions of an upload as one bulk write.
///
/// The coordinator is responsible for:
/// - Skipping the write entirely when nothing was queued
/// - Moving engine-rejected documents from `successful` to `failed`
/// - Letting transport failures reach the caller untouched
pub struct BulkIndexCoordinator<'a> {
    provider: &'a dyn SearchIndexProvider,
}

impl<'a> BulkIndexCoordinator<'a> {
    /// Create a coordinator backed by the given provider.
    pub fn new(provider: &'a dyn SearchIndexProvider) -> Self {
        Self { provider }
    }

    /// Submit the actions of `result` and return the reconciled result.
    ///
    /// # Returns
    ///
    /// * `Ok(UploadResult)` - Final counts; `total` is unchanged
    /// * `Err(IngestError::SubmissionError)` - The bulk write itself failed
    #[instrument(skip(self, result), fields(action_count = result.actions.len()))]
    pub async fn submit(&self, mut result: UploadResult) -> Result<UploadResult, IngestError> {
        if result.actions.is_empty() {
            debug!("No documents to submit");
            return Ok(result);
        }

        let outcome = self
            .provider
            .bulk_index(&result.actions)
            .await
            .map_err(IngestError::SubmissionError)?;

        for item in &outcome.rejected {
            warn!(
                id = %item.id,
                status = item.status,
                reason = %item.reason,
                "Document rejected by search engine"
            );
        }

        let moved = result.apply_rejections(outcome.rejected_count());

        info!(
            submitted = outcome.submitted,
            rejected = moved,
            successful = result.successful,
            failed = result.failed,
            "Bulk write completed"
        );
        Ok(result)
    }
}

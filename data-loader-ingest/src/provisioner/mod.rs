//! Provisioner module for the data loader ingest.
//!
//! Makes sure the target index exists before any document is written.

use tracing::{info, instrument};

use crate::errors::IngestError;
use data_loader_repository::{IndexDefinition, IndexStatus, SearchIndexProvider};

/// How an upload treats documents already in the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadMode {
    /// Add the new documents next to the existing ones.
    #[default]
    Append,
    /// Drop the index first, so it holds only the uploaded documents.
    Replace,
}

/// Idempotently creates indices through a search index provider.
pub struct IndexProvisioner<'a> {
    provider: &'a dyn SearchIndexProvider,
}

impl<'a> IndexProvisioner<'a> {
    /// Create a provisioner backed by the given provider.
    pub fn new(provider: &'a dyn SearchIndexProvider) -> Self {
        Self { provider }
    }

    /// Ensure the index described by `definition` exists.
    ///
    /// An existing index counts as success and keeps its mapping. In
    /// [`UploadMode::Replace`] the index is deleted and created anew.
    ///
    /// # Returns
    ///
    /// * `Ok(IndexStatus)` - The index is ready for writes
    /// * `Err(IngestError::ProvisioningError)` - Any other failure; the upload must stop
    #[instrument(skip(self, definition), fields(index = definition.index_name))]
    pub async fn ensure(
        &self,
        definition: &IndexDefinition,
        mode: UploadMode,
    ) -> Result<IndexStatus, IngestError> {
        if mode == UploadMode::Replace {
            self.provider
                .delete_index(definition.index_name)
                .await
                .map_err(IngestError::ProvisioningError)?;
        }

        let status = self
            .provider
            .ensure_index(definition)
            .await
            .map_err(IngestError::ProvisioningError)?;

        info!(status = ?status, mode = ?mode, "Index ready");
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use data_loader_repository::{definition_for, BulkOutcome, SearchIndexError};
    use data_loader_shared::{DocumentType, IndexAction};
    use serde_json::Value;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    /// In-memory provider holding index bodies by name.
    #[derive(Default)]
    struct MockProvider {
        indices: Mutex<HashMap<String, Value>>,
        deleted: Mutex<Vec<String>>,
        should_fail: bool,
    }

    #[async_trait]
    impl SearchIndexProvider for MockProvider {
        async fn ensure_index(
            &self,
            definition: &IndexDefinition,
        ) -> Result<IndexStatus, SearchIndexError> {
            if self.should_fail {
                return Err(SearchIndexError::connection("Mock failure"));
            }
            let mut indices = self.indices.lock().await;
            if indices.contains_key(definition.index_name) {
                return Ok(IndexStatus::AlreadyExists);
            }
            indices.insert(definition.index_name.to_string(), definition.body.clone());
            Ok(IndexStatus::Created)
        }

        async fn delete_index(&self, index_name: &str) -> Result<(), SearchIndexError> {
            self.indices.lock().await.remove(index_name);
            self.deleted.lock().await.push(index_name.to_string());
            Ok(())
        }

        async fn bulk_index(
            &self,
            actions: &[IndexAction],
        ) -> Result<BulkOutcome, SearchIndexError> {
            Ok(BulkOutcome {
                submitted: actions.len(),
                rejected: vec![],
            })
        }

        async fn health_check(&self) -> Result<bool, SearchIndexError> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_ensure_creates_index() {
        let provider = MockProvider::default();
        let provisioner = IndexProvisioner::new(&provider);
        let definition = definition_for(DocumentType::Opportunity);

        let status = provisioner
            .ensure(&definition, UploadMode::Append)
            .await
            .unwrap();

        assert_eq!(status, IndexStatus::Created);
        assert!(provider.indices.lock().await.contains_key("crowdhelix_data"));
    }

    #[tokio::test]
    async fn test_ensure_existing_index_is_success_and_unchanged() {
        let provider = MockProvider::default();
        provider
            .indices
            .lock()
            .await
            .insert("mu_data".to_string(), serde_json::json!({ "custom": true }));
        let provisioner = IndexProvisioner::new(&provider);

        let status = provisioner
            .ensure(&definition_for(DocumentType::Project), UploadMode::Append)
            .await
            .unwrap();

        assert_eq!(status, IndexStatus::AlreadyExists);
        assert_eq!(
            provider.indices.lock().await["mu_data"],
            serde_json::json!({ "custom": true })
        );
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let provider = MockProvider::default();
        let provisioner = IndexProvisioner::new(&provider);
        let definition = definition_for(DocumentType::Project);

        let first = provisioner.ensure(&definition, UploadMode::Append).await.unwrap();
        let second = provisioner.ensure(&definition, UploadMode::Append).await.unwrap();

        assert_eq!(first, IndexStatus::Created);
        assert_eq!(second, IndexStatus::AlreadyExists);
        assert!(provider.deleted.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_ensure_replace_recreates_index() {
        let provider = MockProvider::default();
        provider
            .indices
            .lock()
            .await
            .insert("mu_data".to_string(), serde_json::json!({ "custom": true }));
        let provisioner = IndexProvisioner::new(&provider);
        let definition = definition_for(DocumentType::Project);

        let status = provisioner
            .ensure(&definition, UploadMode::Replace)
            .await
            .unwrap();

        assert_eq!(status, IndexStatus::Created);
        assert_eq!(*provider.deleted.lock().await, vec!["mu_data".to_string()]);
        assert_eq!(provider.indices.lock().await["mu_data"], definition.body);
    }

    #[tokio::test]
    async fn test_ensure_failure_is_provisioning_error() {
        let provider = MockProvider {
            should_fail: true,
            ..Default::default()
        };
        let provisioner = IndexProvisioner::new(&provider);

        let result = provisioner
            .ensure(&definition_for(DocumentType::Opportunity), UploadMode::Append)
            .await;

        assert!(matches!(result, Err(IngestError::ProvisioningError(_))));
    }
}

//! Uploader module for the data loader ingest.
//!
//! Runs one upload end to end: provision, read, transform, submit.

use std::io::Read;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::coordinator::BulkIndexCoordinator;
use crate::errors::IngestError;
use crate::provisioner::{IndexProvisioner, UploadMode};
use crate::reader::CsvRecordReader;
use crate::transformer::RecordTransformer;
use data_loader_repository::{definition_for, SearchIndexError, SearchIndexProvider};
use data_loader_shared::{DocumentType, UploadResult};

/// Opens a fresh search engine connection for each upload.
///
/// The returned provider is dropped when the upload returns, whichever way
/// it ends.
pub trait ProviderFactory: Send + Sync {
    fn connect(&self) -> Result<Box<dyn SearchIndexProvider>, SearchIndexError>;
}

/// Entry point for uploading a CSV file of one document type.
#[derive(Clone)]
pub struct Uploader {
    factory: Arc<dyn ProviderFactory>,
}

impl Uploader {
    pub fn new(factory: Arc<dyn ProviderFactory>) -> Self {
        Self { factory }
    }

    /// Upload `input` as documents of `document_type`.
    ///
    /// # Returns
    ///
    /// * `Ok(UploadResult)` - Final counts after the engine's verdicts
    /// * `Err(IngestError)` - Connection, provisioning, read or submission failure
    pub async fn upload<R>(
        &self,
        document_type: DocumentType,
        input: R,
        mode: UploadMode,
    ) -> Result<UploadResult, IngestError>
    where
        R: Read + Send,
    {
        let provider = self
            .factory
            .connect()
            .map_err(IngestError::ConnectionError)?;

        upload_with(provider.as_ref(), document_type, input, mode).await
    }
}

/// Run an upload against an already connected provider.
///
/// The index is provisioned before the input is read, so a provisioning
/// failure leaves the input untouched and sends no documents.
#[instrument(skip(provider, input), fields(document_type = %document_type, mode = ?mode))]
pub async fn upload_with<R>(
    provider: &dyn SearchIndexProvider,
    document_type: DocumentType,
    input: R,
    mode: UploadMode,
) -> Result<UploadResult, IngestError>
where
    R: Read + Send,
{
    let definition = definition_for(document_type);
    IndexProvisioner::new(provider)
        .ensure(&definition, mode)
        .await?;

    let reader = CsvRecordReader::new(input)?;
    let result = RecordTransformer::new(document_type).transform(reader)?;

    let result = BulkIndexCoordinator::new(provider).submit(result).await?;

    info!(
        index = definition.index_name,
        total = result.total,
        successful = result.successful,
        failed = result.failed,
        "Upload finished"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use data_loader_repository::{BulkOutcome, IndexDefinition, IndexStatus};
    use data_loader_shared::IndexAction;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        drops: Arc<AtomicUsize>,
    }

    impl Drop for CountingProvider {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl SearchIndexProvider for CountingProvider {
        async fn ensure_index(
            &self,
            _definition: &IndexDefinition,
        ) -> Result<IndexStatus, SearchIndexError> {
            Ok(IndexStatus::Created)
        }

        async fn delete_index(&self, _index_name: &str) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn bulk_index(
            &self,
            _actions: &[IndexAction],
        ) -> Result<BulkOutcome, SearchIndexError> {
            Err(SearchIndexError::bulk_operation("Mock failure"))
        }

        async fn health_check(&self) -> Result<bool, SearchIndexError> {
            Ok(true)
        }
    }

    struct CountingFactory {
        connects: AtomicUsize,
        drops: Arc<AtomicUsize>,
        refuse: bool,
    }

    impl CountingFactory {
        fn new(refuse: bool) -> Self {
            Self {
                connects: AtomicUsize::new(0),
                drops: Arc::new(AtomicUsize::new(0)),
                refuse,
            }
        }
    }

    impl ProviderFactory for CountingFactory {
        fn connect(&self) -> Result<Box<dyn SearchIndexProvider>, SearchIndexError> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            if self.refuse {
                return Err(SearchIndexError::connection("Mock refused"));
            }
            Ok(Box::new(CountingProvider {
                drops: self.drops.clone(),
            }))
        }
    }

    const PROJECTS: &str = "Id;annotationLanguage;annotation\n1;en;Text\n";

    #[tokio::test]
    async fn test_connection_released_on_success() {
        let factory = Arc::new(CountingFactory::new(false));
        let uploader = Uploader::new(factory.clone());

        let result = uploader
            .upload(DocumentType::Project, "Id;annotationLanguage\n".as_bytes(), UploadMode::Append)
            .await
            .unwrap();

        assert_eq!(result, UploadResult::default());
        assert_eq!(factory.connects.load(Ordering::SeqCst), 1);
        assert_eq!(factory.drops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_connection_released_on_failure() {
        let factory = Arc::new(CountingFactory::new(false));
        let uploader = Uploader::new(factory.clone());

        let result = uploader
            .upload(DocumentType::Project, PROJECTS.as_bytes(), UploadMode::Append)
            .await;

        assert!(matches!(result, Err(IngestError::SubmissionError(_))));
        assert_eq!(factory.drops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_each_upload_connects_anew() {
        let factory = Arc::new(CountingFactory::new(false));
        let uploader = Uploader::new(factory.clone());

        for _ in 0..3 {
            let _ = uploader
                .upload(DocumentType::Project, PROJECTS.as_bytes(), UploadMode::Append)
                .await;
        }

        assert_eq!(factory.connects.load(Ordering::SeqCst), 3);
        assert_eq!(factory.drops.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_refused_connection_is_connection_error() {
        let factory = Arc::new(CountingFactory::new(true));
        let uploader = Uploader::new(factory);

        let result = uploader
            .upload(DocumentType::Opportunity, PROJECTS.as_bytes(), UploadMode::Append)
            .await;

        assert!(matches!(result, Err(IngestError::ConnectionError(_))));
    }
}

//! Record transformer implementation.
//!
//! Turns raw records into documents of one type and partitions the rows of an
//! upload into accepted and rejected ones.

use tracing::{debug, info, instrument, warn};

use crate::errors::{IngestError, TransformError};
use crate::reader::{RawRecord, ReadRow};
use crate::transformer::rules::{optional, parse_integer, required, split_keywords};
use data_loader_repository::definition_for;
use data_loader_shared::{
    Document, DocumentType, IndexAction, OpportunityDocument, ProjectDocument, UploadResult,
};

/// Language code of the projects that get indexed.
const INDEXED_LANGUAGE: &str = "en";

/// Result of transforming a single record that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed {
    /// The record became a document.
    Document(Document),
    /// The record is filtered out and does not count towards any total.
    Skipped,
}

/// Transform one record into a document of the given type.
///
/// Values are trimmed before any rule runs.
pub fn transform_record(
    record: &RawRecord,
    document_type: DocumentType,
) -> Result<Transformed, TransformError> {
    let record = record.trimmed();
    match document_type {
        DocumentType::Opportunity => transform_opportunity(&record),
        DocumentType::Project => transform_project(&record),
    }
}

fn transform_opportunity(record: &RawRecord) -> Result<Transformed, TransformError> {
    let helix = split_keywords(required(record, "helix")?);
    let role = split_keywords(required(record, "role")?);
    let expertise = split_keywords(required(record, "expertise")?);
    let id = parse_integer("ID", required(record, "ID")?)?;

    Ok(Transformed::Document(
        OpportunityDocument {
            id,
            title: optional(record, "title"),
            url: optional(record, "url"),
            author: optional(record, "author"),
            institution_name: optional(record, "institutionName"),
            institution_url: optional(record, "institutionUrl"),
            appendix_url: optional(record, "appendixUrl"),
            description: optional(record, "description"),
            helix,
            role,
            expertise,
        }
        .into(),
    ))
}

fn transform_project(record: &RawRecord) -> Result<Transformed, TransformError> {
    // The language filter runs before anything else can fail the row.
    let language = required(record, "annotationLanguage")?;
    if language.to_lowercase() != INDEXED_LANGUAGE {
        return Ok(Transformed::Skipped);
    }

    // Renamed verbatim; unlike the opportunity ID, projId is not validated.
    let proj_id = required(record, "Id")?.to_string();
    let description = required(record, "annotation")?.to_string();

    Ok(Transformed::Document(
        ProjectDocument {
            proj_id,
            title: optional(record, "title"),
            description,
            reg_code: optional(record, "regCode"),
            uco: optional(record, "uco"),
        }
        .into(),
    ))
}

/// Transformer that folds a stream of rows into an [`UploadResult`].
///
/// The transformer is responsible for:
/// - Applying the per-type rules to every row independently
/// - Counting failed rows without stopping the scan
/// - Queuing an index action with a fresh identifier for every document
pub struct RecordTransformer {
    document_type: DocumentType,
    index_name: &'static str,
}

impl RecordTransformer {
    /// Create a transformer for one document type.
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            index_name: definition_for(document_type).index_name,
        }
    }

    /// The document type this transformer produces.
    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Transform every row of an upload.
    ///
    /// Rows that fail are counted and logged with their content. Only an
    /// error from the row source itself stops the scan.
    ///
    /// # Returns
    ///
    /// * `Ok(UploadResult)` - Counts plus the actions to submit, in source order
    /// * `Err(IngestError)` - If the row source failed
    #[instrument(skip(self, rows), fields(document_type = %self.document_type))]
    pub fn transform<I>(&self, rows: I) -> Result<UploadResult, IngestError>
    where
        I: IntoIterator<Item = Result<ReadRow, IngestError>>,
    {
        let mut result = UploadResult::new();
        let mut skipped = 0usize;
        let mut columns_logged = false;

        for row in rows {
            match row? {
                ReadRow::Record(record) => {
                    if !columns_logged {
                        info!(columns = %record.columns().join(", "), "Column names");
                        columns_logged = true;
                    }

                    match transform_record(&record, self.document_type) {
                        Ok(Transformed::Document(document)) => {
                            result.record_success(IndexAction::new(self.index_name, document));
                        }
                        Ok(Transformed::Skipped) => {
                            skipped += 1;
                            debug!(line = record.line(), "Skipping record");
                        }
                        Err(e) => {
                            result.record_failure();
                            warn!(
                                line = record.line(),
                                record = %record,
                                error = %e,
                                "Failed to process record"
                            );
                        }
                    }
                }
                ReadRow::Malformed {
                    line,
                    content,
                    error,
                } => {
                    result.record_failure();
                    warn!(
                        line = line,
                        record = %content,
                        error = %error,
                        "Failed to process record"
                    );
                }
            }
        }

        info!(
            total = result.total,
            successful = result.successful,
            failed = result.failed,
            skipped = skipped,
            "Processed records"
        );
        Ok(result)
    }
}

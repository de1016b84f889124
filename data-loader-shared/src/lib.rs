//! # Data Loader Shared
//!
//! Types shared between the repository and ingest crates: the two document
//! shapes that end up in the search index, the bulk action wrapping them, and
//! the per-upload result counters.

mod document;
mod upload_result;

pub use document::{Document, DocumentType, IndexAction, OpportunityDocument, ProjectDocument};
pub use upload_result::UploadResult;

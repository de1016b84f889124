//! # Data Loader Ingest
//!
//! This crate turns `;`-delimited research data into search documents and
//! writes them to the search index.
//!
//! ## Architecture
//!
//! One upload runs these stages in order:
//!
//! 1. **Provisioner**: Ensures the target index exists
//! 2. **Reader**: Splits the input into header-keyed records
//! 3. **Transformer**: Normalizes records into documents and counts outcomes
//! 4. **Coordinator**: Bulk-writes the documents and reconciles rejections
//! 5. **Uploader**: Runs the stages against a per-upload provider connection

pub mod coordinator;
pub mod errors;
pub mod provisioner;
pub mod reader;
pub mod transformer;
pub mod uploader;

pub use errors::{IngestError, TransformError};
pub use provisioner::UploadMode;
pub use uploader::{upload_with, ProviderFactory, Uploader};

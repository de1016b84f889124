//! Transformer module for the data loader ingest.
//!
//! Normalizes raw records into search documents.

mod record_transformer;
mod rules;

pub use record_transformer::{transform_record, RecordTransformer, Transformed};
pub use rules::{parse_integer, split_keywords};

//! Document types written to the search index.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of records carried by one upload.
///
/// A batch always holds a single document type; the caller picks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// Crowdhelix research opportunities.
    Opportunity,
    /// University research projects.
    Project,
}

impl DocumentType {
    /// Short lowercase name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Opportunity => "opportunity",
            DocumentType::Project => "project",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A research opportunity as stored in the search index.
///
/// Field names follow the index mapping, which keeps the source column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityDocument {
    /// Numeric identifier from the source `ID` column.
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appendix_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Research areas, in source order.
    pub helix: Vec<String>,
    /// Consortium roles, in source order.
    pub role: Vec<String>,
    /// Required expertise, in source order.
    pub expertise: Vec<String>,
}

/// A university research project as stored in the search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    /// Project identifier, moved verbatim from the source `Id` column.
    pub proj_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Project annotation, moved from the source `annotation` column.
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reg_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uco: Option<String>,
}

/// A normalized document of either type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Opportunity(OpportunityDocument),
    Project(ProjectDocument),
}

impl Document {
    /// The document type this document belongs to.
    pub fn document_type(&self) -> DocumentType {
        match self {
            Document::Opportunity(_) => DocumentType::Opportunity,
            Document::Project(_) => DocumentType::Project,
        }
    }
}

impl From<OpportunityDocument> for Document {
    fn from(doc: OpportunityDocument) -> Self {
        Document::Opportunity(doc)
    }
}

impl From<ProjectDocument> for Document {
    fn from(doc: ProjectDocument) -> Self {
        Document::Project(doc)
    }
}

/// A single index operation queued for the bulk write.
///
/// Every action gets a freshly generated identifier, so uploading the same
/// source twice produces two copies of each document.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexAction {
    /// Target index name.
    pub index: String,
    /// Document identifier in the index.
    pub id: Uuid,
    /// The document body.
    pub document: Document,
}

impl IndexAction {
    /// Create an action for the given index with a new random identifier.
    pub fn new(index: impl Into<String>, document: impl Into<Document>) -> Self {
        Self {
            index: index.into(),
            id: Uuid::new_v4(),
            document: document.into(),
        }
    }
}

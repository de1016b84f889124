//! Index definitions per document type.
//!
//! Each document type lives in its own index with a fixed mapping:
//! - **keyword** fields for exact-match filters (ids, urls, tag lists)
//! - **text** fields with the `english` analyzer and term vectors for
//!   full-text and more-like-this queries on titles and descriptions
//!
//! Both indices use a single primary shard and no replicas.

use data_loader_shared::DocumentType;
use serde_json::{json, Value};

/// Index holding research opportunities.
pub const OPPORTUNITY_INDEX: &str = "crowdhelix_data";

/// Index holding university projects.
pub const PROJECT_INDEX: &str = "mu_data";

/// Name and creation body (settings + mappings) of an index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDefinition {
    /// The index name.
    pub index_name: &'static str,
    /// The body sent with the index creation request.
    pub body: Value,
}

/// Look up the index definition for a document type.
pub fn definition_for(document_type: DocumentType) -> IndexDefinition {
    match document_type {
        DocumentType::Opportunity => IndexDefinition {
            index_name: OPPORTUNITY_INDEX,
            body: opportunity_index_body(),
        },
        DocumentType::Project => IndexDefinition {
            index_name: PROJECT_INDEX,
            body: project_index_body(),
        },
    }
}

fn settings() -> Value {
    json!({
        "index": {
            "number_of_shards": 1,
            "number_of_replicas": 0
        }
    })
}

fn english_text() -> Value {
    json!({
        "type": "text",
        "term_vector": "yes",
        "analyzer": "english"
    })
}

fn keyword() -> Value {
    json!({ "type": "keyword" })
}

fn opportunity_index_body() -> Value {
    json!({
        "settings": settings(),
        "mappings": {
            "properties": {
                "ID": { "type": "integer" },
                "title": english_text(),
                "description": english_text(),
                "url": keyword(),
                "author": keyword(),
                "institutionName": keyword(),
                "institutionUrl": keyword(),
                "appendixUrl": keyword(),
                "helix": keyword(),
                "role": keyword(),
                "expertise": keyword()
            }
        }
    })
}

fn project_index_body() -> Value {
    json!({
        "settings": settings(),
        "mappings": {
            "properties": {
                "projId": keyword(),
                "regCode": keyword(),
                "uco": keyword(),
                "title": english_text(),
                "description": english_text()
            }
        }
    })
}

//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts},
    BulkParts, OpenSearch,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::SearchIndexConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::schema::IndexDefinition;
use crate::types::{BulkOutcome, IndexStatus, RejectedItem};
use data_loader_shared::IndexAction;

/// Error type OpenSearch returns when creating an index that is already there.
const ALREADY_EXISTS_ERROR: &str = "resource_already_exists_exception";

/// OpenSearch client implementation.
///
/// One client is created per upload and dropped when the upload finishes,
/// which releases its connection pool.
///
/// # Example
///
/// ```ignore
/// use data_loader_repository::{definition_for, SearchIndexConfig};
/// use data_loader_shared::DocumentType;
///
/// let client = OpenSearchClient::new("http://localhost:9200", SearchIndexConfig::default())?;
/// client.ensure_index(&definition_for(DocumentType::Opportunity)).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    config: SearchIndexConfig,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `config` - Bulk write configuration
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or the transport cannot be built
    pub fn new(url: &str, config: SearchIndexConfig) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        debug!(url = %url, chunk_size = ?config.bulk_chunk_size, "Created OpenSearch client");

        Ok(Self { client, config })
    }

    /// Build the NDJSON lines of a bulk request: one action line followed by
    /// one source line per document.
    fn bulk_lines(actions: &[IndexAction]) -> Result<Vec<Value>, SearchIndexError> {
        let mut lines = Vec::with_capacity(actions.len() * 2);

        for action in actions {
            lines.push(json!({
                "index": {
                    "_index": action.index,
                    "_id": action.id.to_string()
                }
            }));
            let source = serde_json::to_value(&action.document)
                .map_err(|e| SearchIndexError::serialization(e.to_string()))?;
            lines.push(source);
        }

        Ok(lines)
    }

    /// Extract the rejected items from a bulk response body.
    fn rejected_items(body: &Value) -> Result<Vec<RejectedItem>, SearchIndexError> {
        let items = body
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| SearchIndexError::parse("Bulk response has no items array"))?;

        if !body.get("errors").and_then(Value::as_bool).unwrap_or(true) {
            return Ok(Vec::new());
        }

        let rejected = items
            .iter()
            // Each item is keyed by its operation type, e.g. {"index": {...}}
            .filter_map(|item| item.as_object().and_then(|op| op.values().next()))
            .filter_map(|result| {
                let error = result.get("error")?;
                Some(RejectedItem {
                    id: result
                        .get("_id")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    status: result
                        .get("status")
                        .and_then(Value::as_u64)
                        .and_then(|s| u16::try_from(s).ok())
                        .unwrap_or_default(),
                    reason: Self::error_reason(error),
                })
            })
            .collect();

        Ok(rejected)
    }

    fn error_reason(error: &Value) -> String {
        match (
            error.get("type").and_then(Value::as_str),
            error.get("reason").and_then(Value::as_str),
        ) {
            (Some(kind), Some(reason)) => format!("{}: {}", kind, reason),
            (Some(kind), None) => kind.to_string(),
            (None, Some(reason)) => reason.to_string(),
            (None, None) => error.to_string(),
        }
    }

    fn is_already_exists(body: &Value) -> bool {
        body.pointer("/error/type").and_then(Value::as_str) == Some(ALREADY_EXISTS_ERROR)
    }

    /// Send one bulk request.
    async fn bulk_chunk(&self, actions: &[IndexAction]) -> Result<BulkOutcome, SearchIndexError> {
        let body: Vec<JsonBody<Value>> = Self::bulk_lines(actions)?
            .into_iter()
            .map(JsonBody::from)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::None)
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::bulk_operation(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        Ok(BulkOutcome {
            submitted: actions.len(),
            rejected: Self::rejected_items(&response_body)?,
        })
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchClient {
    #[instrument(skip(self, definition), fields(index = definition.index_name))]
    async fn ensure_index(
        &self,
        definition: &IndexDefinition,
    ) -> Result<IndexStatus, SearchIndexError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(definition.index_name))
            .body(definition.body.clone())
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            info!("Created index");
            return Ok(IndexStatus::Created);
        }

        let error_body: Value = response.json().await.unwrap_or_default();
        if status.as_u16() == 400 && Self::is_already_exists(&error_body) {
            debug!("Index already exists");
            return Ok(IndexStatus::AlreadyExists);
        }

        error!(status = %status, body = %error_body, "Index creation failed");
        Err(SearchIndexError::index_creation(format!(
            "Creating index {} failed with status {}: {}",
            definition.index_name, status, error_body
        )))
    }

    #[instrument(skip(self))]
    async fn delete_index(&self, index_name: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index_name]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - index may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index deletion failed");
            return Err(SearchIndexError::index_deletion(format!(
                "Deleting index {} failed with status {}: {}",
                index_name, status, error_body
            )));
        }

        info!(existed = status.is_success(), "Deleted index");
        Ok(())
    }

    #[instrument(skip(self, actions), fields(action_count = actions.len()))]
    async fn bulk_index(&self, actions: &[IndexAction]) -> Result<BulkOutcome, SearchIndexError> {
        let mut outcome = BulkOutcome::default();
        if actions.is_empty() {
            return Ok(outcome);
        }

        let chunk_size = self.config.chunk_size_for(actions.len());
        for chunk in actions.chunks(chunk_size) {
            let chunk_outcome = self.bulk_chunk(chunk).await?;
            debug!(
                submitted = chunk_outcome.submitted,
                rejected = chunk_outcome.rejected_count(),
                "Bulk chunk written"
            );
            outcome.merge(chunk_outcome);
        }

        Ok(outcome)
    }

    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let health: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;
        let status = health
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        debug!(status = %status, "OpenSearch cluster status");

        Ok(status == "green" || status == "yellow")
    }
}

//! Atlas search index endpoints.
//!
//! All three calls live under
//! `/api/atlas/v2/groups/{groupId}/clusters/{clusterName}/search/indexes`.

use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use workshop_config::constants::ATLAS_API_MEDIA_TYPE;

use crate::endpoints::encode_path_segment;
use crate::endpoints::{send_request_with_retry, send_request_with_retry_if};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{IndexDefinition, SearchIndex};

const INDEXES_TEMPLATE: &str =
    "/api/atlas/v2/groups/{groupId}/clusters/{clusterName}/search/indexes";
const COLLECTION_TEMPLATE: &str = "/api/atlas/v2/groups/{groupId}/clusters/{clusterName}/search/indexes/{databaseName}/{collectionName}";
const INDEX_TEMPLATE: &str = "/api/atlas/v2/groups/{groupId}/clusters/{clusterName}/search/indexes/{databaseName}/{collectionName}/{indexName}";

/// Fully qualified location of a collection inside an Atlas project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionTarget {
    pub group_id: String,
    pub cluster_name: String,
    pub database: String,
    pub collection: String,
}

impl CollectionTarget {
    pub fn new(
        group_id: impl Into<String>,
        cluster_name: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            cluster_name: cluster_name.into(),
            database: database.into(),
            collection: collection.into(),
        }
    }

    /// `database.collection`
    pub fn namespace(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }

    fn indexes_url(&self, base_url: &str) -> String {
        format!(
            "{}/api/atlas/v2/groups/{}/clusters/{}/search/indexes",
            base_url,
            encode_path_segment(&self.group_id),
            encode_path_segment(&self.cluster_name)
        )
    }

    fn collection_url(&self, base_url: &str) -> String {
        format!(
            "{}/{}/{}",
            self.indexes_url(base_url),
            encode_path_segment(&self.database),
            encode_path_segment(&self.collection)
        )
    }
}

/// Body for the create call: the caller's model plus the collection coordinates.
///
/// The model's own `name` wins; `index_name` fills it in only when absent.
fn create_body(target: &CollectionTarget, index_name: &str, model: &IndexDefinition) -> Value {
    let mut body = model.clone();
    body.insert("database".to_string(), Value::from(target.database.clone()));
    body.insert(
        "collectionName".to_string(),
        Value::from(target.collection.clone()),
    );
    body.entry("name")
        .or_insert_with(|| Value::from(index_name.to_string()));
    Value::Object(body)
}

/// Create a search index. Returns the raw Atlas response document.
///
/// Only 429 and 503 are retried: a create retried after a 502 or 504 may
/// find its own index and be reported as a name conflict.
#[allow(clippy::too_many_arguments)]
pub async fn create_search_index(
    client: &Client,
    base_url: &str,
    access_token: &str,
    target: &CollectionTarget,
    index_name: &str,
    model: &IndexDefinition,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<Value> {
    let url = target.indexes_url(base_url);
    let body = create_body(target, index_name, model);

    let builder = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", ATLAS_API_MEDIA_TYPE)
        .json(&body);

    let response = send_request_with_retry_if(
        builder,
        max_retries,
        INDEXES_TEMPLATE,
        "POST",
        metrics,
        ClientError::is_retryable_status_for_create,
    )
    .await?;

    let created: Value = response.json().await?;
    debug!(
        index = index_name,
        index_id = created.get("indexID").and_then(serde_json::Value::as_str),
        "Search index create accepted"
    );
    Ok(created)
}

/// List every search index defined on a collection.
pub async fn list_search_indexes(
    client: &Client,
    base_url: &str,
    access_token: &str,
    target: &CollectionTarget,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<SearchIndex>> {
    let url = target.collection_url(base_url);

    let builder = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", ATLAS_API_MEDIA_TYPE);

    let response =
        send_request_with_retry(builder, max_retries, COLLECTION_TEMPLATE, "GET", metrics).await?;

    let body: Value = response.json().await?;
    serde_json::from_value(body).map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse search index listing: {}", e))
    })
}

/// Drop a search index by name.
///
/// Atlas accepts the request and removes the index asynchronously; the index
/// keeps appearing in listings (as `DELETING`) for a while.
pub async fn drop_search_index(
    client: &Client,
    base_url: &str,
    access_token: &str,
    target: &CollectionTarget,
    index_name: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    let url = format!(
        "{}/{}",
        target.collection_url(base_url),
        encode_path_segment(index_name)
    );

    let builder = client
        .delete(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", ATLAS_API_MEDIA_TYPE);

    let _response =
        send_request_with_retry(builder, max_retries, INDEX_TEMPLATE, "DELETE", metrics).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> CollectionTarget {
        CollectionTarget::new("grp", "Cluster0", "sample_mflix", "embedded_movies")
    }

    #[test]
    fn test_collection_url_layout() {
        assert_eq!(
            target().collection_url("https://cloud.mongodb.com"),
            "https://cloud.mongodb.com/api/atlas/v2/groups/grp/clusters/Cluster0/search/indexes/sample_mflix/embedded_movies"
        );
    }

    #[test]
    fn test_create_body_adds_coordinates() {
        let model: IndexDefinition = serde_json::from_value(serde_json::json!({
            "name": "vector_index",
            "type": "vectorSearch",
            "definition": {"fields": []}
        }))
        .unwrap();

        let body = create_body(&target(), "ignored", &model);
        assert_eq!(body["name"], "vector_index");
        assert_eq!(body["type"], "vectorSearch");
        assert_eq!(body["database"], "sample_mflix");
        assert_eq!(body["collectionName"], "embedded_movies");
        assert_eq!(body["definition"], serde_json::json!({"fields": []}));
    }

    #[test]
    fn test_create_body_fills_missing_name() {
        let model: IndexDefinition = serde_json::from_value(serde_json::json!({
            "definition": {"mappings": {"dynamic": true}}
        }))
        .unwrap();

        let body = create_body(&target(), "default", &model);
        assert_eq!(body["name"], "default");
    }
}

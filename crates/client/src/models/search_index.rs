//! Search index models.
//!
//! A search index is built asynchronously by Atlas and becomes queryable once
//! its status reaches `READY`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Caller-supplied index model (`{name, type, definition}` for Atlas),
/// forwarded to the service without validation.
pub type IndexDefinition = Map<String, Value>;

/// Build status reported for a search index.
///
/// Only [`SearchIndexStatus::Ready`] is terminal. Unknown values are kept in
/// [`SearchIndexStatus::Other`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SearchIndexStatus {
    Ready,
    Pending,
    Building,
    Failed,
    DoesNotExist,
    Deleting,
    Stale,
    Other(String),
}

impl SearchIndexStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ready => "READY",
            Self::Pending => "PENDING",
            Self::Building => "BUILDING",
            Self::Failed => "FAILED",
            Self::DoesNotExist => "DOES_NOT_EXIST",
            Self::Deleting => "DELETING",
            Self::Stale => "STALE",
            Self::Other(s) => s,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl From<String> for SearchIndexStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "READY" => Self::Ready,
            "PENDING" => Self::Pending,
            "BUILDING" => Self::Building,
            "FAILED" => Self::Failed,
            "DOES_NOT_EXIST" => Self::DoesNotExist,
            "DELETING" => Self::Deleting,
            "STALE" => Self::Stale,
            _ => Self::Other(value),
        }
    }
}

impl From<SearchIndexStatus> for String {
    fn from(value: SearchIndexStatus) -> Self {
        match value {
            SearchIndexStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for SearchIndexStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a search index listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIndex {
    pub name: String,
    pub status: SearchIndexStatus,
    #[serde(rename = "latestDefinition", default, skip_serializing_if = "Option::is_none")]
    pub latest_definition: Option<Value>,
    #[serde(rename = "indexID", default, skip_serializing_if = "Option::is_none")]
    pub index_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub index_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queryable: Option<bool>,
}

impl SearchIndex {
    pub fn new(name: impl Into<String>, status: SearchIndexStatus) -> Self {
        Self {
            name: name.into(),
            status,
            latest_definition: None,
            index_id: None,
            index_type: None,
            queryable: None,
        }
    }

    pub fn with_definition(mut self, definition: Value) -> Self {
        self.latest_definition = Some(definition);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_is_preserved() {
        let status = SearchIndexStatus::from("MIGRATING".to_string());
        assert_eq!(status, SearchIndexStatus::Other("MIGRATING".to_string()));
        assert_eq!(status.to_string(), "MIGRATING");
        assert!(!status.is_ready());
    }

    #[test]
    fn test_only_ready_is_ready() {
        assert!(SearchIndexStatus::Ready.is_ready());
        for status in [
            SearchIndexStatus::Pending,
            SearchIndexStatus::Building,
            SearchIndexStatus::Failed,
            SearchIndexStatus::DoesNotExist,
            SearchIndexStatus::Deleting,
            SearchIndexStatus::Stale,
        ] {
            assert!(!status.is_ready(), "{} should not be terminal", status);
        }
    }

    #[test]
    fn test_parse_atlas_listing_entry() {
        let index: SearchIndex = serde_json::from_value(serde_json::json!({
            "collectionName": "movies",
            "database": "sample_mflix",
            "indexID": "6524096020da840844a4c4a7",
            "name": "vector_index",
            "status": "BUILDING",
            "type": "vectorSearch",
            "queryable": false,
            "latestDefinition": {
                "fields": [{"type": "vector", "path": "embedding", "numDimensions": 1536, "similarity": "cosine"}]
            }
        }))
        .unwrap();

        assert_eq!(index.name, "vector_index");
        assert_eq!(index.status, SearchIndexStatus::Building);
        assert_eq!(index.index_type.as_deref(), Some("vectorSearch"));
        assert_eq!(index.queryable, Some(false));
        assert_eq!(
            index.latest_definition.unwrap()["fields"][0]["numDimensions"],
            1536
        );
    }

    #[test]
    fn test_missing_status_is_rejected() {
        let result: Result<SearchIndex, _> =
            serde_json::from_value(serde_json::json!({"name": "vector_index"}));
        assert!(result.is_err());
    }
}

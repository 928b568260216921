//! The collection handle seam between lifecycle operations and a search
//! index backend.
//!
//! [`SearchIndexCollection`] is the only thing the lifecycle functions need.
//! [`AtlasCollection`] implements it over the Atlas Administration API; tests
//! use `testing::ScriptedCollection`.

use async_trait::async_trait;
use tracing::debug;

use crate::client::AtlasClient;
use crate::error::{ClientError, IndexError};
use crate::models::{IndexDefinition, SearchIndex};

/// Atlas names an index `default` when the definition omits `name`.
const DEFAULT_INDEX_NAME: &str = "default";

/// Search index operations on one collection.
#[async_trait]
pub trait SearchIndexCollection: Send + Sync {
    /// `database.collection`, for log context.
    fn namespace(&self) -> String;

    /// Create an index from `model`.
    ///
    /// Must return [`IndexError::Conflict`] when an index with the same name
    /// already exists, so callers can recover.
    async fn create_search_index(&self, model: &IndexDefinition) -> Result<(), IndexError>;

    /// Request deletion of the named index. Deletion may complete later.
    async fn drop_search_index(&self, name: &str) -> Result<(), IndexError>;

    /// Current status records for every index on the collection.
    async fn list_search_indexes(&self) -> Result<Vec<SearchIndex>, IndexError>;
}

/// Atlas-backed collection handle.
#[derive(Debug, Clone)]
pub struct AtlasCollection {
    client: AtlasClient,
    database: String,
    collection: String,
}

impl AtlasCollection {
    pub fn new(client: AtlasClient, database: &str, collection: &str) -> Self {
        Self {
            client,
            database: database.to_string(),
            collection: collection.to_string(),
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

/// Map a create failure to the lifecycle error space.
fn classify_create_error(name: &str, err: ClientError) -> IndexError {
    if err.is_duplicate_index() {
        let message = match &err {
            ClientError::ApiError { message, .. } => message.clone(),
            other => other.to_string(),
        };
        IndexError::Conflict {
            name: name.to_string(),
            message,
        }
    } else {
        IndexError::Transport(err)
    }
}

#[async_trait]
impl SearchIndexCollection for AtlasCollection {
    fn namespace(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }

    async fn create_search_index(&self, model: &IndexDefinition) -> Result<(), IndexError> {
        let name = model
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_INDEX_NAME);

        match self
            .client
            .create_search_index(&self.database, &self.collection, name, model)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                debug!(index = name, error = %e, "Search index create rejected");
                Err(classify_create_error(name, e))
            }
        }
    }

    async fn drop_search_index(&self, name: &str) -> Result<(), IndexError> {
        self.client
            .drop_search_index(&self.database, &self.collection, name)
            .await
            .map_err(IndexError::from)
    }

    async fn list_search_indexes(&self) -> Result<Vec<SearchIndex>, IndexError> {
        self.client
            .list_search_indexes(&self.database, &self.collection)
            .await
            .map_err(IndexError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, error_code: Option<&str>) -> ClientError {
        ClientError::ApiError {
            status,
            url: "http://localhost".to_string(),
            error_code: error_code.map(str::to_string),
            message: "Index vector_index already exists.".to_string(),
        }
    }

    #[test]
    fn test_duplicate_becomes_conflict() {
        let err = classify_create_error(
            "vector_index",
            api_error(400, Some("ATLAS_SEARCH_DUPLICATE_INDEX")),
        );
        match err {
            IndexError::Conflict { name, message } => {
                assert_eq!(name, "vector_index");
                assert_eq!(message, "Index vector_index already exists.");
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_other_errors_stay_transport() {
        let err = classify_create_error("vector_index", api_error(401, None));
        assert!(matches!(err, IndexError::Transport(_)));
    }
}

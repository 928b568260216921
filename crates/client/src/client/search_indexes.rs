//! Search index methods for [`AtlasClient`].

use secrecy::ExposeSecret;
use serde_json::Value;

use crate::client::AtlasClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{IndexDefinition, SearchIndex};

impl AtlasClient {
    /// Create a search index from `model`.
    ///
    /// `index_name` is used only when the model carries no `name`.
    pub async fn create_search_index(
        &self,
        database: &str,
        collection: &str,
        index_name: &str,
        model: &IndexDefinition,
    ) -> Result<Value> {
        endpoints::create_search_index(
            &self.http,
            &self.base_url,
            self.access_token.expose_secret(),
            &self.target(database, collection),
            index_name,
            model,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
    }

    /// List all search indexes on a collection.
    pub async fn list_search_indexes(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Vec<SearchIndex>> {
        endpoints::list_search_indexes(
            &self.http,
            &self.base_url,
            self.access_token.expose_secret(),
            &self.target(database, collection),
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Request deletion of a search index.
    pub async fn drop_search_index(
        &self,
        database: &str,
        collection: &str,
        index_name: &str,
    ) -> Result<()> {
        endpoints::drop_search_index(
            &self.http,
            &self.base_url,
            self.access_token.expose_secret(),
            &self.target(database, collection),
            index_name,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
    }
}

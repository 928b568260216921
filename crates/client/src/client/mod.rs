//! Atlas Administration API client.
//!
//! [`AtlasClient`] owns the HTTP client, credentials and project/cluster
//! coordinates. It hands out [`AtlasCollection`] handles that the lifecycle
//! operations drive through [`crate::collection::SearchIndexCollection`].
//!
//! # What this module does NOT handle:
//! - Request construction and retry (see [`crate::endpoints`])
//! - Conflict classification (see [`crate::collection`])

pub mod builder;
mod search_indexes;

use secrecy::SecretString;

use crate::collection::AtlasCollection;
use crate::endpoints::CollectionTarget;
use crate::metrics::MetricsCollector;

/// Client for the search index endpoints of one Atlas cluster.
///
/// ```rust,ignore
/// use workshop_client::AtlasClient;
///
/// let client = AtlasClient::builder().from_config(&atlas_config).build()?;
/// let movies = client.collection("sample_mflix", "embedded_movies");
/// ```
#[derive(Debug, Clone)]
pub struct AtlasClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) access_token: SecretString,
    pub(crate) group_id: String,
    pub(crate) cluster_name: String,
    pub(crate) max_retries: usize,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl AtlasClient {
    pub fn builder() -> builder::AtlasClientBuilder {
        builder::AtlasClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    /// Handle for one collection on this client's cluster.
    pub fn collection(&self, database: &str, collection: &str) -> AtlasCollection {
        AtlasCollection::new(self.clone(), database, collection)
    }

    pub(crate) fn target(&self, database: &str, collection: &str) -> CollectionTarget {
        CollectionTarget::new(
            self.group_id.clone(),
            self.cluster_name.clone(),
            database,
            collection,
        )
    }
}

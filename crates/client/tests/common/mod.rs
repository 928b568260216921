//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Atlas paths use the `grp` project and `Cluster0` cluster
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

#![allow(dead_code)]

use secrecy::SecretString;
use std::time::Duration;

#[allow(unused_imports)]
pub use workshop_client::testing::{Call, ScriptedCollection, conflict, load_fixture};

#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use workshop_client::endpoints;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GROUP_ID: &str = "grp";
pub const CLUSTER: &str = "Cluster0";
pub const DATABASE: &str = "sample_mflix";
pub const COLLECTION: &str = "embedded_movies";
pub const TOKEN: &str = "test-token";

/// `.../search/indexes`
pub const INDEXES_PATH: &str = "/api/atlas/v2/groups/grp/clusters/Cluster0/search/indexes";
/// `.../search/indexes/{db}/{coll}`
pub const COLLECTION_PATH: &str =
    "/api/atlas/v2/groups/grp/clusters/Cluster0/search/indexes/sample_mflix/embedded_movies";

pub fn target() -> endpoints::CollectionTarget {
    endpoints::CollectionTarget::new(GROUP_ID, CLUSTER, DATABASE, COLLECTION)
}

/// Client pointed at a mock server, with a small retry budget.
pub fn atlas_client(base_url: &str, max_retries: usize) -> workshop_client::AtlasClient {
    workshop_client::AtlasClient::builder()
        .base_url(base_url)
        .access_token(SecretString::new(TOKEN.to_string().into()))
        .group_id(GROUP_ID)
        .cluster_name(CLUSTER)
        .timeout(Duration::from_secs(5))
        .max_retries(max_retries)
        .build()
        .expect("client should build")
}

/// The vector index model used across tests.
pub fn vector_model() -> workshop_client::IndexDefinition {
    serde_json::from_value(load_fixture("search_indexes/vector_index_model.json"))
        .expect("model fixture is an object")
}

pub fn api_error(status: u16, message: &str) -> workshop_client::ClientError {
    workshop_client::ClientError::ApiError {
        status,
        url: "http://localhost/api".to_string(),
        error_code: None,
        message: message.to_string(),
    }
}

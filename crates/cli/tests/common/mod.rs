//! Shared test utilities for workshop-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Provide the Atlas paths and listing bodies the mock server answers with.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - `ATLAS_ACCESS_TOKEN` is "test-token", the project is `grp` and the
//!   cluster is `Cluster0` unless overridden.

#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{Value, json};

pub const INDEXES_PATH: &str = "/api/atlas/v2/groups/grp/clusters/Cluster0/search/indexes";
pub const COLLECTION_PATH: &str =
    "/api/atlas/v2/groups/grp/clusters/Cluster0/search/indexes/sample_mflix/embedded_movies";

/// Returns a hermetic `workshop-cli` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Atlas credentials are set to dummy values to satisfy config validation.
/// - Other workshop env vars are cleared to ensure no leakage from the host.
pub fn workshop_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("workshop-cli");

    cmd.env("DOTENV_DISABLED", "1");

    cmd.env("ATLAS_ACCESS_TOKEN", "test-token")
        .env("ATLAS_GROUP_ID", "grp")
        .env("ATLAS_CLUSTER_NAME", "Cluster0");

    cmd.env_remove("ATLAS_BASE_URL")
        .env_remove("ATLAS_TIMEOUT")
        .env_remove("ATLAS_MAX_RETRIES")
        .env_remove("SERVERLESS_URL")
        .env_remove("CODESPACE_NAME")
        .env_remove("INDEX_POLL_INTERVAL")
        .env_remove("INDEX_POLL_MAX_ATTEMPTS")
        .env_remove("INDEX_POLL_DEADLINE")
        .env_remove("WORKSHOP_OTLP_ENDPOINT")
        .env_remove("RUST_LOG");

    cmd
}

/// `workshop_cmd()` pointed at a mock Atlas API.
pub fn workshop_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = workshop_cmd();
    cmd.env("ATLAS_BASE_URL", base_url);
    cmd
}

/// One Atlas listing entry for `sample_mflix.embedded_movies`.
pub fn index_entry(name: &str, status: &str) -> Value {
    json!({
        "collectionName": "embedded_movies",
        "database": "sample_mflix",
        "indexID": format!("{}-id", name),
        "name": name,
        "status": status,
        "type": "vectorSearch",
        "latestDefinition": {
            "fields": [{
                "type": "vector",
                "path": "plot_embedding",
                "numDimensions": 1536,
                "similarity": "cosine"
            }]
        }
    })
}

pub fn duplicate_index_body(name: &str) -> Value {
    json!({
        "detail": format!("Index {} already exists for collection sample_mflix.embedded_movies.", name),
        "error": 400,
        "errorCode": "ATLAS_SEARCH_DUPLICATE_INDEX",
        "parameters": [],
        "reason": "Bad Request"
    })
}

/// Index model file contents used by `indexes create`.
pub fn vector_model_json() -> String {
    json!({
        "name": "vector_index",
        "type": "vectorSearch",
        "definition": {
            "fields": [{
                "type": "vector",
                "path": "plot_embedding",
                "numDimensions": 1536,
                "similarity": "cosine"
            }]
        }
    })
    .to_string()
}

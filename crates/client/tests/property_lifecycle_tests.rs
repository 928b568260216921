//! Property-based tests for the lifecycle operations.
//!
//! - Without a conflict, any model is created exactly once and nothing is dropped
//! - Readiness polling makes one listing per non-ready observation plus one
//! - Unknown status strings survive a decode/encode cycle untouched

mod common;

use common::{Call, ScriptedCollection};
use proptest::prelude::*;
use serde_json::{Value, json};
use workshop_client::{
    IndexDefinition, SearchIndex, SearchIndexStatus, check_index_ready, create_index,
};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .unwrap()
}

fn vector_model(name: &str, path: &str, dims: u32, similarity: &str) -> IndexDefinition {
    let value = json!({
        "name": name,
        "type": "vectorSearch",
        "definition": {
            "fields": [{
                "type": "vector",
                "path": path,
                "numDimensions": dims,
                "similarity": similarity
            }]
        }
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn non_ready_status() -> impl Strategy<Value = SearchIndexStatus> {
    prop_oneof![
        Just(SearchIndexStatus::Pending),
        Just(SearchIndexStatus::Building),
        Just(SearchIndexStatus::Failed),
        Just(SearchIndexStatus::Stale),
        Just(SearchIndexStatus::DoesNotExist),
    ]
}

proptest! {
    #[test]
    fn prop_create_without_conflict_is_single_create(
        name in "[a-z][a-z0-9_]{0,24}",
        path in "[a-z][a-z_]{0,16}",
        dims in 1u32..4096,
        similarity in prop_oneof![Just("cosine"), Just("euclidean"), Just("dotProduct")],
    ) {
        let model = vector_model(&name, &path, dims, similarity);
        let collection = ScriptedCollection::new("db.coll");

        runtime().block_on(create_index(&collection, &name, &model)).unwrap();

        prop_assert_eq!(collection.calls(), vec![Call::Create(model)]);
    }

    #[test]
    fn prop_ready_polls_once_per_observation(
        statuses in prop::collection::vec(prop::option::of(non_ready_status()), 0..8),
    ) {
        let name = "vector_index";
        let mut collection = ScriptedCollection::new("db.coll");
        for status in &statuses {
            let listing = status
                .clone()
                .map(|s| vec![SearchIndex::new(name, s)])
                .unwrap_or_default();
            collection = collection.with_listing(listing);
        }
        collection = collection.with_listing(vec![SearchIndex::new(name, SearchIndexStatus::Ready)]);

        let ready = runtime().block_on(check_index_ready(&collection, name)).unwrap();

        prop_assert!(ready.status.is_ready());
        prop_assert_eq!(collection.list_count(), statuses.len() + 1);
    }

    #[test]
    fn prop_unknown_status_round_trips(raw in "[A-Z][A-Z_]{2,16}") {
        let status: SearchIndexStatus = serde_json::from_value(json!(raw.clone())).unwrap();
        prop_assert_eq!(serde_json::to_value(&status).unwrap(), json!(raw));
    }
}

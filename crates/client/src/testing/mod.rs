//! Test support: JSON fixtures and an in-memory collection.
//!
//! Available in unit tests and with the `test-utils` feature.
//!
//! ```ignore
//! use workshop_client::testing::{ScriptedCollection, load_fixture};
//! use workshop_client::{SearchIndex, SearchIndexStatus};
//!
//! let collection = ScriptedCollection::new("sample_mflix.embedded_movies")
//!     .with_listing(vec![SearchIndex::new("vector_index", SearchIndexStatus::Pending)])
//!     .with_listing(vec![SearchIndex::new("vector_index", SearchIndexStatus::Ready)]);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::collection::SearchIndexCollection;
use crate::error::IndexError;
use crate::models::{IndexDefinition, SearchIndex};

/// Load a JSON fixture from `crates/client/fixtures`.
///
/// # Panics
/// If the file is missing or not valid JSON.
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let full_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// One call received by a [`ScriptedCollection`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(IndexDefinition),
    Drop(String),
    List,
}

enum ListStep {
    Indexes(Vec<SearchIndex>),
    Fail(IndexError),
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    create_errors: VecDeque<Option<IndexError>>,
    drop_errors: VecDeque<Option<IndexError>>,
    listings: VecDeque<ListStep>,
    last_listing: Vec<SearchIndex>,
}

/// In-memory [`SearchIndexCollection`] that replays scripted outcomes and
/// records every call.
///
/// - Creates and drops succeed unless an outcome was queued for them.
/// - Listings are served in order; the last scripted listing repeats once
///   the script runs out (an empty listing if none was scripted).
pub struct ScriptedCollection {
    namespace: String,
    state: Mutex<State>,
}

impl ScriptedCollection {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            state: Mutex::new(State::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue the outcome of the next create that has none yet: `None` succeeds.
    pub fn with_create_outcome(self, outcome: Option<IndexError>) -> Self {
        self.state().create_errors.push_back(outcome);
        self
    }

    /// Make the next unscripted create fail with `err`.
    pub fn with_create_error(self, err: IndexError) -> Self {
        self.with_create_outcome(Some(err))
    }

    /// Make the next unscripted drop fail with `err`.
    pub fn with_drop_error(self, err: IndexError) -> Self {
        self.state().drop_errors.push_back(Some(err));
        self
    }

    pub fn with_listing(self, indexes: Vec<SearchIndex>) -> Self {
        self.state().listings.push_back(ListStep::Indexes(indexes));
        self
    }

    pub fn with_list_error(self, err: IndexError) -> Self {
        self.state().listings.push_back(ListStep::Fail(err));
        self
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Models passed to create, in order.
    pub fn created_models(&self) -> Vec<IndexDefinition> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Create(model) => Some(model.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn dropped_names(&self) -> Vec<String> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Drop(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn list_count(&self) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::List))
            .count()
    }
}

/// The error a service gives when the index name is taken.
pub fn conflict(name: &str) -> IndexError {
    IndexError::Conflict {
        name: name.to_string(),
        message: format!("Index {name} already exists"),
    }
}

#[async_trait]
impl SearchIndexCollection for ScriptedCollection {
    fn namespace(&self) -> String {
        self.namespace.clone()
    }

    async fn create_search_index(&self, model: &IndexDefinition) -> Result<(), IndexError> {
        let mut state = self.state();
        state.calls.push(Call::Create(model.clone()));
        match state.create_errors.pop_front().flatten() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn drop_search_index(&self, name: &str) -> Result<(), IndexError> {
        let mut state = self.state();
        state.calls.push(Call::Drop(name.to_string()));
        match state.drop_errors.pop_front().flatten() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn list_search_indexes(&self) -> Result<Vec<SearchIndex>, IndexError> {
        let mut state = self.state();
        state.calls.push(Call::List);
        match state.listings.pop_front() {
            Some(ListStep::Indexes(indexes)) => {
                state.last_listing = indexes.clone();
                Ok(indexes)
            }
            Some(ListStep::Fail(err)) => Err(err),
            None => Ok(state.last_listing.clone()),
        }
    }
}

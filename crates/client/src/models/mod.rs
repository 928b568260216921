//! Data models for the Atlas search index API and the tracking endpoint.

pub mod common;
pub mod search_index;
pub mod tracking;

pub use common::AtlasErrorBody;
pub use search_index::{IndexDefinition, SearchIndex, SearchIndexStatus};
pub use tracking::{ProgressEvent, TRACK_PROGRESS_TASK, TrackingRequest};

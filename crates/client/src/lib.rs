//! Search index helpers for MongoDB Atlas workshops.
//!
//! - [`lifecycle`]: create (or recreate) a search index and wait until it is
//!   `READY`
//! - [`tracker`]: report completed workshop tasks to a tracking endpoint
//! - [`AtlasClient`]: the Atlas Administration API calls underneath
//!
//! Lifecycle operations work against any [`SearchIndexCollection`];
//! [`AtlasCollection`] is the production implementation.

pub mod client;
pub mod collection;
pub mod endpoints;
pub mod error;
pub mod lifecycle;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
pub mod polling;
pub mod tracing;
pub mod tracker;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use client::AtlasClient;
pub use client::builder::AtlasClientBuilder;
pub use collection::{AtlasCollection, SearchIndexCollection};
pub use error::{ClientError, IndexError, Result};
pub use lifecycle::{
    check_index_ready, check_index_ready_with, create_index, create_index_with,
    wait_for_index_deleted,
};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::{
    IndexDefinition, ProgressEvent, SearchIndex, SearchIndexStatus, TrackingRequest,
};
pub use polling::PollPolicy;
pub use tracker::ProgressTracker;
pub use tokio_util::sync::CancellationToken;

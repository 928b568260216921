//! REST endpoint implementations.
//!
//! Free functions taking the HTTP client and connection details explicitly,
//! so they can be exercised against a mock server without building a full
//! [`crate::AtlasClient`].

mod request;
mod search_indexes;
mod tracking;
pub mod url_encoding;

pub use request::{send_request_with_retry, send_request_with_retry_if};
pub use search_indexes::{
    CollectionTarget, create_search_index, drop_search_index, list_search_indexes,
};
pub use tracking::post_progress_event;
pub use url_encoding::encode_path_segment;

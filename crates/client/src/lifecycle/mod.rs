//! Search index lifecycle operations.
//!
//! - [`create_index`]: create, or drop-wait-recreate when the name is taken
//! - [`check_index_ready`]: block until the index reports `READY`
//! - [`wait_for_index_deleted`]: block until the index no longer lists
//!
//! Each has a `_with` form taking an explicit [`crate::PollPolicy`] and a
//! [`tokio_util::sync::CancellationToken`]; the short forms poll every five
//! seconds without limit.

mod create;
mod ready;

pub use create::{create_index, create_index_with, wait_for_index_deleted};
pub use ready::{check_index_ready, check_index_ready_with};

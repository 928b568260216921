//! CLI cancellation utilities.
//!
//! Responsibilities:
//! - Wire Ctrl+C to a shared `CancellationToken`.
//! - Define the `Cancelled` marker error for operations that are not
//!   index lifecycle waits (those report `IndexError::Cancelled`).
//! - Centralize the cancellation message.
//!
//! Invariants:
//! - Once cancelled, the token remains cancelled forever.

use std::fmt;
use std::future::Future;

use workshop_client::{CancellationToken, IndexError};

/// Marker error used to indicate user-driven cancellation.
#[derive(Debug, Clone, Copy)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Cancel `token` on the first Ctrl+C.
pub fn install_ctrl_c_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        token.cancel();
    });
}

/// Run `fut` unless `token` fires first.
pub async fn run_cancellable<F, T>(token: &CancellationToken, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    tokio::select! {
        _ = token.cancelled() => Err(Cancelled.into()),
        result = fut => result,
    }
}

/// Returns true if this anyhow error represents a cancellation.
pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.is::<Cancelled>()
            || cause
                .downcast_ref::<IndexError>()
                .is_some_and(IndexError::is_cancelled)
    })
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::collection::SearchIndexCollection;
use crate::error::IndexError;
use crate::models::SearchIndex;
use crate::polling::{PollPolicy, Poller};

/// Wait for `index_name` to report `READY`, polling every five seconds with
/// no limit.
pub async fn check_index_ready<C>(collection: &C, index_name: &str) -> Result<SearchIndex, IndexError>
where
    C: SearchIndexCollection + ?Sized,
{
    check_index_ready_with(
        collection,
        index_name,
        &PollPolicy::default(),
        &CancellationToken::new(),
    )
    .await
}

/// Wait for `index_name` to report `READY` and return its status record.
///
/// An index that is not listed yet is treated like one that is still
/// building. No listing is made after `READY` has been observed.
///
/// # Errors
///
/// A failing listing, unchanged; `PollExhausted` / `PollTimedOut` when the
/// policy's budget runs out; `Cancelled` when `cancel` fires.
pub async fn check_index_ready_with<C>(
    collection: &C,
    index_name: &str,
    policy: &PollPolicy,
    cancel: &CancellationToken,
) -> Result<SearchIndex, IndexError>
where
    C: SearchIndexCollection + ?Sized,
{
    let mut poller = Poller::new(policy, cancel, index_name, "ready");
    loop {
        poller.begin_attempt()?;
        let indexes = collection.list_search_indexes().await?;

        match indexes.into_iter().find(|idx| idx.name == index_name) {
            None => info!(index = index_name, "{} index not found", index_name),
            Some(index) if index.status.is_ready() => {
                info!(index = index_name, status = %index.status, "{} index status: {}", index_name, index.status);
                let definition = index
                    .latest_definition
                    .as_ref()
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "null".to_string());
                info!(index = index_name, "{} index definition: {}", index_name, definition);
                return Ok(index);
            }
            Some(index) => {
                info!(index = index_name, status = %index.status, "{} index status: {}", index_name, index.status);
            }
        }

        poller.wait().await?;
    }
}

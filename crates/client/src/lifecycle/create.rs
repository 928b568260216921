use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::collection::SearchIndexCollection;
use crate::error::IndexError;
use crate::models::IndexDefinition;
use crate::polling::{PollPolicy, Poller};

/// Create `index_name` from `definition`, replacing an existing index of the
/// same name. Polls for deletion every five seconds with no limit.
pub async fn create_index<C>(
    collection: &C,
    index_name: &str,
    definition: &IndexDefinition,
) -> Result<(), IndexError>
where
    C: SearchIndexCollection + ?Sized,
{
    create_index_with(
        collection,
        index_name,
        definition,
        &PollPolicy::default(),
        &CancellationToken::new(),
    )
    .await
}

/// Create `index_name` from `definition`.
///
/// When the service reports the name as taken, the existing index is
/// dropped, the listing is polled until it disappears, and the create is
/// issued again with the same model.
///
/// # Errors
///
/// - A failure of the first create other than a conflict, unchanged.
/// - [`IndexError::RecreateFailed`] wrapping whatever broke the
///   drop / wait / create sequence.
/// - [`IndexError::Cancelled`] if `cancel` fires while waiting.
pub async fn create_index_with<C>(
    collection: &C,
    index_name: &str,
    definition: &IndexDefinition,
    policy: &PollPolicy,
    cancel: &CancellationToken,
) -> Result<(), IndexError>
where
    C: SearchIndexCollection + ?Sized,
{
    let model = named_model(index_name, definition);
    let namespace = collection.namespace();

    info!(index = index_name, %namespace, "Creating the {} index", index_name);
    match collection.create_search_index(&model).await {
        Ok(()) => Ok(()),
        Err(IndexError::Conflict { message, .. }) => {
            warn!(
                index = index_name,
                %namespace,
                reason = %message,
                "{} index already exists, recreating...",
                index_name
            );
            recreate(collection, index_name, &model, policy, cancel)
                .await
                .map_err(|e| match e {
                    IndexError::Cancelled { .. } => e,
                    other => IndexError::RecreateFailed {
                        name: index_name.to_string(),
                        source: Box::new(other),
                    },
                })
        }
        Err(e) => Err(e),
    }
}

/// The caller's model, with `name` filled in when it has none.
fn named_model(index_name: &str, definition: &IndexDefinition) -> IndexDefinition {
    if definition.contains_key("name") {
        return definition.clone();
    }
    let mut model = definition.clone();
    model.insert("name".to_string(), Value::from(index_name));
    model
}

async fn recreate<C>(
    collection: &C,
    index_name: &str,
    model: &IndexDefinition,
    policy: &PollPolicy,
    cancel: &CancellationToken,
) -> Result<(), IndexError>
where
    C: SearchIndexCollection + ?Sized,
{
    info!(index = index_name, "Dropping {} index", index_name);
    collection.drop_search_index(index_name).await?;

    wait_for_index_deleted(collection, index_name, policy, cancel).await?;

    info!(index = index_name, "Creating new {} index", index_name);
    collection.create_search_index(model).await?;
    info!(index = index_name, "Successfully recreated the {} index", index_name);
    Ok(())
}

/// Poll the listing until no index named `index_name` is present.
///
/// # Errors
///
/// A failing listing, unchanged; `PollExhausted` / `PollTimedOut` when the
/// policy's budget runs out; `Cancelled` when `cancel` fires.
pub async fn wait_for_index_deleted<C>(
    collection: &C,
    index_name: &str,
    policy: &PollPolicy,
    cancel: &CancellationToken,
) -> Result<(), IndexError>
where
    C: SearchIndexCollection + ?Sized,
{
    let mut poller = Poller::new(policy, cancel, index_name, "deleted");
    loop {
        poller.begin_attempt()?;
        let indexes = collection.list_search_indexes().await?;

        match indexes.iter().find(|idx| idx.name == index_name) {
            None => {
                info!(
                    index = index_name,
                    attempts = poller.attempts(),
                    "{} index deletion complete",
                    index_name
                );
                return Ok(());
            }
            Some(existing) => {
                debug!(index = index_name, status = %existing.status, "Index still listed");
                info!(
                    index = index_name,
                    "Waiting for {} index deletion to complete...", index_name
                );
            }
        }

        poller.wait().await?;
    }
}

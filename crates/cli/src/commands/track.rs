//! Track command implementation.

use anyhow::Result;
use workshop_client::{CancellationToken, ProgressTracker};
use workshop_config::ConfigLoader;

use crate::cancellation::run_cancellable;

pub async fn run(
    task: &str,
    workshop_id: &str,
    loader: &ConfigLoader,
    cancel: &CancellationToken,
) -> Result<()> {
    let tracker = ProgressTracker::new(loader.build_tracking()?);

    run_cancellable(cancel, async {
        Ok(tracker.track_progress(task, workshop_id).await?)
    })
    .await?;

    println!("Tracked task '{}' for workshop '{}'", task, workshop_id);
    Ok(())
}

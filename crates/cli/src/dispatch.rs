//! Command dispatch logic.
//!
//! Responsibilities:
//! - Merge environment configuration with global and per-command flags.
//! - Route parsed CLI arguments to the command handlers.
//!
//! Invariants:
//! - Flags take precedence over environment variables.
//! - Each command builds only the configuration it needs, so `track` works
//!   without Atlas credentials and `indexes` without a tracking URL.

use anyhow::Result;
use std::time::Duration;
use workshop_client::{CancellationToken, MetricsCollector};
use workshop_config::ConfigLoader;

use crate::args::{Cli, Commands};
use crate::commands;

/// Environment configuration with the global Atlas flags applied.
fn loader_from_cli(cli: &Cli) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().from_env()?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_atlas_base_url(url.clone());
    }
    if let Some(ref group_id) = cli.group_id {
        loader = loader.with_group_id(group_id.clone());
    }
    if let Some(ref cluster) = cli.cluster {
        loader = loader.with_cluster_name(cluster.clone());
    }
    if let Some(ref token) = cli.access_token {
        loader = loader.with_access_token(token.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }

    Ok(loader)
}

pub(crate) async fn run_command(
    cli: Cli,
    metrics: Option<MetricsCollector>,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut loader = loader_from_cli(&cli)?;

    match cli.command {
        Commands::Indexes { command } => {
            commands::indexes::run(command, &loader, metrics, cancel).await?;
        }
        Commands::Track {
            task,
            workshop_id,
            tracking_url,
            sandbox_id,
        } => {
            if let Some(url) = tracking_url {
                loader = loader.with_tracking_url(url);
            }
            if let Some(sandbox) = sandbox_id {
                loader = loader.with_sandbox_id(sandbox);
            }
            commands::track::run(&task, &workshop_id, &loader, cancel).await?;
        }
    }

    Ok(())
}

//! Search index commands.
//!
//! Responsibilities:
//! - Build the Atlas client and poll policy from configuration plus flags.
//! - Run the create / ready / list / drop operations.
//! - Print results to stdout; progress logging goes to stderr.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;
use workshop_client::{
    AtlasClient, CancellationToken, IndexDefinition, MetricsCollector, PollPolicy, SearchIndex,
    SearchIndexCollection, check_index_ready_with, create_index_with, wait_for_index_deleted,
};
use workshop_config::ConfigLoader;

use crate::args::{CollectionArgs, PollArgs};
use crate::cancellation::run_cancellable;
use crate::error::InputError;

#[derive(Subcommand)]
pub enum IndexesCommand {
    /// Create an index, replacing an existing one with the same name
    Create {
        #[command(flatten)]
        target: CollectionArgs,

        #[command(flatten)]
        index: IndexNameArgs,

        /// JSON index model file, or '-' for stdin
        #[arg(long, value_name = "FILE")]
        definition: PathBuf,

        /// Wait for the index to become READY afterwards
        #[arg(long)]
        wait: bool,

        #[command(flatten)]
        poll: PollArgs,
    },

    /// Wait until an index reports READY and print its definition
    Ready {
        #[command(flatten)]
        target: CollectionArgs,

        #[command(flatten)]
        index: IndexNameArgs,

        #[command(flatten)]
        poll: PollArgs,
    },

    /// List the search indexes of a collection
    List {
        #[command(flatten)]
        target: CollectionArgs,

        /// Print the raw status records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Drop an index
    Drop {
        #[command(flatten)]
        target: CollectionArgs,

        #[command(flatten)]
        index: IndexNameArgs,

        /// Wait until the index is no longer listed
        #[arg(long)]
        wait: bool,

        #[command(flatten)]
        poll: PollArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct IndexNameArgs {
    /// Search index name
    #[arg(long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub name: String,
}

impl PollArgs {
    /// Configured policy with flag overrides applied.
    fn policy(&self, base: PollPolicy) -> PollPolicy {
        PollPolicy {
            interval: self.interval.unwrap_or(base.interval),
            max_attempts: self.max_attempts.or(base.max_attempts),
            deadline: self.deadline.or(base.deadline),
        }
    }
}

pub async fn run(
    command: IndexesCommand,
    loader: &ConfigLoader,
    metrics: Option<MetricsCollector>,
    cancel: &CancellationToken,
) -> Result<()> {
    let atlas = loader.build_atlas()?;
    let polling = PollPolicy::from(loader.build_polling()?);

    let mut builder = AtlasClient::builder().from_config(&atlas);
    if let Some(metrics) = metrics {
        builder = builder.metrics(metrics);
    }
    let client = builder.build()?;

    match command {
        IndexesCommand::Create {
            target,
            index,
            definition,
            wait,
            poll,
        } => {
            let model = read_definition(&definition)?;
            let collection = client.collection(&target.database, &target.collection);
            let policy = poll.policy(polling);

            create_index_with(&collection, &index.name, &model, &policy, cancel).await?;
            println!(
                "Created search index '{}' on {}",
                index.name,
                collection.namespace()
            );

            if wait {
                let ready =
                    check_index_ready_with(&collection, &index.name, &policy, cancel).await?;
                print_json(&ready)?;
            }
        }
        IndexesCommand::Ready {
            target,
            index,
            poll,
        } => {
            let collection = client.collection(&target.database, &target.collection);
            let ready = check_index_ready_with(
                &collection,
                &index.name,
                &poll.policy(polling),
                cancel,
            )
            .await?;
            print_json(&ready)?;
        }
        IndexesCommand::List { target, json } => {
            let indexes = run_cancellable(cancel, async {
                Ok(client
                    .list_search_indexes(&target.database, &target.collection)
                    .await?)
            })
            .await?;

            if json {
                print_json(&indexes)?;
            } else {
                print_table(&indexes);
            }
        }
        IndexesCommand::Drop {
            target,
            index,
            wait,
            poll,
        } => {
            let collection = client.collection(&target.database, &target.collection);
            info!(index = %index.name, namespace = %collection.namespace(), "Dropping search index");
            run_cancellable(cancel, async {
                Ok(collection.drop_search_index(&index.name).await?)
            })
            .await?;

            if wait {
                wait_for_index_deleted(&collection, &index.name, &poll.policy(polling), cancel)
                    .await?;
            }
            println!(
                "Dropped search index '{}' on {}",
                index.name,
                collection.namespace()
            );
        }
    }

    Ok(())
}

/// Read an index model from a file, or stdin for `-`. It must be a JSON object.
fn read_definition(path: &Path) -> Result<IndexDefinition> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read index definition from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| {
            InputError(format!(
                "Failed to read index definition {}: {}",
                path.display(),
                e
            ))
        })?
    };

    parse_definition(&raw)
}

fn parse_definition(raw: &str) -> Result<IndexDefinition> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| InputError(format!("Index definition is not valid JSON: {}", e)))?;
    match value {
        serde_json::Value::Object(model) => Ok(model),
        other => Err(InputError(format!(
            "Index definition must be a JSON object, got {}",
            json_kind(&other)
        ))
        .into()),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_table(indexes: &[SearchIndex]) {
    if indexes.is_empty() {
        println!("No search indexes found.");
        return;
    }

    let width = indexes
        .iter()
        .map(|i| i.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    println!("{:<width$}  {:<14}  TYPE", "NAME", "STATUS");
    for index in indexes {
        println!(
            "{:<width$}  {:<14}  {}",
            index.name,
            index.status.as_str(),
            index.index_type.as_deref().unwrap_or("-")
        );
    }
}

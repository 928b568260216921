//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse durations given in (possibly fractional) seconds.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not read Atlas or tracking settings from the environment; the
//!   config loader does, and flags given here override it.

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use crate::commands;

#[derive(Parser)]
#[command(name = "workshop-cli")]
#[command(about = "Manage Atlas Search indexes and report workshop progress", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  workshop-cli indexes create -d sample_mflix -c embedded_movies --name vector_index --definition index.json --wait\n  workshop-cli indexes ready -d sample_mflix -c embedded_movies --name vector_index --deadline 600\n  workshop-cli indexes list -d sample_mflix -c embedded_movies\n  workshop-cli track --task vector_search --workshop-id ai-rag-lab\n"
)]
pub struct Cli {
    /// Atlas Administration API root (env: ATLAS_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Atlas project id (env: ATLAS_GROUP_ID)
    #[arg(long, global = true)]
    pub group_id: Option<String>,

    /// Atlas cluster name (env: ATLAS_CLUSTER_NAME)
    #[arg(long, global = true)]
    pub cluster: Option<String>,

    /// Service account access token (env: ATLAS_ACCESS_TOKEN)
    #[arg(long, global = true)]
    pub access_token: Option<String>,

    /// Request timeout in seconds (env: ATLAS_TIMEOUT)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Retries for rate-limited or unavailable responses (env: ATLAS_MAX_RETRIES)
    #[arg(long, global = true)]
    pub max_retries: Option<usize>,

    /// OTLP gRPC endpoint for span export
    #[arg(long, global = true, env = "WORKSHOP_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Serve Prometheus metrics on this address (e.g. 127.0.0.1:9000)
    #[arg(long, global = true, value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    /// Write logs to stderr as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create, inspect and drop search indexes
    Indexes {
        #[command(subcommand)]
        command: commands::indexes::IndexesCommand,
    },

    /// Report a completed workshop task
    Track {
        /// Task identifier
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        task: String,

        /// Workshop identifier
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        workshop_id: String,

        /// Tracking endpoint (env: SERVERLESS_URL)
        #[arg(long)]
        tracking_url: Option<String>,

        /// Sandbox the progress is attributed to (env: CODESPACE_NAME)
        #[arg(long)]
        sandbox_id: Option<String>,
    },
}

/// Database and collection holding the search indexes.
#[derive(Args, Debug, Clone)]
pub struct CollectionArgs {
    /// Database name
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    pub database: String,

    /// Collection name
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    pub collection: String,
}

/// Overrides for the INDEX_POLL_* settings.
#[derive(Args, Debug, Clone, Default)]
pub struct PollArgs {
    /// Seconds between status checks (fractions allowed)
    #[arg(long, value_parser = parse_seconds)]
    pub interval: Option<Duration>,

    /// Give up after this many status checks
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,

    /// Give up after this many seconds (fractions allowed)
    #[arg(long, value_parser = parse_seconds)]
    pub deadline: Option<Duration>,
}

/// Parse a strictly positive number of seconds.
pub fn parse_seconds(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number of seconds"))?;
    if secs.is_nan() || secs <= 0.0 {
        return Err("must be greater than 0".to_string());
    }
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("5"), Ok(Duration::from_secs(5)));
        assert_eq!(parse_seconds("0.25"), Ok(Duration::from_millis(250)));
        assert!(parse_seconds("0").is_err());
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("soon").is_err());
        assert!(parse_seconds("NaN").is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

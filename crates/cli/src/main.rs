//! Workshop CLI - Atlas Search index helpers for workshop environments.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Set up logging, optional span export and optional metrics exposition.
//! - Run the requested command and translate its outcome into an exit code.
//!
//! Does NOT handle:
//! - Atlas API calls or index lifecycle logic (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can feed clap env defaults.
//! - Command output goes to stdout; logs and errors go to stderr.

mod args;
mod cancellation;
mod commands;
mod dispatch;
mod error;

use args::Cli;
use cancellation::{install_ctrl_c_handler, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use workshop_client::tracing::TracingConfig;
use workshop_client::{CancellationToken, MetricsCollector, metrics_exporter::MetricsExporter};
use workshop_config::ConfigLoader;

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    let mut tracing_config = TracingConfig::new()
        .with_service_name("workshop-cli")
        .with_json(cli.log_json);
    if let Some(ref endpoint) = cli.otlp_endpoint {
        tracing_config = tracing_config.with_otlp_endpoint(endpoint);
    }
    let tracing_guard = match tracing_config.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    let (_metrics_exporter, metrics) = match cli.metrics_bind.as_deref() {
        Some(bind_addr) => match MetricsExporter::install(bind_addr) {
            Ok(exporter) => (Some(exporter), Some(MetricsCollector::new())),
            Err(e) => {
                eprintln!("Failed to start metrics exporter: {}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        },
        None => (None, None),
    };

    let cancel = CancellationToken::new();
    install_ctrl_c_handler(cancel.clone());

    let exit_code = match run_command(cli, metrics, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    tracing_guard.shutdown();

    std::process::exit(exit_code.as_i32());
}

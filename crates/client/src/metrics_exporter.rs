//! Prometheus exposition of the counters recorded by [`crate::metrics`].
//!
//! ```rust,ignore
//! use workshop_client::metrics_exporter::MetricsExporter;
//!
//! let exporter = MetricsExporter::install("127.0.0.1:9000")?;
//! ```

use std::net::SocketAddr;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use tracing::info;

use crate::metrics::METRIC_REQUEST_DURATION;

/// Handle for an installed Prometheus recorder serving `/metrics`.
pub struct MetricsExporter {
    bind_addr: SocketAddr,
}

impl MetricsExporter {
    /// Install the Prometheus recorder globally and start its HTTP listener.
    ///
    /// Must be called from inside a tokio runtime.
    ///
    /// # Errors
    /// Invalid bind address, a recorder already installed, or a listener
    /// that cannot be started.
    pub fn install(bind_addr: &str) -> Result<Self, MetricsExporterError> {
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| MetricsExporterError::InvalidBindAddress(bind_addr.to_string(), e))?;

        PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(METRIC_REQUEST_DURATION.to_string()),
                &[0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0],
            )?
            .with_http_listener(addr)
            .install()?;

        info!(%addr, "Prometheus metrics exporter listening on /metrics");

        Ok(Self { bind_addr: addr })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Errors that can occur when installing the metrics exporter.
#[derive(Debug, thiserror::Error)]
pub enum MetricsExporterError {
    #[error("Invalid bind address '{0}': {1}")]
    InvalidBindAddress(String, std::net::AddrParseError),

    #[error("Failed to install Prometheus recorder: {0}")]
    BuildError(String),
}

impl From<metrics_exporter_prometheus::BuildError> for MetricsExporterError {
    fn from(err: metrics_exporter_prometheus::BuildError) -> Self {
        MetricsExporterError::BuildError(err.to_string())
    }
}

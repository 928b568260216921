//! Metrics collection for Atlas API calls.
//!
//! Records request latency histograms and request/retry/error counters.
//!
//! Exposition is handled by [`crate::metrics_exporter`]. Without an
//! installed recorder the `metrics` macros are no-ops.
//!
//! # Invariants
//! - Label names are `endpoint`, `method`, `status`, `error_category`
//! - Recording never fails and never affects the call being measured

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "workshop_atlas_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "workshop_atlas_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "workshop_atlas_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "workshop_atlas_errors_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection refused, DNS, reset
    Transport,
    /// Request timed out at the HTTP layer
    Timeout,
    /// HTTP 4xx
    Http4xx,
    /// HTTP 5xx
    Http5xx,
    /// Body did not match the expected shape
    Decode,
    Unknown,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Decode => "decode",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::ApiError { status, .. } => {
                if (400..500).contains(status) {
                    ErrorCategory::Http4xx
                } else if (500..600).contains(status) {
                    ErrorCategory::Http5xx
                } else {
                    ErrorCategory::Unknown
                }
            }
            ClientError::HttpError(e) => {
                if e.is_timeout() {
                    ErrorCategory::Timeout
                } else if e.is_connect() {
                    ErrorCategory::Transport
                } else if e.is_decode() {
                    ErrorCategory::Decode
                } else {
                    ErrorCategory::Unknown
                }
            }
            ClientError::InvalidResponse(_) => ErrorCategory::Decode,
            ClientError::MaxRetriesExceeded(_, inner) => ErrorCategory::from(inner.as_ref()),
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Thin typed wrapper around the `metrics` macros so every call site uses
/// the same names and labels.
///
/// # Example
///
/// ```rust,ignore
/// use workshop_client::metrics::MetricsCollector;
///
/// let collector = MetricsCollector::new();
/// collector.record_request_duration("/api/atlas/v2/groups/{groupId}/clusters/{clusterName}/search/indexes", "POST", Duration::from_millis(150), Some(200));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of one HTTP attempt.
    ///
    /// `status` is `None` when no response was received.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt, retries included.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record a retry. `attempt` is 1-based and excludes the initial request.
    pub fn record_retry(&self, endpoint: &str, method: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Categorize and record a client error.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        self.record_error(endpoint, method, ErrorCategory::from(error));
    }
}

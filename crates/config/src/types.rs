//! Typed configuration values.
//!
//! Responsibilities:
//! - Hold validated settings for the Atlas API connection, the progress
//!   tracking endpoint and index polling.
//!
//! Does NOT handle:
//! - Reading the environment or `.env` files (see `loader`).
//!
//! Invariants:
//! - Values of these types have passed `ConfigLoader` validation.
//! - URLs never carry a trailing slash.

use secrecy::SecretString;
use std::time::Duration;

use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS};

/// Connection settings for the Atlas Administration API.
#[derive(Debug, Clone)]
pub struct AtlasConfig {
    /// API root, e.g. `https://cloud.mongodb.com`.
    pub base_url: String,
    /// Atlas project (group) identifier.
    pub group_id: String,
    /// Cluster hosting the collections whose search indexes are managed.
    pub cluster_name: String,
    /// Bearer token for a service account.
    pub access_token: SecretString,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry budget for 429/502/503/504 responses.
    pub max_retries: usize,
}

impl AtlasConfig {
    /// Convenience constructor using default timeout and retry budget.
    pub fn new(
        base_url: impl Into<String>,
        group_id: impl Into<String>,
        cluster_name: impl Into<String>,
        access_token: SecretString,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            group_id: group_id.into(),
            cluster_name: cluster_name.into(),
            access_token,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Where progress events go and which sandbox they are attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingConfig {
    pub tracking_url: String,
    pub sandbox_id: Option<String>,
}

impl TrackingConfig {
    pub fn new(tracking_url: impl Into<String>, sandbox_id: Option<String>) -> Self {
        Self {
            tracking_url: tracking_url.into(),
            sandbox_id,
        }
    }
}

/// Bounds for the search index polling loops.
///
/// `max_attempts` and `deadline` both default to `None`, which keeps polling
/// until the condition holds or the caller cancels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    pub interval: Duration,
    pub max_attempts: Option<u32>,
    pub deadline: Option<Duration>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_attempts: None,
            deadline: None,
        }
    }
}

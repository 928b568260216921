//! Centralized constants for the workshop workspace.
//!
//! Default values shared by the config, client and CLI crates.

// =============================================================================
// Atlas Connection Defaults
// =============================================================================

/// Default root of the Atlas Administration API.
pub const DEFAULT_ATLAS_BASE_URL: &str = "https://cloud.mongodb.com";

/// Versioned media type required by the Atlas Administration API v2.
pub const ATLAS_API_MEDIA_TYPE: &str = "application/vnd.atlas.2024-05-30+json";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of retries for rate-limited or unavailable responses.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound accepted for the retry budget.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Index Polling Defaults
// =============================================================================

/// Default interval between search index listing calls, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

// =============================================================================
// Environment Variable Names
// =============================================================================

pub const ENV_TRACKING_URL: &str = "SERVERLESS_URL";
pub const ENV_SANDBOX_ID: &str = "CODESPACE_NAME";
pub const ENV_ATLAS_BASE_URL: &str = "ATLAS_BASE_URL";
pub const ENV_ATLAS_ACCESS_TOKEN: &str = "ATLAS_ACCESS_TOKEN";
pub const ENV_ATLAS_GROUP_ID: &str = "ATLAS_GROUP_ID";
pub const ENV_ATLAS_CLUSTER_NAME: &str = "ATLAS_CLUSTER_NAME";
pub const ENV_ATLAS_TIMEOUT: &str = "ATLAS_TIMEOUT";
pub const ENV_ATLAS_MAX_RETRIES: &str = "ATLAS_MAX_RETRIES";
pub const ENV_POLL_INTERVAL: &str = "INDEX_POLL_INTERVAL";
pub const ENV_POLL_MAX_ATTEMPTS: &str = "INDEX_POLL_MAX_ATTEMPTS";
pub const ENV_POLL_DEADLINE: &str = "INDEX_POLL_DEADLINE";
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";

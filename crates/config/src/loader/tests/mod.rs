//! Tests for the configuration loader builder.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.

use std::sync::Mutex;

pub mod env_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Every variable the loader reads, unset. Use as the base of `temp_env::with_vars`.
pub fn cleared_env() -> Vec<(&'static str, Option<&'static str>)> {
    vec![
        ("SERVERLESS_URL", None),
        ("CODESPACE_NAME", None),
        ("ATLAS_BASE_URL", None),
        ("ATLAS_ACCESS_TOKEN", None),
        ("ATLAS_GROUP_ID", None),
        ("ATLAS_CLUSTER_NAME", None),
        ("ATLAS_TIMEOUT", None),
        ("ATLAS_MAX_RETRIES", None),
        ("INDEX_POLL_INTERVAL", None),
        ("INDEX_POLL_MAX_ATTEMPTS", None),
        ("INDEX_POLL_DEADLINE", None),
    ]
}

/// `cleared_env()` with some entries replaced.
pub fn env_with(
    overrides: &[(&'static str, &'static str)],
) -> Vec<(&'static str, Option<&'static str>)> {
    let mut vars = cleared_env();
    for (key, value) in overrides {
        vars.retain(|(k, _)| k != key);
        vars.push((key, Some(value)));
    }
    vars
}

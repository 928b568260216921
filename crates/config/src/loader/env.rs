//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse the workshop environment variables.
//! - Apply them to a `ConfigLoader` instance.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.
//! - Invalid numeric values return `ConfigError::InvalidValue`.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{
    ENV_ATLAS_ACCESS_TOKEN, ENV_ATLAS_BASE_URL, ENV_ATLAS_CLUSTER_NAME, ENV_ATLAS_GROUP_ID,
    ENV_ATLAS_MAX_RETRIES, ENV_ATLAS_TIMEOUT, ENV_POLL_DEADLINE, ENV_POLL_INTERVAL,
    ENV_POLL_MAX_ATTEMPTS, ENV_SANDBOX_ID, ENV_TRACKING_URL,
};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_var<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: format!("must be {}", expected),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none(ENV_TRACKING_URL) {
        loader.set_tracking_url(Some(url));
    }
    if let Some(sandbox) = env_var_or_none(ENV_SANDBOX_ID) {
        loader.set_sandbox_id(Some(sandbox));
    }
    if let Some(url) = env_var_or_none(ENV_ATLAS_BASE_URL) {
        loader.set_atlas_base_url(Some(url));
    }
    if let Some(token) = env_var_or_none(ENV_ATLAS_ACCESS_TOKEN) {
        loader.set_access_token(Some(SecretString::new(token.into())));
    }
    if let Some(group) = env_var_or_none(ENV_ATLAS_GROUP_ID) {
        loader.set_group_id(Some(group));
    }
    if let Some(cluster) = env_var_or_none(ENV_ATLAS_CLUSTER_NAME) {
        loader.set_cluster_name(Some(cluster));
    }
    if let Some(secs) = parse_var::<u64>(ENV_ATLAS_TIMEOUT, "a number of seconds")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = parse_var::<usize>(ENV_ATLAS_MAX_RETRIES, "a non-negative integer")? {
        loader.set_max_retries(Some(retries));
    }
    if let Some(secs) = parse_var::<u64>(ENV_POLL_INTERVAL, "a number of seconds")? {
        loader.set_poll_interval(Some(Duration::from_secs(secs)));
    }
    if let Some(attempts) = parse_var::<u32>(ENV_POLL_MAX_ATTEMPTS, "a positive integer")? {
        loader.set_poll_max_attempts(Some(attempts));
    }
    if let Some(secs) = parse_var::<u64>(ENV_POLL_DEADLINE, "a number of seconds")? {
        loader.set_poll_deadline(Some(Duration::from_secs(secs)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        let key1 = "_WORKSHOP_TEST_UNSET_VAR";
        assert!(env_var_or_none(key1).is_none(), "Unset env var should return None");

        temp_env::with_vars([(key1, Some(""))], || {
            assert!(env_var_or_none(key1).is_none(), "Empty string should return None");
        });

        temp_env::with_vars([(key1, Some("   "))], || {
            assert!(
                env_var_or_none(key1).is_none(),
                "Whitespace-only env var should return None"
            );
        });

        let key2 = "_WORKSHOP_TEST_SET_VAR";
        temp_env::with_vars([(key2, Some(" test-value "))], || {
            assert_eq!(env_var_or_none(key2), Some("test-value".to_string()));
        });
    }

    #[test]
    #[serial]
    fn test_parse_var_reports_variable_name() {
        temp_env::with_vars([(ENV_POLL_MAX_ATTEMPTS, Some("lots"))], || {
            let err = parse_var::<u32>(ENV_POLL_MAX_ATTEMPTS, "a positive integer").unwrap_err();
            match err {
                ConfigError::InvalidValue { var, message } => {
                    assert_eq!(var, "INDEX_POLL_MAX_ATTEMPTS");
                    assert!(message.contains("positive integer"));
                }
                other => panic!("unexpected error: {:?}", other),
            }
        });
    }
}

//! Environment variable tests for the configuration loader.

use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use secrecy::ExposeSecret;
use serial_test::serial;
use std::time::Duration;

use super::{cleared_env, env_lock, env_with};

#[test]
#[serial]
fn test_tracking_config_from_env() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        env_with(&[
            ("SERVERLESS_URL", "https://tracker.example.com/api/"),
            ("CODESPACE_NAME", "fluffy-sandbox-42"),
        ]),
        || {
            let tracking = ConfigLoader::new()
                .from_env()
                .unwrap()
                .build_tracking()
                .unwrap();

            assert_eq!(tracking.tracking_url, "https://tracker.example.com/api/");
            assert_eq!(tracking.sandbox_id.as_deref(), Some("fluffy-sandbox-42"));
        },
    );
}

#[test]
#[serial]
fn test_missing_sandbox_id_is_none() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        env_with(&[("SERVERLESS_URL", "https://tracker.example.com")]),
        || {
            let tracking = ConfigLoader::new()
                .from_env()
                .unwrap()
                .build_tracking()
                .unwrap();

            assert!(tracking.sandbox_id.is_none());
        },
    );
}

#[test]
#[serial]
fn test_missing_tracking_url_is_reported() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(cleared_env(), || {
        let result = ConfigLoader::new().from_env().unwrap().build_tracking();
        match result {
            Err(ConfigError::MissingEnvVar(var)) => assert_eq!(var, "SERVERLESS_URL"),
            other => panic!("Expected MissingEnvVar, got {:?}", other),
        }
    });
}

#[test]
#[serial]
fn test_atlas_config_from_env() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        env_with(&[
            ("ATLAS_ACCESS_TOKEN", "secret-token"),
            ("ATLAS_GROUP_ID", "5f1a2b3c4d5e6f7a8b9c0d1e"),
            ("ATLAS_CLUSTER_NAME", "WorkshopCluster"),
            ("ATLAS_TIMEOUT", "45"),
            ("ATLAS_MAX_RETRIES", "5"),
        ]),
        || {
            let atlas = ConfigLoader::new()
                .from_env()
                .unwrap()
                .build_atlas()
                .unwrap();

            assert_eq!(atlas.base_url, "https://cloud.mongodb.com");
            assert_eq!(atlas.group_id, "5f1a2b3c4d5e6f7a8b9c0d1e");
            assert_eq!(atlas.cluster_name, "WorkshopCluster");
            assert_eq!(atlas.access_token.expose_secret(), "secret-token");
            assert_eq!(atlas.timeout, Duration::from_secs(45));
            assert_eq!(atlas.max_retries, 5);
        },
    );
}

#[test]
#[serial]
fn test_atlas_requires_token() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        env_with(&[
            ("ATLAS_GROUP_ID", "group"),
            ("ATLAS_CLUSTER_NAME", "cluster"),
        ]),
        || {
            let result = ConfigLoader::new().from_env().unwrap().build_atlas();
            assert!(matches!(
                result,
                Err(ConfigError::MissingEnvVar(ref var)) if var == "ATLAS_ACCESS_TOKEN"
            ));
        },
    );
}

#[test]
#[serial]
fn test_builder_overrides_env() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        env_with(&[
            ("ATLAS_ACCESS_TOKEN", "env-token"),
            ("ATLAS_GROUP_ID", "env-group"),
            ("ATLAS_CLUSTER_NAME", "env-cluster"),
        ]),
        || {
            let atlas = ConfigLoader::new()
                .from_env()
                .unwrap()
                .with_cluster_name("cli-cluster".to_string())
                .with_access_token("cli-token".to_string())
                .build_atlas()
                .unwrap();

            assert_eq!(atlas.cluster_name, "cli-cluster");
            assert_eq!(atlas.access_token.expose_secret(), "cli-token");
            assert_eq!(atlas.group_id, "env-group");
        },
    );
}

#[test]
#[serial]
fn test_whitespace_only_env_var_treated_as_unset() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        env_with(&[
            ("SERVERLESS_URL", "https://tracker.example.com"),
            ("CODESPACE_NAME", "   "),
        ]),
        || {
            let tracking = ConfigLoader::new()
                .from_env()
                .unwrap()
                .build_tracking()
                .unwrap();
            assert!(tracking.sandbox_id.is_none());
        },
    );
}

#[test]
#[serial]
fn test_polling_from_env() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        env_with(&[
            ("INDEX_POLL_INTERVAL", "2"),
            ("INDEX_POLL_MAX_ATTEMPTS", "30"),
            ("INDEX_POLL_DEADLINE", "600"),
        ]),
        || {
            let polling = ConfigLoader::new()
                .from_env()
                .unwrap()
                .build_polling()
                .unwrap();

            assert_eq!(polling.interval, Duration::from_secs(2));
            assert_eq!(polling.max_attempts, Some(30));
            assert_eq!(polling.deadline, Some(Duration::from_secs(600)));
        },
    );
}

#[test]
#[serial]
fn test_non_numeric_timeout_env_is_invalid() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(env_with(&[("ATLAS_TIMEOUT", "soon")]), || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref var, .. }) if var == "ATLAS_TIMEOUT"
        ));
    });
}

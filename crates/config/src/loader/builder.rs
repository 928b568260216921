//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Collect optional settings from the environment and explicit overrides.
//! - Validate and assemble `AtlasConfig`, `TrackingConfig` and `PollingConfig`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods called after `from_env()` take precedence over the environment.
//! - The three `build_*` methods borrow the loader so one loader can feed all of them.
//! - URLs are validated as http(s). The Atlas base URL is stored without
//!   trailing slashes; the tracking URL is stored unchanged.

use secrecy::SecretString;
use std::time::Duration;
use url::Url;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_ATLAS_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS,
    ENV_ATLAS_ACCESS_TOKEN, ENV_ATLAS_BASE_URL, ENV_ATLAS_CLUSTER_NAME, ENV_ATLAS_GROUP_ID,
    ENV_DOTENV_DISABLED, ENV_TRACKING_URL, MAX_MAX_RETRIES, MAX_TIMEOUT_SECS,
};
use crate::types::{AtlasConfig, PollingConfig, TrackingConfig};

/// Configuration loader that builds config from environment variables and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    atlas_base_url: Option<String>,
    access_token: Option<SecretString>,
    group_id: Option<String>,
    cluster_name: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    tracking_url: Option<String>,
    sandbox_id: Option<String>,
    poll_interval: Option<Duration>,
    poll_max_attempts: Option<u32>,
    poll_deadline: Option<Duration>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(ENV_DOTENV_DISABLED).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// # Errors
    ///
    /// - `ConfigError::DotenvParse` if the file exists but has invalid syntax
    /// - `ConfigError::DotenvIo` if the file exists but cannot be read
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub fn with_atlas_base_url(mut self, url: String) -> Self {
        self.atlas_base_url = Some(url);
        self
    }

    pub fn with_access_token(mut self, token: String) -> Self {
        self.access_token = Some(SecretString::new(token.into()));
        self
    }

    pub fn with_group_id(mut self, group_id: String) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_cluster_name(mut self, cluster_name: String) -> Self {
        self.cluster_name = Some(cluster_name);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    pub fn with_tracking_url(mut self, url: String) -> Self {
        self.tracking_url = Some(url);
        self
    }

    pub fn with_sandbox_id(mut self, sandbox_id: String) -> Self {
        self.sandbox_id = Some(sandbox_id);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn with_poll_max_attempts(mut self, attempts: u32) -> Self {
        self.poll_max_attempts = Some(attempts);
        self
    }

    pub fn with_poll_deadline(mut self, deadline: Duration) -> Self {
        self.poll_deadline = Some(deadline);
        self
    }

    pub(crate) fn set_atlas_base_url(&mut self, url: Option<String>) {
        self.atlas_base_url = url;
    }

    pub(crate) fn set_access_token(&mut self, token: Option<SecretString>) {
        self.access_token = token;
    }

    pub(crate) fn set_group_id(&mut self, group_id: Option<String>) {
        self.group_id = group_id;
    }

    pub(crate) fn set_cluster_name(&mut self, cluster_name: Option<String>) {
        self.cluster_name = cluster_name;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }

    pub(crate) fn set_tracking_url(&mut self, url: Option<String>) {
        self.tracking_url = url;
    }

    pub(crate) fn set_sandbox_id(&mut self, sandbox_id: Option<String>) {
        self.sandbox_id = sandbox_id;
    }

    pub(crate) fn set_poll_interval(&mut self, interval: Option<Duration>) {
        self.poll_interval = interval;
    }

    pub(crate) fn set_poll_max_attempts(&mut self, attempts: Option<u32>) {
        self.poll_max_attempts = attempts;
    }

    pub(crate) fn set_poll_deadline(&mut self, deadline: Option<Duration>) {
        self.poll_deadline = deadline;
    }

    /// Validate an http(s) URL.
    fn validate_url(var: &str, raw: &str) -> Result<(), ConfigError> {
        let parsed = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
            var: var.to_string(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                var: var.to_string(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(())
    }

    /// Validate an API root and strip trailing slashes so paths can be appended.
    fn normalize_base_url(var: &str, raw: &str) -> Result<String, ConfigError> {
        Self::validate_url(var, raw)?;
        Ok(raw.trim_end_matches('/').to_string())
    }

    fn validate_timeout(timeout: Duration) -> Result<Duration, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                message: "must be greater than 0".to_string(),
            });
        }
        if timeout.as_secs() > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "{}s exceeds maximum of {}s",
                    timeout.as_secs(),
                    MAX_TIMEOUT_SECS
                ),
            });
        }
        Ok(timeout)
    }

    /// Build the Atlas connection settings.
    ///
    /// # Errors
    ///
    /// `MissingEnvVar` when the token, group or cluster is absent; validation
    /// errors for malformed URLs, timeouts or retry budgets.
    pub fn build_atlas(&self) -> Result<AtlasConfig, ConfigError> {
        let base_url = Self::normalize_base_url(
            ENV_ATLAS_BASE_URL,
            self.atlas_base_url
                .as_deref()
                .unwrap_or(DEFAULT_ATLAS_BASE_URL),
        )?;

        let access_token = self
            .access_token
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar(ENV_ATLAS_ACCESS_TOKEN.to_string()))?;
        let group_id = self
            .group_id
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar(ENV_ATLAS_GROUP_ID.to_string()))?;
        let cluster_name = self
            .cluster_name
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar(ENV_ATLAS_CLUSTER_NAME.to_string()))?;

        let timeout = Self::validate_timeout(
            self.timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        )?;

        let max_retries = self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
        if max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, max_retries
                ),
            });
        }

        Ok(AtlasConfig {
            base_url,
            group_id,
            cluster_name,
            access_token,
            timeout,
            max_retries,
        })
    }

    /// Build the progress tracking settings.
    ///
    /// The sandbox identifier is optional; the tracking URL is not. The URL
    /// is the full endpoint and is kept exactly as given.
    pub fn build_tracking(&self) -> Result<TrackingConfig, ConfigError> {
        let tracking_url = self
            .tracking_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar(ENV_TRACKING_URL.to_string()))?;
        Self::validate_url(ENV_TRACKING_URL, tracking_url)?;

        Ok(TrackingConfig {
            tracking_url: tracking_url.to_string(),
            sandbox_id: self.sandbox_id.clone(),
        })
    }

    /// Build the polling bounds. Everything here has a default.
    pub fn build_polling(&self) -> Result<PollingConfig, ConfigError> {
        let interval = self
            .poll_interval
            .unwrap_or(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));
        if interval.is_zero() {
            return Err(ConfigError::InvalidPollInterval {
                message: "must be greater than 0".to_string(),
            });
        }

        if self.poll_max_attempts == Some(0) {
            return Err(ConfigError::InvalidPollBudget {
                message: "max attempts must be at least 1".to_string(),
            });
        }
        if self.poll_deadline.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::InvalidPollBudget {
                message: "deadline must be greater than 0".to_string(),
            });
        }

        Ok(PollingConfig {
            interval,
            max_attempts: self.poll_max_attempts,
            deadline: self.poll_deadline,
        })
    }
}

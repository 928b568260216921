//! Builder for [`AtlasClient`].
//!
//! # Invariants
//! - An access token, group id and cluster name are required before `build()`
//! - The base URL never ends with a slash

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::client::AtlasClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use workshop_config::{
    AtlasConfig,
    constants::{DEFAULT_ATLAS_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS},
};

const MAX_REDIRECTS: usize = 5;

pub struct AtlasClientBuilder {
    base_url: String,
    access_token: Option<SecretString>,
    group_id: Option<String>,
    cluster_name: Option<String>,
    timeout: Duration,
    max_retries: usize,
    metrics: Option<MetricsCollector>,
}

impl Default for AtlasClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ATLAS_BASE_URL.to_string(),
            access_token: None,
            group_id: None,
            cluster_name: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            metrics: None,
        }
    }
}

impl AtlasClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// API root, `https://cloud.mongodb.com` unless overridden.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn access_token(mut self, token: SecretString) -> Self {
        self.access_token = Some(token);
        self
    }

    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn cluster_name(mut self, cluster_name: impl Into<String>) -> Self {
        self.cluster_name = Some(cluster_name.into());
        self
    }

    /// Per-request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retries for 429/502/503/504 responses (1s, 2s, 4s ... backoff). Default is 3.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Copy every setting from a loaded [`AtlasConfig`].
    pub fn from_config(mut self, config: &AtlasConfig) -> Self {
        self.base_url = config.base_url.clone();
        self.access_token = Some(config.access_token.clone());
        self.group_id = Some(config.group_id.clone());
        self.cluster_name = Some(config.cluster_name.clone());
        self.timeout = config.timeout;
        self.max_retries = config.max_retries;
        self
    }

    fn normalize_base_url(url: &str) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// # Errors
    ///
    /// - [`ClientError::MissingToken`] without an access token (or with an empty one)
    /// - [`ClientError::InvalidUrl`] without a base URL, group id or cluster name
    /// - `ClientError::HttpError` if the HTTP client fails to build
    pub fn build(self) -> Result<AtlasClient> {
        let base_url = Self::normalize_base_url(&self.base_url);
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("base_url is required".to_string()));
        }

        let access_token = self
            .access_token
            .filter(|t| !t.expose_secret().trim().is_empty())
            .ok_or(ClientError::MissingToken)?;
        let group_id = self
            .group_id
            .ok_or_else(|| ClientError::InvalidUrl("group_id is required".to_string()))?;
        let cluster_name = self
            .cluster_name
            .ok_or_else(|| ClientError::InvalidUrl("cluster_name is required".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(AtlasClient {
            http,
            base_url,
            access_token,
            group_id,
            cluster_name,
            max_retries: self.max_retries,
            metrics: self.metrics,
        })
    }
}

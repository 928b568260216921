//! Workshop progress reporting.
//!
//! Fire-and-forget: one POST per call, the response status is logged and
//! otherwise ignored.

use tracing::info;
use workshop_config::TrackingConfig;

use crate::endpoints;
use crate::error::Result;
use crate::models::{ProgressEvent, TrackingRequest};

/// Sends progress events for one sandbox to one tracking endpoint.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    http: reqwest::Client,
    config: TrackingConfig,
}

impl ProgressTracker {
    pub fn new(config: TrackingConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Reuse an existing HTTP client (connection pool, timeouts).
    pub fn with_http_client(config: TrackingConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// The event that [`Self::track_progress`] would send.
    pub fn event(&self, task: &str, workshop_id: &str) -> ProgressEvent {
        ProgressEvent {
            task: task.to_string(),
            workshop_id: workshop_id.to_string(),
            sandbox_id: self.config.sandbox_id.clone(),
        }
    }

    /// Report that `task` of `workshop_id` is done.
    ///
    /// Exactly one request is sent; non-2xx answers are not errors.
    ///
    /// # Errors
    ///
    /// `ClientError::HttpError` when the endpoint cannot be reached.
    pub async fn track_progress(&self, task: &str, workshop_id: &str) -> Result<()> {
        info!(task, workshop_id, "Tracking progress for task {}", task);
        let request = TrackingRequest::track_progress(self.event(task, workshop_id));
        endpoints::post_progress_event(&self.http, &self.config.tracking_url, &request).await?;
        Ok(())
    }
}

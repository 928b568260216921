//! Progress tracking payloads.

use serde::{Deserialize, Serialize};

/// Value of the outer `task` field on every tracking request.
pub const TRACK_PROGRESS_TASK: &str = "track_progress";

/// A completed workshop task, attributed to a sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub task: String,
    pub workshop_id: String,
    /// Serialized as `null` when the sandbox is unknown.
    pub sandbox_id: Option<String>,
}

/// Body POSTed to the tracking endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRequest {
    pub task: String,
    pub data: ProgressEvent,
}

impl TrackingRequest {
    pub fn track_progress(event: ProgressEvent) -> Self {
        Self {
            task: TRACK_PROGRESS_TASK.to_string(),
            data: event,
        }
    }
}

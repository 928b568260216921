//! Progress tracking endpoint.

use reqwest::Client;
use tracing::debug;

use crate::error::Result;
use crate::models::TrackingRequest;

/// POST one tracking request. Sent exactly once, never retried.
///
/// The response status is returned for logging only; callers are not
/// expected to act on it.
pub async fn post_progress_event(
    client: &Client,
    tracking_url: &str,
    request: &TrackingRequest,
) -> Result<u16> {
    let response = client.post(tracking_url).json(request).send().await?;
    let status = response.status().as_u16();
    debug!(status, task = %request.data.task, "Progress event delivered");
    Ok(status)
}

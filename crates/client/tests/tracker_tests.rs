//! Progress tracker tests.
//!
//! # Invariants
//! - One POST with `{"task":"track_progress","data":{task, workshop_id, sandbox_id}}`
//! - `sandbox_id` is `null` when unset
//! - The response status never turns into an error and is never retried
//! - An unreachable endpoint yields `ClientError::HttpError`

mod common;

use common::*;
use serde_json::json;
use workshop_client::{ClientError, ProgressTracker};
use workshop_config::TrackingConfig;
use wiremock::matchers::{body_json, header, method, path};

#[tokio::test]
async fn test_track_progress_body_with_sandbox() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/track"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "task": "track_progress",
            "data": {
                "task": "vector_search",
                "workshop_id": "ai-rag-lab",
                "sandbox_id": "codespace-42"
            }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tracker = ProgressTracker::new(TrackingConfig::new(
        format!("{}/track", mock_server.uri()),
        Some("codespace-42".to_string()),
    ));

    tracker
        .track_progress("vector_search", "ai-rag-lab")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_track_progress_without_sandbox_sends_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_json(json!({
            "task": "track_progress",
            "data": {
                "task": "create_index",
                "workshop_id": "search-lab",
                "sandbox_id": null
            }
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tracker = ProgressTracker::new(TrackingConfig::new(mock_server.uri(), None));

    tracker
        .track_progress("create_index", "search-lab")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_error_status_is_ignored_and_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tracker = ProgressTracker::new(TrackingConfig::new(mock_server.uri(), None));

    let result = tracker.track_progress("task", "workshop").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_unreachable_endpoint_is_http_error() {
    let tracker = ProgressTracker::new(TrackingConfig::new("http://127.0.0.1:1/track", None));

    let err = tracker.track_progress("task", "workshop").await.unwrap_err();
    assert!(matches!(err, ClientError::HttpError(_)));
}

#[tokio::test]
async fn test_configured_url_with_trailing_slash_is_posted_to_as_is() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/track/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = workshop_config::ConfigLoader::new()
        .with_tracking_url(format!("{}/api/track/", mock_server.uri()))
        .build_tracking()
        .unwrap();
    let tracker = ProgressTracker::new(config);

    tracker.track_progress("lab1", "w1").await.unwrap();

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.path(), "/api/track/");
}

//! Retry helper for HTTP requests with exponential backoff.
//!
//! Requests answered with 429/502/503/504 are retried with exponential
//! backoff (1s, 2s, 4s = 2^attempt). Any other non-success status becomes a
//! [`ClientError::ApiError`] built from the Atlas error document.

use reqwest::{RequestBuilder, Response};
use std::time::Instant;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::AtlasErrorBody;

/// Sends an HTTP request, retrying transient statuses.
///
/// `max_retries` counts retries, so `0` means a single attempt. `endpoint`
/// and `method` are metric labels and should be the templated path.
///
/// # Errors
///
/// - `ClientError::MaxRetriesExceeded` wrapping the last API error when every
///   attempt got a retryable status.
/// - `ClientError::ApiError` for any other non-success status.
/// - `ClientError::HttpError` for transport failures, without retrying.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    send_request_with_retry_if(
        builder,
        max_retries,
        endpoint,
        method,
        metrics,
        ClientError::is_retryable_status,
    )
    .await
}

/// Like [`send_request_with_retry`], retrying only statuses accepted by
/// `is_retryable`.
pub async fn send_request_with_retry_if(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
    is_retryable: fn(u16) -> bool,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                debug!("Request builder cannot be cloned, single attempt only");
                return builder.send().await.map_err(ClientError::from);
            }
        };
        let attempt_builder = crate::tracing::inject_trace_context(attempt_builder);

        if let Some(m) = metrics {
            m.record_request(endpoint, method);
        }
        let started = Instant::now();
        let sent = attempt_builder.send().await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                let err = ClientError::from(e);
                if let Some(m) = metrics {
                    m.record_request_duration(endpoint, method, started.elapsed(), None);
                    m.record_client_error(endpoint, method, &err);
                }
                return Err(err);
            }
        };

        let status = response.status().as_u16();
        if let Some(m) = metrics {
            m.record_request_duration(endpoint, method, started.elapsed(), Some(status));
        }

        if response.status().is_success() {
            if attempt > 0 {
                debug!(attempt = attempt + 1, "Request succeeded after retry");
            }
            return Ok(response);
        }

        if is_retryable(status) && attempt < max_retries {
            let backoff_secs = 2u64.pow(attempt as u32);
            debug!(
                attempt = attempt + 1,
                max_retries = max_retries + 1,
                status,
                backoff_secs,
                "Transient response, retrying with exponential backoff"
            );
            if let Some(m) = metrics {
                m.record_retry(endpoint, method, attempt + 1);
            }
            tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
            continue;
        }

        let err = api_error_from_response(response).await;
        if let Some(m) = metrics {
            m.record_client_error(endpoint, method, &err);
        }

        if is_retryable(status) {
            debug!(
                attempts = attempt + 1,
                "Max retries exhausted for transient response"
            );
            return Err(ClientError::MaxRetriesExceeded(attempt + 1, Box::new(err)));
        }
        return Err(err);
    }

    unreachable!("the final attempt always returns")
}

/// Turn a non-success response into `ClientError::ApiError`.
async fn api_error_from_response(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    match serde_json::from_str::<AtlasErrorBody>(&body) {
        Ok(parsed) => ClientError::ApiError {
            status,
            url,
            error_code: parsed.error_code.clone(),
            message: parsed.message().unwrap_or(body),
        },
        Err(_) => ClientError::ApiError {
            status,
            url,
            error_code: None,
            message: body,
        },
    }
}

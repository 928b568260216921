//! Error types for the workshop client.
//!
//! Two layers:
//! - [`ClientError`]: what a single HTTP exchange with Atlas or the tracking
//!   endpoint can produce.
//! - [`IndexError`]: what the search index lifecycle operations report, so
//!   callers can branch on the kind of failure instead of parsing messages.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for HTTP-level client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during a single API exchange.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure (connect, TLS, timeout, body decode).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success response from the Atlas API.
    #[error("API error ({status}) at {url}: {message}{}", .error_code.as_ref().map(|c| format!(" [{c}]")).unwrap_or_default())]
    ApiError {
        status: u16,
        url: String,
        error_code: Option<String>,
        message: String,
    },

    /// Response body did not have the expected shape.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No access token was supplied to the builder.
    #[error("Atlas access token is required")]
    MissingToken,

    /// Maximum retries exceeded; carries the last error seen.
    #[error("Maximum retries exceeded ({0} attempts): {1}")]
    MaxRetriesExceeded(usize, Box<ClientError>),
}

impl ClientError {
    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (rate limiting)
    /// - 502: Bad Gateway (transient server error)
    /// - 503: Service Unavailable (transient server error)
    /// - 504: Gateway Timeout (transient server error)
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// Check if a status is safe to retry for a non-idempotent request.
    ///
    /// Only 429 and 503 mean the request was refused before being processed;
    /// after a 502 or 504 the service may already have acted on it.
    pub fn is_retryable_status_for_create(status: u16) -> bool {
        matches!(status, 429 | 503)
    }

    /// Check if this error indicates authentication or authorization failure.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::MissingToken => true,
            Self::ApiError { status, .. } => matches!(status, 401 | 403),
            Self::MaxRetriesExceeded(_, inner) => inner.is_auth_error(),
            _ => false,
        }
    }

    /// Check if this error is Atlas refusing to create an index because one
    /// with the same name already exists.
    ///
    /// Atlas reports this either as 409 or as 400 with a duplicate error code.
    pub fn is_duplicate_index(&self) -> bool {
        match self {
            Self::ApiError { status: 409, .. } => true,
            Self::ApiError {
                status: 400,
                error_code: Some(code),
                ..
            } => code.contains("DUPLICATE") || code.contains("ALREADY_EXISTS"),
            _ => false,
        }
    }

    /// HTTP status of the response, if the error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            Self::MaxRetriesExceeded(_, inner) => inner.status(),
            _ => None,
        }
    }
}

/// Errors reported by the search index lifecycle operations.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The service refused a create because the index already exists.
    #[error("search index '{name}' already exists: {message}")]
    Conflict { name: String, message: String },

    /// The drop / wait / create sequence that follows a conflict failed.
    #[error("Error during index recreation: {source}")]
    RecreateFailed {
        name: String,
        #[source]
        source: Box<IndexError>,
    },

    /// The underlying API call failed.
    #[error(transparent)]
    Transport(#[from] ClientError),

    /// The poll's attempt budget ran out before the condition held.
    #[error("search index '{name}' was not {target} after {attempts} attempts")]
    PollExhausted {
        name: String,
        target: &'static str,
        attempts: u32,
    },

    /// The poll's deadline passed before the condition held.
    #[error("search index '{name}' was not {target} within {elapsed:?}")]
    PollTimedOut {
        name: String,
        target: &'static str,
        elapsed: Duration,
    },

    /// The caller cancelled the operation.
    #[error("waiting on search index '{name}' was cancelled")]
    Cancelled { name: String },
}

impl IndexError {
    /// True for `Cancelled`, including when wrapped by `RecreateFailed`.
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Cancelled { .. } => true,
            Self::RecreateFailed { source, .. } => source.is_cancelled(),
            _ => false,
        }
    }

    /// The innermost HTTP error, if any.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Transport(e) => Some(e),
            Self::RecreateFailed { source, .. } => source.client_error(),
            _ => None,
        }
    }
}

//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map client, lifecycle, config and input errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs).
//!
//! Invariants:
//! - Exit codes 1-10 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use workshop_client::{ClientError, IndexError};
use workshop_config::ConfigError;

/// Structured exit codes for workshop-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// Missing, invalid or insufficient access token (HTTP 401/403).
    AuthenticationFailed = 2,

    /// Network, timeout, or DNS failure.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// Project, cluster, collection or index not found.
    NotFound = 4,

    /// Bad flags, configuration or index definition.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// HTTP 429 after retries.
    RateLimited = 7,

    /// HTTP 502/503/504 after retries.
    ServiceUnavailable = 8,

    /// The index name was taken and the drop-and-recreate sequence failed.
    RecreateFailed = 9,

    /// An index did not reach the awaited state within the poll budget.
    PollBudgetExhausted = 10,

    /// SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    /// Connection errors, rate limiting and unavailability may clear up on their own.
    #[allow(dead_code)]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            ExitCode::ConnectionError | ExitCode::RateLimited | ExitCode::ServiceUnavailable
        )
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::MissingToken => ExitCode::AuthenticationFailed,
            ClientError::ApiError {
                status: 401 | 403, ..
            } => ExitCode::AuthenticationFailed,

            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,

            ClientError::ApiError { status: 404, .. } => ExitCode::NotFound,

            ClientError::InvalidResponse(_) => ExitCode::ValidationError,
            ClientError::ApiError { status: 400, .. } => ExitCode::ValidationError,

            ClientError::ApiError { status: 409, .. } => ExitCode::RecreateFailed,

            ClientError::ApiError { status: 429, .. } => ExitCode::RateLimited,

            ClientError::ApiError {
                status: 502 | 503 | 504,
                ..
            } => ExitCode::ServiceUnavailable,

            ClientError::MaxRetriesExceeded(_, inner) => Self::from(inner.as_ref()),

            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }

            ClientError::ApiError { .. } => ExitCode::GeneralError,
        }
    }
}

impl From<&IndexError> for ExitCode {
    fn from(err: &IndexError) -> Self {
        match err {
            IndexError::Transport(e) => Self::from(e),
            IndexError::Conflict { .. } => ExitCode::RecreateFailed,
            IndexError::RecreateFailed { source, .. } if source.is_cancelled() => {
                ExitCode::Interrupted
            }
            IndexError::RecreateFailed { .. } => ExitCode::RecreateFailed,
            IndexError::PollExhausted { .. } | IndexError::PollTimedOut { .. } => {
                ExitCode::PollBudgetExhausted
            }
            IndexError::Cancelled { .. } => ExitCode::Interrupted,
        }
    }
}

/// Bad user input detected by the CLI itself (unreadable or malformed
/// index definition, for example).
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct InputError(pub String);

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError when no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(index_err) = cause.downcast_ref::<IndexError>() {
                return ExitCode::from(index_err);
            }
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.is::<ConfigError>() || cause.is::<InputError>() {
                return ExitCode::ValidationError;
            }
        }

        ExitCode::GeneralError
    }
}

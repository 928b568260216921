//! Error types for configuration loading.
//!
//! Invariants:
//! - Every variant names the offending variable or setting.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Invalid URL in {var}: {message}")]
    InvalidUrl { var: String, message: String },

    #[error("invalid timeout: {message}")]
    InvalidTimeout { message: String },

    #[error("invalid max retries: {message}")]
    InvalidMaxRetries { message: String },

    #[error("invalid poll interval: {message}")]
    InvalidPollInterval { message: String },

    #[error("invalid poll budget: {message}")]
    InvalidPollBudget { message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

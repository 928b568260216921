//! Configuration management for the workshop index helpers.
//!
//! This crate provides the typed configuration consumed by the client and
//! CLI crates, loaded from `.env` files, environment variables and explicit
//! builder overrides.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AtlasConfig, PollingConfig, TrackingConfig};

//! Configuration loader for environment variables and `.env` files.
//!
//! Responsibilities:
//! - Load configuration from `.env` files and environment variables.
//! - Provide a builder-pattern `ConfigLoader` with explicit overrides.
//! - Enforce the `DOTENV_DISABLED` gate so tests never pick up a local `.env`.
//!
//! Does NOT handle:
//! - Talking to Atlas or the tracking endpoint (see the client crate).
//!
//! Invariants / Assumptions:
//! - Values set through `with_*` after `from_env()` win over the environment.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;
mod error;

#[cfg(test)]
mod tests;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

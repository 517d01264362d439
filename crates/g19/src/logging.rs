//! # Log Setup
//!
//! `RUST_LOG` wins; otherwise the configured level is used as the filter.

use tracing_subscriber::EnvFilter;

use crate::error::{ShellError, ShellResult};

/// Installs the global `fmt` subscriber.
///
/// # Errors
///
/// [`ShellError::Logging`] if `level` is not a valid filter directive or a
/// subscriber is already installed.
pub fn init(level: &str) -> ShellResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|err| ShellError::Logging(err.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .try_init()
        .map_err(|err| ShellError::Logging(err.to_string()))
}

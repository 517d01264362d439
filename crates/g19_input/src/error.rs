//! # Input Error Types

use thiserror::Error;

/// Errors from the key input pipeline.
#[derive(Error, Debug)]
pub enum InputError {
    /// The key reader thread could not be spawned.
    #[error("failed to spawn key reader thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Result type for input operations.
pub type InputResult<T> = Result<T, InputError>;

//! # Scheduler Error Types

use thiserror::Error;

/// Errors raised by the scheduler itself.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// The loop thread could not be spawned.
    #[error("failed to spawn scheduler thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Result type for scheduler operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Error returned by a job body. Logged by the scheduler, never propagated.
pub type JobError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type of a job body.
pub type JobResult = Result<(), JobError>;

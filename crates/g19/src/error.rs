//! # Shell Error Types

use std::path::PathBuf;

use g19_device::DeviceError;
use g19_input::InputError;
use g19_scheduler::SchedulerError;
use thiserror::Error;

/// Errors that end the daemon.
#[derive(Error, Debug)]
pub enum ShellError {
    /// The config file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        /// File that was asked for.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid.
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The config file parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    /// Device discovery or a fatal frame error.
    #[error("device: {0}")]
    Device(#[from] DeviceError),

    /// USB mode was asked for in a build without USB support.
    #[error("built without USB support; rebuild with `--features usb` or use the simulator")]
    UsbUnavailable,

    /// The scheduler thread could not start.
    #[error("scheduler: {0}")]
    Scheduler(#[from] SchedulerError),

    /// The key reader could not start.
    #[error("key input: {0}")]
    Input(#[from] InputError),

    /// Signal handlers could not be installed.
    #[error("signal handler: {0}")]
    Signal(std::io::Error),

    /// The log subscriber could not be installed.
    #[error("logging: {0}")]
    Logging(String),
}

/// Result type for the shell.
pub type ShellResult<T> = Result<T, ShellError>;

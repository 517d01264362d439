//! # Device Error Types

use thiserror::Error;

/// A single USB transfer failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The transfer did not complete within its timeout.
    #[error("transfer timed out")]
    Timeout,
    /// The device went away.
    #[error("device disconnected")]
    Disconnected,
    /// The endpoint stalled.
    #[error("endpoint stalled")]
    Stall,
    /// Anything else the USB stack reported.
    #[error("usb error: {0}")]
    Other(String),
}

/// Result type for single transfers.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors surfaced by the driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// A required USB device is not attached.
    #[error("usb device {vendor:04x}:{product:04x} not found")]
    NotFound {
        /// Vendor id searched for.
        vendor: u16,
        /// Product id searched for.
        product: u16,
    },

    /// Opening, claiming or talking to the device failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A frame of the wrong length was handed to `send_frame`.
    #[error("frame must be {expected} bytes, got {actual}")]
    FrameSize {
        /// `width * height * 2`.
        expected: usize,
        /// What the caller passed.
        actual: usize,
    },
}

/// Result type for driver operations.
pub type DeviceResult<T> = Result<T, DeviceError>;

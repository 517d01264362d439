//! # USB Transport
//!
//! The seam between the protocol and libusb. The driver only ever talks
//! to a [`UsbTransport`], so tests substitute a recording fake.

use std::time::Duration;

use crate::error::TransportResult;

/// Which of the two claimed interface handles a transfer goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interface {
    /// Interface 0: frames and display keys.
    Display,
    /// Interface 1: G/M keys, M-key lights, backlight, brightness.
    Keys,
}

/// Setup packet of an outgoing control transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlRequest {
    /// `bmRequestType`.
    pub request_type: u8,
    /// `bRequest`.
    pub request: u8,
    /// `wValue`.
    pub value: u16,
    /// `wIndex`.
    pub index: u16,
}

impl ControlRequest {
    /// Class request, recipient interface, host to device.
    pub const CLASS_INTERFACE_OUT: u8 = 0x21;
    /// Vendor request, recipient interface, host to device.
    pub const VENDOR_INTERFACE_OUT: u8 = 0x41;
    /// HID `SET_REPORT`.
    pub const SET_REPORT: u8 = 0x09;
    /// Vendor brightness request.
    pub const SET_BRIGHTNESS: u8 = 0x0a;

    /// A class `SET_REPORT` with the given report value on interface 1.
    #[must_use]
    pub const fn set_report(value: u16) -> Self {
        Self {
            request_type: Self::CLASS_INTERFACE_OUT,
            request: Self::SET_REPORT,
            value,
            index: 0x01,
        }
    }

    /// The vendor brightness request.
    #[must_use]
    pub const fn brightness() -> Self {
        Self {
            request_type: Self::VENDOR_INTERFACE_OUT,
            request: Self::SET_BRIGHTNESS,
            value: 0,
            index: 0,
        }
    }
}

/// Raw USB operations against the two claimed interfaces.
///
/// Implementations need not be thread-safe beyond `Send`: the driver
/// serializes every call behind its own mutex.
pub trait UsbTransport: Send {
    /// Bulk-out transfer. Returns bytes written.
    ///
    /// # Errors
    ///
    /// Any transport failure.
    fn bulk_write(
        &mut self,
        interface: Interface,
        endpoint: u8,
        data: &[u8],
        timeout: Duration,
    ) -> TransportResult<usize>;

    /// Interrupt-in transfer into `buf`. Returns bytes read.
    ///
    /// # Errors
    ///
    /// Any transport failure, including [`crate::TransportError::Timeout`].
    fn interrupt_read(
        &mut self,
        interface: Interface,
        endpoint: u8,
        buf: &mut [u8],
        timeout: Duration,
    ) -> TransportResult<usize>;

    /// Outgoing control transfer. Returns bytes written.
    ///
    /// # Errors
    ///
    /// Any transport failure.
    fn control_write(
        &mut self,
        interface: Interface,
        request: ControlRequest,
        data: &[u8],
        timeout: Duration,
    ) -> TransportResult<usize>;

    /// Bus reset of both interface handles.
    ///
    /// # Errors
    ///
    /// Any transport failure.
    fn reset(&mut self) -> TransportResult<()>;
}

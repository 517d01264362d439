//! # libusb Transport
//!
//! Discovery and claiming of the LCD composite device.
//!
//! ```text
//! 046d:c229 (LCD) ── handle 0 ── interface 0: frames, display keys
//!                 └─ handle 1 ── interface 1: G/M keys, lights, backlight
//! 046d:c228 (keyboard) ── must be present, not opened
//! ```

use std::time::Duration;

use rusb::{Context, Device, DeviceHandle, UsbContext};
use tracing::{debug, info};

use crate::error::{DeviceError, DeviceResult, TransportError, TransportResult};
use crate::transport::{ControlRequest, Interface, UsbTransport};
use crate::{KEYBOARD_PRODUCT_ID, LCD_PRODUCT_ID, VENDOR_ID};

impl From<rusb::Error> for TransportError {
    fn from(err: rusb::Error) -> Self {
        match err {
            rusb::Error::Timeout => Self::Timeout,
            rusb::Error::NoDevice => Self::Disconnected,
            rusb::Error::Pipe => Self::Stall,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<rusb::Error> for DeviceError {
    fn from(err: rusb::Error) -> Self {
        Self::Transport(err.into())
    }
}

/// Claimed interface handles on the LCD device.
pub struct RusbTransport {
    display: DeviceHandle<Context>,
    keys: DeviceHandle<Context>,
}

impl RusbTransport {
    /// Finds both devices, opens two handles on the LCD and claims its interfaces.
    ///
    /// With `reset_on_start` the first handle is bus-reset and reopened
    /// before anything is claimed.
    ///
    /// # Errors
    ///
    /// [`DeviceError::NotFound`] when either device is missing, or the
    /// transport error of the failing open/claim.
    pub fn open(reset_on_start: bool) -> DeviceResult<Self> {
        let context = Context::new()?;
        let lcd = find(&context, LCD_PRODUCT_ID)?;
        // The keyboard is not driven, but an LCD without it is not a G19.
        find(&context, KEYBOARD_PRODUCT_ID)?;

        let mut display = lcd.open()?;
        if reset_on_start {
            display.reset()?;
            display = lcd.open()?;
            debug!("lcd reset before claim");
        }
        let mut keys = lcd.open()?;

        if let Err(err) = display.detach_kernel_driver(0) {
            debug!(error = %err, "no kernel driver detached from interface 0");
        }
        if let Err(err) = keys.detach_kernel_driver(1) {
            debug!(error = %err, "no kernel driver detached from interface 1");
        }
        for handle in [&mut display, &mut keys] {
            if let Err(err) = handle.set_active_configuration(1) {
                debug!(error = %err, "set configuration 1 failed");
            }
        }
        display.claim_interface(0)?;
        keys.claim_interface(1)?;

        info!(
            bus = lcd.bus_number(),
            address = lcd.address(),
            "g19 lcd claimed"
        );
        Ok(Self { display, keys })
    }

    fn handle(&self, interface: Interface) -> &DeviceHandle<Context> {
        match interface {
            Interface::Display => &self.display,
            Interface::Keys => &self.keys,
        }
    }
}

fn find(context: &Context, product: u16) -> DeviceResult<Device<Context>> {
    for device in context.devices()?.iter() {
        let Ok(desc) = device.device_descriptor() else {
            continue;
        };
        if desc.vendor_id() == VENDOR_ID && desc.product_id() == product {
            return Ok(device);
        }
    }
    Err(DeviceError::NotFound {
        vendor: VENDOR_ID,
        product,
    })
}

impl UsbTransport for RusbTransport {
    fn bulk_write(
        &mut self,
        interface: Interface,
        endpoint: u8,
        data: &[u8],
        timeout: Duration,
    ) -> TransportResult<usize> {
        Ok(self.handle(interface).write_bulk(endpoint, data, timeout)?)
    }

    fn interrupt_read(
        &mut self,
        interface: Interface,
        endpoint: u8,
        buf: &mut [u8],
        timeout: Duration,
    ) -> TransportResult<usize> {
        Ok(self.handle(interface).read_interrupt(endpoint, buf, timeout)?)
    }

    fn control_write(
        &mut self,
        interface: Interface,
        request: ControlRequest,
        data: &[u8],
        timeout: Duration,
    ) -> TransportResult<usize> {
        Ok(self.handle(interface).write_control(
            request.request_type,
            request.request,
            request.value,
            request.index,
            data,
            timeout,
        )?)
    }

    fn reset(&mut self) -> TransportResult<()> {
        self.display.reset()?;
        self.keys.reset()?;
        Ok(())
    }
}

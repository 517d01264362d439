//! # G19 Driver
//!
//! The protocol on top of a [`UsbTransport`]. One mutex guards the
//! transport and the frame scratch buffer together.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::error::{DeviceResult, TransportError};
use crate::frame::{self, PixelOrder, HEIGHT, WIDTH};
use crate::keys::KeyLight;
use crate::transport::{ControlRequest, Interface, UsbTransport};

/// Bulk-out endpoint for frames.
pub const EP_FRAME: u8 = 0x02;
/// Interrupt-in endpoint for the display keys.
pub const EP_DISPLAY_KEYS: u8 = 0x81;
/// Interrupt-in endpoint for the G/M keys.
pub const EP_G_KEYS: u8 = 0x83;

/// Second byte of every well-formed display key packet.
const DISPLAY_PACKET_MARKER: u8 = 128;
/// First byte of every well-formed G/M key packet.
const G_PACKET_MARKER: u8 = 2;
/// Largest G/M key report.
const G_PACKET_MAX: usize = 20;

/// Report value of a volatile backlight change.
const REPORT_BACKLIGHT: u16 = 0x307;
/// Report value of a persisted backlight change.
const REPORT_BACKLIGHT_SAVE: u16 = 0x308;
/// Report value of the M-key lights.
const REPORT_M_LIGHTS: u16 = 0x305;

/// Transfer timeouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    /// Bulk frame write.
    pub frame: Duration,
    /// Interrupt key reads.
    pub key_read: Duration,
    /// Volatile control transfers.
    pub control: Duration,
    /// Control transfers that write device flash.
    pub persist: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            frame: Duration::from_millis(1000),
            key_read: Duration::from_millis(10),
            control: Duration::from_millis(10),
            persist: Duration::from_millis(1000),
        }
    }
}

/// Frame counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverStats {
    /// Frames written to the device.
    pub frames_sent: u64,
    /// Frames lost to transport errors.
    pub frames_dropped: u64,
    /// Frames swallowed while interrupted.
    pub frames_suppressed: u64,
}

/// Anything that can show a frame.
pub trait Lcd: Send + Sync {
    /// Panel size in pixels.
    fn image_size(&self) -> (u32, u32);

    /// Shows one frame of row-major 5-6-5 pixels.
    ///
    /// # Errors
    ///
    /// [`crate::DeviceError::FrameSize`] if `pixels` is not `width * height * 2`
    /// bytes. Transport failures drop the frame without an error.
    fn send_frame(&self, pixels: &[u8]) -> DeviceResult<()>;

    /// Bus reset.
    ///
    /// # Errors
    ///
    /// Transport failures.
    fn reset(&self) -> DeviceResult<()>;
}

struct Link<T> {
    transport: T,
    scratch: Vec<u8>,
}

/// Driver for the G19 LCD.
pub struct G19<T: UsbTransport> {
    link: Mutex<Link<T>>,
    interrupted: AtomicBool,
    timeouts: Timeouts,
    pixel_order: PixelOrder,
    frames_sent: AtomicU64,
    frames_dropped: AtomicU64,
    frames_suppressed: AtomicU64,
}

impl<T: UsbTransport> G19<T> {
    /// Wraps an opened and claimed transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::with_options(transport, Timeouts::default(), PixelOrder::default())
    }

    /// Wraps a transport with explicit timeouts and wire pixel order.
    #[must_use]
    pub fn with_options(transport: T, timeouts: Timeouts, pixel_order: PixelOrder) -> Self {
        Self {
            link: Mutex::new(Link {
                transport,
                scratch: Vec::with_capacity(frame::FRAME_LEN),
            }),
            interrupted: AtomicBool::new(false),
            timeouts,
            pixel_order,
            frames_sent: AtomicU64::new(0),
            frames_dropped: AtomicU64::new(0),
            frames_suppressed: AtomicU64::new(0),
        }
    }

    /// While set, [`Lcd::send_frame`] does nothing.
    pub fn set_interrupted(&self, interrupted: bool) {
        self.interrupted.store(interrupted, Ordering::Release);
        debug!(interrupted, "frame output interrupt flag changed");
    }

    /// Current interrupt flag.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Acquire)
    }

    /// Timeouts in use.
    #[must_use]
    pub const fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Frame counters.
    #[must_use]
    pub fn stats(&self) -> DriverStats {
        DriverStats {
            frames_sent: self.frames_sent.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
            frames_suppressed: self.frames_suppressed.load(Ordering::Relaxed),
        }
    }

    /// Current display key mask, or `None` when nothing was reported.
    pub fn read_display_menu_keys(&self) -> Option<u8> {
        let mut buf = [0u8; 2];
        let read = self.link.lock().transport.interrupt_read(
            Interface::Display,
            EP_DISPLAY_KEYS,
            &mut buf,
            self.timeouts.key_read,
        );
        let len = quiet_read(read, EP_DISPLAY_KEYS)?;
        if len == 0 {
            return None;
        }
        if len < 2 || buf[1] != DISPLAY_PACKET_MARKER {
            warn!(packet = ?&buf[..len], "unexpected display key packet");
        }
        Some(buf[0])
    }

    /// Current 24-bit G/M key mask, or `None` when nothing usable was reported.
    pub fn read_g_and_m_keys(&self) -> Option<u32> {
        let mut buf = [0u8; G_PACKET_MAX];
        let read = self.link.lock().transport.interrupt_read(
            Interface::Keys,
            EP_G_KEYS,
            &mut buf,
            self.timeouts.key_read,
        );
        let len = quiet_read(read, EP_G_KEYS)?;
        if len < 4 || buf[0] != G_PACKET_MARKER {
            trace!(packet = ?&buf[..len], "ignored G key packet");
            return None;
        }
        Some(u32::from(buf[1]) | u32::from(buf[2]) << 8 | u32::from(buf[3]) << 16)
    }

    /// Sets the keyboard backlight until the next power cycle.
    pub fn set_bg_color(&self, r: u8, g: u8, b: u8) {
        self.control(
            ControlRequest::set_report(REPORT_BACKLIGHT),
            &[7, r, g, b],
            self.timeouts.control,
            "backlight",
        );
    }

    /// Sets the keyboard backlight and stores it as the power-on default.
    pub fn save_default_bg_color(&self, r: u8, g: u8, b: u8) {
        self.control(
            ControlRequest::set_report(REPORT_BACKLIGHT_SAVE),
            &[7, r, g, b],
            self.timeouts.persist,
            "backlight default",
        );
    }

    /// Switches the M-key LEDs so exactly `lights` are on.
    pub fn set_enabled_m_keys(&self, lights: &[KeyLight]) {
        self.control(
            ControlRequest::set_report(REPORT_M_LIGHTS),
            &[5, KeyLight::mask(lights)],
            self.timeouts.control,
            "m-key lights",
        );
    }

    /// Sets the panel brightness, `0..=100`.
    pub fn set_display_brightness(&self, level: u8) {
        let level = level.min(100);
        self.control(
            ControlRequest::brightness(),
            &[level, 0xe2, 0x12, 0x00, 0x8c, 0x11, 0x00, 0x10, 0x00],
            self.timeouts.control,
            "brightness",
        );
    }

    fn control(&self, request: ControlRequest, data: &[u8], timeout: Duration, what: &str) {
        let result = self
            .link
            .lock()
            .transport
            .control_write(Interface::Keys, request, data, timeout);
        match result {
            Ok(_) => trace!(what, "control transfer sent"),
            Err(err) => warn!(what, error = %err, "control transfer failed"),
        }
    }
}

impl<T: UsbTransport> Lcd for G19<T> {
    fn image_size(&self) -> (u32, u32) {
        (WIDTH, HEIGHT)
    }

    fn send_frame(&self, pixels: &[u8]) -> DeviceResult<()> {
        frame::check_size(pixels)?;
        if self.is_interrupted() {
            self.frames_suppressed.fetch_add(1, Ordering::Relaxed);
            return Ok(());
        }

        let mut link = self.link.lock();
        let Link { transport, scratch } = &mut *link;
        frame::encode(pixels, self.pixel_order, scratch)?;
        match transport.bulk_write(Interface::Display, EP_FRAME, scratch.as_slice(), self.timeouts.frame) {
            Ok(written) => {
                self.frames_sent.fetch_add(1, Ordering::Relaxed);
                trace!(bytes = written, "frame sent");
            }
            Err(err) => {
                self.frames_dropped.fetch_add(1, Ordering::Relaxed);
                warn!(error = %err, "frame dropped");
            }
        }
        Ok(())
    }

    fn reset(&self) -> DeviceResult<()> {
        self.link.lock().transport.reset()?;
        debug!("device reset");
        Ok(())
    }
}

/// Timeouts are the common case for polled reads; neither they nor errors are surfaced.
fn quiet_read(read: Result<usize, TransportError>, endpoint: u8) -> Option<usize> {
    match read {
        Ok(len) => Some(len),
        Err(TransportError::Timeout) => None,
        Err(err) => {
            debug!(endpoint, error = %err, "key read failed");
            None
        }
    }
}

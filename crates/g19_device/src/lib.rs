//! # G19 Device
//!
//! Everything that touches the wire: discovery, frame encoding, key
//! packets and control transfers.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          G19<T>                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │ send_frame ─► encode (prefix + pixels) ─┐                    │
//! │ read_*_keys ─────────────────────────────┼─► Mutex<T: UsbTransport>
//! │ set_bg_color / brightness / M lights ───┘                    │
//! └─────────────────────────────────────────────────────────────┘
//!                                              │
//!                         RusbTransport (usb feature) / test fakes
//! ```
//!
//! The transport handle is not safe to use from several threads at once,
//! so every transfer happens under one mutex. Every transfer has a short
//! timeout, which bounds how long the mutex is held.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod driver;
pub mod error;
pub mod frame;
pub mod keys;
pub mod simulator;
pub mod transport;
#[cfg(feature = "usb")]
pub mod usb;

pub use driver::{DriverStats, Lcd, Timeouts, G19};
pub use error::{DeviceError, DeviceResult, TransportError, TransportResult};
pub use frame::{PixelOrder, FRAME_PIXEL_BYTES, HEIGHT, WIDTH};
pub use keys::{DisplayKey, GKey, KeyLight};
pub use simulator::Simulator;
pub use transport::{ControlRequest, Interface, UsbTransport};
#[cfg(feature = "usb")]
pub use usb::RusbTransport;

/// Logitech vendor id.
pub const VENDOR_ID: u16 = 0x046d;
/// Product id of the LCD composite device.
pub const LCD_PRODUCT_ID: u16 = 0xc229;
/// Product id of the keyboard itself (detected, not driven).
pub const KEYBOARD_PRODUCT_ID: u16 = 0xc228;

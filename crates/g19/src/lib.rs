//! # G19 Shell
//!
//! Wires the scheduler, driver, key input and widget engine into one
//! daemon.
//!
//! ```text
//!   g19d ──► Config (TOML + flags) ──► logging::init
//!                 │
//!                 ▼
//!          runtime::run ──► Scheduler ──► KeyListener
//!                 │              │
//!                 ▼              ▼
//!               App ◄──── main queue ◄── key events
//!                 │
//!                 ▼
//!            Lcd::send_frame (USB or simulator)
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod demo;
pub mod error;
pub mod logging;
pub mod runtime;

pub use config::Config;
pub use error::{ShellError, ShellResult};

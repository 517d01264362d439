//! # G19 Input
//!
//! Turns the two polled key masks into discrete key events.
//!
//! ```text
//! scheduler ──(size-1 queue, drop newest)──► key reader thread
//!                                               │ read_display_keys / read_g_keys
//!                                               ▼
//!                                          KeyTranslator ──► main queue (KeyEvent)
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod listener;
pub mod translator;

pub use error::{InputError, InputResult};
pub use listener::{KeyListener, KeySource, KEY_POLL_PRIORITY};
pub use translator::{Key, KeyEdge, KeyEvent, KeyGroupState, KeyTranslator};

//! # G19 Widgets
//!
//! Retained-mode widget engine for the 320x240 panel.
//!
//! ```text
//!                 App (root, owns scheduler + back stack)
//!                  │
//!        ┌─────────┼──────────┐
//!     Screen     Screen     Screen        one visible at a time
//!        │
//!   ┌────┴────┐
//!  Text      Bar ...                      leaves paint into a clipped Canvas
//!
//!  dirty: leaf ──► screen ──► root        (upward only)
//!  repaint(screen): every descendant      (downward)
//! ```
//!
//! Painting happens only when the root is dirty. The whole tree is then
//! redrawn into a 5-6-5 [`Surface`], whose bytes are the frame handed to
//! the driver.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod app;
pub mod canvas;
pub mod color;
pub mod fetch;
pub mod message;
pub mod surface;
pub mod tree;
pub mod widget;
pub mod widgets;

pub use app::{App, ScreenFactory, ScreenId};
pub use canvas::{drawn, Canvas};
pub use color::Color;
pub use fetch::{FetchCallback, Fetcher};
pub use message::{Command, Message, TimerToken};
pub use surface::Surface;
pub use tree::{WidgetId, WidgetTree};
pub use widget::{Action, EventContext, PaintContext, Widget};
pub use widgets::{Bar, BarOrientation, Image, Line, Menu, MenuAction, Orientation, Panel, Text, FONTS};

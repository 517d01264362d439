//! # G19 Geometry
//!
//! Layout math for a 320x240 panel. Widgets are placed by naming a point on
//! their border (an [`Anchor`]) instead of computing corners by hand.
//!
//! ## The Anchor Model
//!
//! ```text
//!   TopLeft ────── TopCenter ────── TopRight
//!      │                                │
//!  CenterLeft       Center        CenterRight
//!      │                                │
//! BottomLeft ──── BottomCenter ─── BottomRight
//! ```
//!
//! A [`Rectangle`] is built from one anchored point plus a [`Size`] and can
//! report any of the nine anchors afterwards:
//!
//! ```
//! use g19_geometry::{Anchor, Point, Rectangle, Size};
//!
//! let a = Rectangle::new(Point::new(10.0, 10.0).anchored(Anchor::TopLeft), Size::new(50.0, 20.0));
//! // B's top-left sits at A's bottom-right plus an offset.
//! let b = Rectangle::new(
//!     (a.position(Anchor::BottomRight) + Point::new(4.0, 0.0)).anchored(Anchor::TopLeft),
//!     Size::new(30.0, 30.0),
//! );
//! assert_eq!(b.left(), 64.0);
//! assert_eq!(b.top(), 30.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod anchor;
pub mod point;
pub mod rectangle;
pub mod size;

pub use anchor::{Anchor, HAnchor, VAnchor};
pub use point::{AnchoredPoint, Point};
pub use rectangle::{PixelRect, Rectangle};
pub use size::Size;

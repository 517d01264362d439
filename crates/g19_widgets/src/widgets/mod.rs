//! # Leaf Widgets
//!
//! The closed catalogue of widgets the screens are built from.

mod bar;
mod image;
mod line;
mod menu;
mod panel;
mod text;

pub use bar::{Bar, BarOrientation};
pub use image::Image;
pub use line::{Line, Orientation};
pub use menu::{Menu, MenuAction};
pub use panel::Panel;
pub use text::{Text, FONTS};

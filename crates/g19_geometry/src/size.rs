//! # Sizes

use std::ops::{Add, Div, Sub};

use crate::anchor::Anchor;
use crate::point::Point;

/// An immutable width/height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// Zero extent.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when both extents are no larger than `other`'s.
    #[must_use]
    pub fn fits_into(self, other: Self) -> bool {
        self.width <= other.width && self.height <= other.height
    }

    /// Where `anchor` lies on a rectangle of this size whose top-left is the origin.
    #[must_use]
    pub fn position(self, anchor: Anchor) -> Point {
        Point::new(
            self.width * anchor.horizontal().factor(),
            self.height * anchor.vertical().factor(),
        )
    }
}

impl Add for Size {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl Sub for Size {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.width - rhs.width, self.height - rhs.height)
    }
}

impl Div<f32> for Size {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.width / rhs, self.height / rhs)
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_into() {
        let small = Size::new(10.0, 10.0);
        assert!(small.fits_into(Size::new(10.0, 10.0)));
        assert!(small.fits_into(Size::new(11.0, 12.0)));
        assert!(!small.fits_into(Size::new(9.0, 20.0)));
        assert!(!small.fits_into(Size::new(20.0, 9.0)));
    }

    #[test]
    fn test_arithmetic() {
        let a = Size::new(10.0, 4.0);
        let b = Size::new(2.0, 1.0);
        assert_eq!(a + b, Size::new(12.0, 5.0));
        assert_eq!(a - b, Size::new(8.0, 3.0));
        assert_eq!(a / 2.0, Size::new(5.0, 2.0));
    }

    #[test]
    fn test_position() {
        let s = Size::new(100.0, 50.0);
        assert_eq!(s.position(Anchor::TopLeft), Point::ZERO);
        assert_eq!(s.position(Anchor::Center), Point::new(50.0, 25.0));
        assert_eq!(s.position(Anchor::BottomRight), Point::new(100.0, 50.0));
    }
}

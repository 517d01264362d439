//! # Points

use std::ops::{Add, Sub};

use crate::anchor::Anchor;
use crate::size::Size;

/// An immutable 2D coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate, growing to the right.
    pub x: f32,
    /// Vertical coordinate, growing downwards.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Tags this point with the anchor it represents.
    #[must_use]
    pub const fn anchored(self, anchor: Anchor) -> AnchoredPoint {
        AnchoredPoint { point: self, anchor }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// The distance between two points, as a size.
impl Sub for Point {
    type Output = Size;

    fn sub(self, rhs: Self) -> Size {
        Size::new((self.x - rhs.x).abs(), (self.y - rhs.y).abs())
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// A point that knows which anchor of a rectangle it stands for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchoredPoint {
    /// The coordinate.
    pub point: Point,
    /// Which of the nine anchors `point` is.
    pub anchor: Anchor,
}

impl AnchoredPoint {
    /// Creates an anchored point.
    #[must_use]
    pub const fn new(point: Point, anchor: Anchor) -> Self {
        Self { point, anchor }
    }
}

/// Moves the point, keeping its anchor.
impl Add<Point> for AnchoredPoint {
    type Output = Self;

    fn add(self, offset: Point) -> Self {
        Self::new(self.point + offset, self.anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_is_absolute() {
        let a = Point::new(3.0, 10.0);
        let b = Point::new(8.0, 4.0);
        assert_eq!(a - b, Size::new(5.0, 6.0));
        assert_eq!(b - a, Size::new(5.0, 6.0));
    }

    #[test]
    fn test_anchored_offset_keeps_anchor() {
        let p = Point::new(1.0, 2.0).anchored(Anchor::BottomCenter) + Point::new(1.0, 1.0);
        assert_eq!(p.anchor, Anchor::BottomCenter);
        assert_eq!(p.point, Point::new(2.0, 3.0));
    }
}

//! # Rectangles
//!
//! A rectangle remembers the anchored point it was built from. Asking for
//! that anchor again returns the original coordinates untouched, so layouts
//! that pass positions around never accumulate rounding error.

use crate::anchor::{Anchor, HAnchor, VAnchor};
use crate::point::{AnchoredPoint, Point};
use crate::size::Size;

/// An axis-aligned rectangle positioned by one of its nine anchors.
#[derive(Clone, Copy, Debug)]
pub struct Rectangle {
    origin: AnchoredPoint,
    size: Size,
}

/// Integer bounds of a rectangle on the pixel grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelRect {
    /// Left column.
    pub x: i32,
    /// Top row.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Column one past the right edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// Row one past the bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    /// True when the pixel at (`x`, `y`) lies inside.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap of two pixel rectangles; empty (zero-sized) when disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Self {
            x,
            y,
            width: u32::try_from(right - x).unwrap_or(0),
            height: u32::try_from(bottom - y).unwrap_or(0),
        }
    }

    /// True when the rectangle covers no pixel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Rectangle {
    /// Builds a rectangle whose `origin.anchor` lies at `origin.point`.
    #[must_use]
    pub const fn new(origin: AnchoredPoint, size: Size) -> Self {
        Self { origin, size }
    }

    /// A rectangle of `size` with its top-left corner at the origin.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(AnchoredPoint::new(Point::ZERO, Anchor::TopLeft), size)
    }

    /// Builds the rectangle spanned between `origin` and the opposite corner `to`.
    ///
    /// The size is the absolute distance between the two points; `origin`'s
    /// anchor keeps naming which corner it is.
    #[must_use]
    pub fn spanning(origin: AnchoredPoint, to: Point) -> Self {
        Self::new(origin, to - origin.point)
    }

    /// The anchored point this rectangle was built from.
    #[must_use]
    pub const fn origin(&self) -> AnchoredPoint {
        self.origin
    }

    /// Coordinates of `anchor`.
    #[must_use]
    pub fn position(&self, anchor: Anchor) -> Point {
        if anchor == self.origin.anchor {
            return self.origin.point;
        }
        self.top_left() + self.size.position(anchor)
    }

    /// Top-left corner.
    #[must_use]
    pub fn top_left(&self) -> Point {
        if self.origin.anchor == Anchor::TopLeft {
            return self.origin.point;
        }
        let shift = self.size.position(self.origin.anchor);
        Point::new(self.origin.point.x - shift.x, self.origin.point.y - shift.y)
    }

    /// Left edge.
    #[must_use]
    pub fn left(&self) -> f32 {
        self.top_left().x
    }

    /// Top edge.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.top_left().y
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left() + self.size.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top() + self.size.height
    }

    /// Width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.size.width
    }

    /// Height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.size.height
    }

    /// Size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Same height, new width; the `fixed` edge does not move.
    #[must_use]
    pub fn with_width(&self, width: f32, fixed: HAnchor) -> Self {
        let anchor = Anchor::new(VAnchor::Top, fixed);
        Self::new(
            self.position(anchor).anchored(anchor),
            Size::new(width, self.size.height),
        )
    }

    /// Same width, new height; the `fixed` edge does not move.
    #[must_use]
    pub fn with_height(&self, height: f32, fixed: VAnchor) -> Self {
        let anchor = Anchor::new(fixed, HAnchor::Left);
        Self::new(
            self.position(anchor).anchored(anchor),
            Size::new(self.size.width, height),
        )
    }

    /// The same rectangle moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Point) -> Self {
        Self::new(self.origin + offset, self.size)
    }

    /// Shrinks every edge inwards by `margin`.
    #[must_use]
    pub fn inset(&self, margin: f32) -> Self {
        let tl = self.top_left();
        Self::new(
            Point::new(tl.x + margin, tl.y + margin).anchored(Anchor::TopLeft),
            Size::new(
                (self.size.width - 2.0 * margin).max(0.0),
                (self.size.height - 2.0 * margin).max(0.0),
            ),
        )
    }

    /// True when `point` lies inside (left/top inclusive, right/bottom exclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let tl = self.top_left();
        point.x >= tl.x
            && point.y >= tl.y
            && point.x < tl.x + self.size.width
            && point.y < tl.y + self.size.height
    }

    /// Overlapping area, or `None` when the rectangles do not overlap.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::new(
            Point::new(left, top).anchored(Anchor::TopLeft),
            Size::new(right - left, bottom - top),
        ))
    }

    /// Snaps the edges to the nearest pixel boundaries.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_pixels(&self) -> PixelRect {
        let left = self.left().round();
        let top = self.top().round();
        let right = self.right().round();
        let bottom = self.bottom().round();
        PixelRect {
            x: left as i32,
            y: top as i32,
            width: (right - left).max(0.0) as u32,
            height: (bottom - top).max(0.0) as u32,
        }
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::from_size(Size::ZERO)
    }
}

/// Two rectangles are equal when they cover the same area, whichever anchor built them.
impl PartialEq for Rectangle {
    fn eq(&self, other: &Self) -> bool {
        self.top_left() == other.top_left() && self.size == other.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, anchor: Anchor, w: f32, h: f32) -> Rectangle {
        Rectangle::new(Point::new(x, y).anchored(anchor), Size::new(w, h))
    }

    #[test]
    fn test_all_anchors() {
        let r = rect(10.0, 20.0, Anchor::TopLeft, 100.0, 50.0);
        assert_eq!(r.position(Anchor::TopCenter), Point::new(60.0, 20.0));
        assert_eq!(r.position(Anchor::TopRight), Point::new(110.0, 20.0));
        assert_eq!(r.position(Anchor::CenterLeft), Point::new(10.0, 45.0));
        assert_eq!(r.position(Anchor::Center), Point::new(60.0, 45.0));
        assert_eq!(r.position(Anchor::CenterRight), Point::new(110.0, 45.0));
        assert_eq!(r.position(Anchor::BottomLeft), Point::new(10.0, 70.0));
        assert_eq!(r.position(Anchor::BottomCenter), Point::new(60.0, 70.0));
        assert_eq!(r.position(Anchor::BottomRight), Point::new(110.0, 70.0));
    }

    #[test]
    fn test_built_from_bottom_right() {
        let r = rect(110.0, 70.0, Anchor::BottomRight, 100.0, 50.0);
        assert_eq!(r, rect(10.0, 20.0, Anchor::TopLeft, 100.0, 50.0));
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.bottom(), 70.0);
    }

    #[test]
    fn test_spanning() {
        let r = Rectangle::spanning(
            Point::new(50.0, 40.0).anchored(Anchor::BottomRight),
            Point::new(10.0, 10.0),
        );
        assert_eq!(r.size(), Size::new(40.0, 30.0));
        assert_eq!(r.top_left(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_round_trip_is_exact_for_awkward_values() {
        let r = rect(0.1, 0.7, Anchor::Center, 0.3, 1.0 / 3.0);
        for anchor in Anchor::ALL {
            let p = r.position(anchor);
            assert_eq!(Rectangle::new(p.anchored(anchor), r.size()).position(anchor), p);
        }
    }

    #[test]
    fn test_with_width_keeps_edge() {
        let r = rect(0.0, 0.0, Anchor::TopLeft, 100.0, 20.0);
        let right = r.with_width(40.0, HAnchor::Right);
        assert_eq!(right.right(), 100.0);
        assert_eq!(right.left(), 60.0);
        let left = r.with_width(40.0, HAnchor::Left);
        assert_eq!(left.left(), 0.0);
        let bottom = r.with_height(5.0, VAnchor::Bottom);
        assert_eq!(bottom.top(), 15.0);
    }

    #[test]
    fn test_contains_and_intersection() {
        let a = rect(0.0, 0.0, Anchor::TopLeft, 10.0, 10.0);
        let b = rect(5.0, 5.0, Anchor::TopLeft, 10.0, 10.0);
        assert!(a.contains(Point::new(0.0, 0.0)));
        assert!(!a.contains(Point::new(10.0, 5.0)));
        assert_eq!(a.intersection(&b), Some(rect(5.0, 5.0, Anchor::TopLeft, 5.0, 5.0)));
        let c = rect(10.0, 0.0, Anchor::TopLeft, 3.0, 3.0);
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_to_pixels() {
        let r = rect(0.4, 1.6, Anchor::TopLeft, 10.2, 4.0);
        assert_eq!(r.to_pixels(), PixelRect { x: 0, y: 2, width: 11, height: 4 });
    }

    #[test]
    fn test_pixel_intersection() {
        let a = PixelRect { x: 0, y: 0, width: 10, height: 10 };
        let b = PixelRect { x: 8, y: -2, width: 10, height: 4 };
        assert_eq!(a.intersection(&b), PixelRect { x: 8, y: 0, width: 2, height: 2 });
        let far = PixelRect { x: 20, y: 20, width: 1, height: 1 };
        assert!(a.intersection(&far).is_empty());
    }
}

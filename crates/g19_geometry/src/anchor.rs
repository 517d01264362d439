//! # Anchors
//!
//! Nine named reference points on a rectangle's border.

/// Vertical component of an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VAnchor {
    /// Top edge.
    Top,
    /// Vertical middle.
    Center,
    /// Bottom edge.
    Bottom,
}

/// Horizontal component of an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HAnchor {
    /// Left edge.
    Left,
    /// Horizontal middle.
    Center,
    /// Right edge.
    Right,
}

impl VAnchor {
    /// Fraction of the height between the top edge and this anchor.
    #[must_use]
    pub const fn factor(self) -> f32 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
        }
    }
}

impl HAnchor {
    /// Fraction of the width between the left edge and this anchor.
    #[must_use]
    pub const fn factor(self) -> f32 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

/// A point on a rectangle's border (or its center).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Top-left corner.
    TopLeft,
    /// Middle of the top edge.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Middle of the left edge.
    CenterLeft,
    /// Center of the rectangle.
    Center,
    /// Middle of the right edge.
    CenterRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Middle of the bottom edge.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

impl Anchor {
    /// All nine anchors, row by row from the top-left.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Combines a vertical and a horizontal component.
    #[must_use]
    pub const fn new(vertical: VAnchor, horizontal: HAnchor) -> Self {
        match (vertical, horizontal) {
            (VAnchor::Top, HAnchor::Left) => Self::TopLeft,
            (VAnchor::Top, HAnchor::Center) => Self::TopCenter,
            (VAnchor::Top, HAnchor::Right) => Self::TopRight,
            (VAnchor::Center, HAnchor::Left) => Self::CenterLeft,
            (VAnchor::Center, HAnchor::Center) => Self::Center,
            (VAnchor::Center, HAnchor::Right) => Self::CenterRight,
            (VAnchor::Bottom, HAnchor::Left) => Self::BottomLeft,
            (VAnchor::Bottom, HAnchor::Center) => Self::BottomCenter,
            (VAnchor::Bottom, HAnchor::Right) => Self::BottomRight,
        }
    }

    /// Vertical component.
    #[must_use]
    pub const fn vertical(self) -> VAnchor {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => VAnchor::Top,
            Self::CenterLeft | Self::Center | Self::CenterRight => VAnchor::Center,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => VAnchor::Bottom,
        }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn horizontal(self) -> HAnchor {
        match self {
            Self::TopLeft | Self::CenterLeft | Self::BottomLeft => HAnchor::Left,
            Self::TopCenter | Self::Center | Self::BottomCenter => HAnchor::Center,
            Self::TopRight | Self::CenterRight | Self::BottomRight => HAnchor::Right,
        }
    }

    /// The anchor on the opposite side of the center.
    #[must_use]
    pub const fn opposite(self) -> Self {
        let v = match self.vertical() {
            VAnchor::Top => VAnchor::Bottom,
            VAnchor::Center => VAnchor::Center,
            VAnchor::Bottom => VAnchor::Top,
        };
        let h = match self.horizontal() {
            HAnchor::Left => HAnchor::Right,
            HAnchor::Center => HAnchor::Center,
            HAnchor::Right => HAnchor::Left,
        };
        Self::new(v, h)
    }
}

impl From<(VAnchor, HAnchor)> for Anchor {
    fn from((v, h): (VAnchor, HAnchor)) -> Self {
        Self::new(v, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_decompose() {
        for anchor in Anchor::ALL {
            assert_eq!(Anchor::new(anchor.vertical(), anchor.horizontal()), anchor);
        }
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Anchor::TopLeft.opposite(), Anchor::BottomRight);
        assert_eq!(Anchor::CenterRight.opposite(), Anchor::CenterLeft);
        assert_eq!(Anchor::Center.opposite(), Anchor::Center);
    }
}

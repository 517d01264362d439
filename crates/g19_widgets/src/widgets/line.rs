//! Horizontal or vertical separator.

use embedded_graphics::prelude::{Point as EgPoint, Primitive};
use embedded_graphics::primitives::{Line as EgLine, PrimitiveStyle};
use embedded_graphics::Drawable;
use g19_geometry::Size;

use crate::canvas::{drawn, Canvas};
use crate::widget::{PaintContext, Widget};

/// Direction of a [`Line`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Left to right, centred vertically.
    Horizontal,
    /// Top to bottom, centred horizontally.
    Vertical,
}

/// A separator line drawn in the foreground color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    orientation: Orientation,
    line_width: f32,
    margin: f32,
}

impl Line {
    /// A line with the default width (1.5) and margin (0.75).
    #[must_use]
    pub const fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            line_width: 1.5,
            margin: 0.75,
        }
    }

    /// Sets the stroke width.
    #[must_use]
    pub const fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    /// Sets the empty space on both sides across the line.
    #[must_use]
    pub const fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Direction.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn thickness(&self) -> f32 {
        self.line_width + 2.0 * self.margin
    }
}

impl Widget for Line {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn paint_foreground(&self, ctx: &PaintContext, canvas: &mut Canvas<'_>) {
        let width = ctx.size.width.round() as i32;
        let height = ctx.size.height.round() as i32;
        let (start, end) = match self.orientation {
            Orientation::Horizontal => {
                let y = height / 2;
                (EgPoint::new(0, y), EgPoint::new(width - 1, y))
            }
            Orientation::Vertical => {
                let x = width / 2;
                (EgPoint::new(x, 0), EgPoint::new(x, height - 1))
            }
        };
        let stroke = self.line_width.round().max(1.0) as u32;
        drawn(
            EgLine::new(start, end)
                .into_styled(PrimitiveStyle::with_stroke(ctx.foreground.to_rgb565(), stroke))
                .draw(canvas),
        );
    }

    fn preferred_size(&self, available: Size) -> Option<Size> {
        Some(match self.orientation {
            Orientation::Horizontal => Size::new(available.width, self.thickness()),
            Orientation::Vertical => Size::new(self.thickness(), available.height),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferred_size_spans_available() {
        let line = Line::new(Orientation::Horizontal);
        assert_eq!(
            line.preferred_size(Size::new(100.0, 50.0)),
            Some(Size::new(100.0, 3.0))
        );
        let line = Line::new(Orientation::Vertical).with_line_width(2.0).with_margin(1.0);
        assert_eq!(line.preferred_size(Size::new(100.0, 50.0)), Some(Size::new(4.0, 50.0)));
    }
}

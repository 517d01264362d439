//! Progress bar with stacked values.

use embedded_graphics::prelude::{Point as EgPoint, Primitive, Size as EgSize};
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle as EgRect, RoundedRectangle};
use embedded_graphics::Drawable;
use g19_geometry::PixelRect;

use crate::canvas::{drawn, Canvas};
use crate::color::Color;
use crate::widget::{PaintContext, Widget};

/// Direction a [`Bar`] fills in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BarOrientation {
    /// Grows to the right.
    #[default]
    LeftToRight,
    /// Grows to the left.
    RightToLeft,
    /// Grows upwards.
    BottomToTop,
    /// Grows downwards.
    TopToBottom,
}

/// A bar showing one or more values stacked end to end, as fractions of
/// the total.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    orientation: BarOrientation,
    values: Vec<(f32, Option<Color>)>,
    total: Option<f32>,
    border: Option<Color>,
    border_width: u32,
    corner_radius: u32,
}

impl Bar {
    /// An empty bar.
    #[must_use]
    pub const fn new(orientation: BarOrientation) -> Self {
        Self {
            orientation,
            values: Vec::new(),
            total: None,
            border: None,
            border_width: 1,
            corner_radius: 5,
        }
    }

    /// Draws a rounded border in `color`.
    #[must_use]
    pub const fn with_border(mut self, color: Color) -> Self {
        self.border = Some(color);
        self
    }

    /// Sets the border stroke and corner radius.
    #[must_use]
    pub const fn with_border_shape(mut self, width: u32, corner_radius: u32) -> Self {
        self.border_width = width;
        self.corner_radius = corner_radius;
        self
    }

    /// Fixes the value that fills the whole bar. Without it the sum of the
    /// values is used, so the bar is always full.
    #[must_use]
    pub const fn with_total(mut self, total: f32) -> Self {
        self.total = Some(total);
        self
    }

    /// Replaces the values. `None` colors use the foreground. Returns true
    /// when anything changed.
    pub fn set_values(&mut self, values: Vec<(f32, Option<Color>)>) -> bool {
        if self.values == values {
            return false;
        }
        self.values = values;
        true
    }

    /// Single-value shortcut for [`Bar::set_values`].
    pub fn set_value(&mut self, value: f32) -> bool {
        self.set_values(vec![(value, None)])
    }

    /// Current values.
    #[must_use]
    pub fn values(&self) -> &[(f32, Option<Color>)] {
        &self.values
    }

    /// The value that fills the bar.
    #[must_use]
    pub fn total(&self) -> f32 {
        self.total
            .unwrap_or_else(|| self.values.iter().map(|(v, _)| v.max(0.0)).sum())
    }

    /// Pixel extents of each value along the fill axis, clamped to `length`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn segments(&self, length: u32) -> Vec<(u32, u32, Option<Color>)> {
        let total = self.total();
        if total <= 0.0 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(self.values.len());
        let mut sum = 0.0_f32;
        for &(value, color) in &self.values {
            let start = ((sum / total) * length as f32).round().clamp(0.0, length as f32) as u32;
            sum += value.max(0.0);
            let end = ((sum / total) * length as f32).round().clamp(0.0, length as f32) as u32;
            if end > start {
                out.push((start, end, color));
            }
        }
        out
    }
}

impl Widget for Bar {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    fn paint_foreground(&self, ctx: &PaintContext, canvas: &mut Canvas<'_>) {
        let width = ctx.size.width.round().max(0.0) as u32;
        let height = ctx.size.height.round().max(0.0) as u32;
        let inset = if self.border.is_some() {
            self.border_width + 1
        } else {
            0
        };
        let inner_w = width.saturating_sub(2 * inset);
        let inner_h = height.saturating_sub(2 * inset);
        let horizontal = matches!(
            self.orientation,
            BarOrientation::LeftToRight | BarOrientation::RightToLeft
        );
        let length = if horizontal { inner_w } else { inner_h };
        let offset = inset as i32;
        for (start, end, color) in self.segments(length) {
            let span = end - start;
            let rect = match self.orientation {
                BarOrientation::LeftToRight => PixelRect {
                    x: offset + start as i32,
                    y: offset,
                    width: span,
                    height: inner_h,
                },
                BarOrientation::RightToLeft => PixelRect {
                    x: offset + (inner_w - end) as i32,
                    y: offset,
                    width: span,
                    height: inner_h,
                },
                BarOrientation::TopToBottom => PixelRect {
                    x: offset,
                    y: offset + start as i32,
                    width: inner_w,
                    height: span,
                },
                BarOrientation::BottomToTop => PixelRect {
                    x: offset,
                    y: offset + (inner_h - end) as i32,
                    width: inner_w,
                    height: span,
                },
            };
            canvas.fill_rect(rect, color.unwrap_or(ctx.foreground));
        }
        if let Some(border) = self.border {
            let style = PrimitiveStyleBuilder::new()
                .stroke_color(border.to_rgb565())
                .stroke_width(self.border_width)
                .build();
            let rect = EgRect::new(EgPoint::zero(), EgSize::new(width, height));
            let radius = EgSize::new(self.corner_radius, self.corner_radius);
            drawn(
                RoundedRectangle::with_equal_corners(rect, radius)
                    .into_styled(style)
                    .draw(canvas),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;
    use g19_geometry::Size;

    fn paint(bar: &Bar, surface: &mut Surface) {
        let ctx = PaintContext {
            size: Size::new(10.0, 2.0),
            foreground: Color::WHITE,
            background: None,
        };
        let mut canvas = Canvas::new(surface);
        bar.paint_foreground(&ctx, &mut canvas);
    }

    #[test]
    fn test_total_defaults_to_sum() {
        let mut bar = Bar::new(BarOrientation::LeftToRight);
        bar.set_values(vec![(1.0, None), (3.0, Some(Color::RED))]);
        assert!((bar.total() - 4.0).abs() < f32::EPSILON);
        assert_eq!(bar.segments(100), vec![(0, 25, None), (25, 100, Some(Color::RED))]);
    }

    #[test]
    fn test_left_to_right_fill() {
        let mut bar = Bar::new(BarOrientation::LeftToRight).with_total(10.0);
        assert!(bar.set_value(3.0));
        assert!(!bar.set_value(3.0));
        let mut surface = Surface::new(10, 2);
        paint(&bar, &mut surface);
        let white = Color::WHITE.to_raw();
        assert_eq!(surface.pixel(0, 0), Some(white));
        assert_eq!(surface.pixel(2, 1), Some(white));
        assert_eq!(surface.pixel(3, 0), Some(0));
    }

    #[test]
    fn test_right_to_left_fill() {
        let mut bar = Bar::new(BarOrientation::RightToLeft).with_total(10.0);
        bar.set_value(3.0);
        let mut surface = Surface::new(10, 2);
        paint(&bar, &mut surface);
        let white = Color::WHITE.to_raw();
        assert_eq!(surface.pixel(9, 0), Some(white));
        assert_eq!(surface.pixel(7, 0), Some(white));
        assert_eq!(surface.pixel(6, 0), Some(0));
    }

    #[test]
    fn test_overflow_is_clamped() {
        let mut bar = Bar::new(BarOrientation::TopToBottom).with_total(1.0);
        bar.set_value(5.0);
        assert_eq!(bar.segments(8), vec![(0, 8, None)]);
    }
}

//! # Canvas
//!
//! A translated, clipped window onto a [`Surface`]. Widgets draw in local
//! coordinates with `embedded-graphics`; the canvas offsets every pixel to
//! the widget's position and discards anything outside the clip.
//!
//! ```text
//! surface (320x240)
//! ┌──────────────────────────────┐
//! │   parent clip                │
//! │   ┌──────────────────┐       │
//! │   │ child: origin ─► ┼───┐   │   child clip = parent clip ∩ child rect
//! │   │        (0,0)     │ X │   │   X is discarded
//! │   └──────────────────┘───┘   │
//! └──────────────────────────────┘
//! ```

use std::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{
    DrawTarget, IntoStorage, OriginDimensions, Pixel, Point as EgPoint, Size as EgSize,
};
use embedded_graphics::primitives::Rectangle as EgRect;
use g19_geometry::{PixelRect, Size};

use crate::color::Color;
use crate::surface::Surface;

/// A drawing window onto part of a surface.
pub struct Canvas<'a> {
    surface: &'a mut Surface,
    /// Absolute position of local (0, 0).
    origin: EgPoint,
    /// Absolute clip.
    clip: PixelRect,
    /// Local drawing area.
    size: EgSize,
}

impl<'a> Canvas<'a> {
    /// A canvas covering the whole surface.
    pub fn new(surface: &'a mut Surface) -> Self {
        let clip = surface.bounds();
        Self {
            size: EgSize::new(clip.width, clip.height),
            surface,
            origin: EgPoint::zero(),
            clip,
        }
    }

    /// A canvas for a child at `local` (in this canvas's coordinates),
    /// clipped to both the child and this canvas.
    pub fn child(&mut self, local: PixelRect) -> Canvas<'_> {
        let absolute = PixelRect {
            x: self.origin.x + local.x,
            y: self.origin.y + local.y,
            width: local.width,
            height: local.height,
        };
        Canvas {
            surface: &mut *self.surface,
            origin: EgPoint::new(absolute.x, absolute.y),
            clip: self.clip.intersection(&absolute),
            size: EgSize::new(local.width, local.height),
        }
    }

    /// Absolute clip rectangle.
    #[must_use]
    pub const fn clip(&self) -> PixelRect {
        self.clip
    }

    /// Local drawing area as layout size.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn layout_size(&self) -> Size {
        Size::new(self.size.width as f32, self.size.height as f32)
    }

    /// Fills the whole local area.
    pub fn fill(&mut self, color: Color) {
        self.surface.fill_rect(self.clip, color.to_raw());
    }

    /// Writes one raw 5-6-5 pixel at a local position, if inside the clip.
    pub fn set_raw(&mut self, x: i32, y: i32, raw: u16) {
        let (x, y) = (self.origin.x + x, self.origin.y + y);
        if self.clip.contains(x, y) {
            self.surface.set(x, y, raw);
        }
    }

    /// Fills a local rectangle.
    pub fn fill_rect(&mut self, local: PixelRect, color: Color) {
        let absolute = PixelRect {
            x: self.origin.x + local.x,
            y: self.origin.y + local.y,
            ..local
        };
        self.surface
            .fill_rect(self.clip.intersection(&absolute), color.to_raw());
    }
}

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> EgSize {
        self.size
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            let (x, y) = (self.origin.x + p.x, self.origin.y + p.y);
            if self.clip.contains(x, y) {
                self.surface.set(x, y, color.into_storage());
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &EgRect, color: Self::Color) -> Result<(), Self::Error> {
        let absolute = PixelRect {
            x: self.origin.x + area.top_left.x,
            y: self.origin.y + area.top_left.y,
            width: area.size.width,
            height: area.size.height,
        };
        self.surface
            .fill_rect(self.clip.intersection(&absolute), color.into_storage());
        Ok(())
    }
}

/// Unwraps the result of drawing onto a [`Canvas`], which cannot fail.
pub fn drawn<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::{Primitive, RgbColor};
    use embedded_graphics::primitives::PrimitiveStyle;
    use embedded_graphics::Drawable;

    #[test]
    fn test_child_translates_and_clips() {
        let mut surface = Surface::new(10, 10);
        let mut root = Canvas::new(&mut surface);
        let mut child = root.child(PixelRect { x: 2, y: 3, width: 4, height: 4 });
        // Larger than the child: must be clipped to 4x4 at (2,3).
        drawn(
            EgRect::new(EgPoint::new(-1, -1), EgSize::new(20, 20))
                .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
                .draw(&mut child),
        );

        assert_eq!(surface.pixel(2, 3), Some(0xffff));
        assert_eq!(surface.pixel(5, 6), Some(0xffff));
        assert_eq!(surface.pixel(6, 6), Some(0));
        assert_eq!(surface.pixel(1, 3), Some(0));
        assert_eq!(surface.pixel(2, 7), Some(0));
    }

    #[test]
    fn test_nested_clip_is_intersection() {
        let mut surface = Surface::new(10, 10);
        let mut root = Canvas::new(&mut surface);
        let mut outer = root.child(PixelRect { x: 0, y: 0, width: 5, height: 5 });
        // Grandchild sticks out of its parent on the right.
        let mut inner = outer.child(PixelRect { x: 3, y: 0, width: 5, height: 2 });
        inner.fill(Color::WHITE);
        assert_eq!(inner.clip(), PixelRect { x: 3, y: 0, width: 2, height: 2 });

        assert_eq!(surface.pixel(4, 0), Some(0xffff));
        assert_eq!(surface.pixel(5, 0), Some(0));
    }

    #[test]
    fn test_draw_iter_clips_pixels() {
        let mut surface = Surface::new(4, 4);
        let mut root = Canvas::new(&mut surface);
        let mut child = root.child(PixelRect { x: 1, y: 1, width: 2, height: 2 });
        drawn(child.draw_iter([
            Pixel(EgPoint::new(0, 0), Rgb565::RED),
            Pixel(EgPoint::new(2, 0), Rgb565::RED),
            Pixel(EgPoint::new(-1, 1), Rgb565::RED),
        ]));
        let red = Rgb565::RED.into_storage();
        assert_eq!(surface.pixel(1, 1), Some(red));
        assert_eq!(surface.pixel(3, 1), Some(0));
        assert_eq!(surface.pixel(0, 2), Some(0));
    }
}

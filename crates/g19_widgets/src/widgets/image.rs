//! Fixed-size bitmap.

use embedded_graphics::prelude::{Point as EgPoint, Primitive};
use embedded_graphics::primitives::{Line as EgLine, PrimitiveStyle};
use embedded_graphics::Drawable;
use g19_geometry::Size;

use crate::canvas::{drawn, Canvas};
use crate::widget::{PaintContext, Widget};

/// A fixed-size 5-6-5 bitmap, centred in its rectangle.
///
/// Until pixels arrive a cross is drawn in the foreground color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Option<Vec<u16>>,
}

impl Image {
    /// An empty image of the given pixel size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: None,
        }
    }

    /// Replaces the pixels, row-major. Returns false (and keeps the old
    /// pixels) when the length does not match the image size.
    pub fn set_pixels(&mut self, pixels: Vec<u16>) -> bool {
        if pixels.len() != self.pixel_count() {
            return false;
        }
        self.pixels = Some(pixels);
        true
    }

    /// Drops the pixels, showing the placeholder again.
    pub fn clear(&mut self) -> bool {
        self.pixels.take().is_some()
    }

    /// Whether pixels are loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.pixels.is_some()
    }

    fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Widget for Image {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    fn paint_foreground(&self, ctx: &PaintContext, canvas: &mut Canvas<'_>) {
        let left = ((ctx.size.width - self.width as f32) / 2.0).round() as i32;
        let top = ((ctx.size.height - self.height as f32) / 2.0).round() as i32;
        let Some(pixels) = &self.pixels else {
            let right = left + self.width as i32 - 1;
            let bottom = top + self.height as i32 - 1;
            let style = PrimitiveStyle::with_stroke(ctx.foreground.to_rgb565(), 1);
            for (from, to) in [
                (EgPoint::new(left, top), EgPoint::new(right, bottom)),
                (EgPoint::new(left, bottom), EgPoint::new(right, top)),
            ] {
                drawn(EgLine::new(from, to).into_styled(style).draw(canvas));
            }
            return;
        };
        let width = self.width as usize;
        for (index, &raw) in pixels.iter().enumerate() {
            let x = left + (index % width) as i32;
            let y = top + (index / width) as i32;
            canvas.set_raw(x, y, raw);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn preferred_size(&self, _available: Size) -> Option<Size> {
        Some(Size::new(self.width as f32, self.height as f32))
    }

    /// Accepts little-endian 5-6-5 pixel data of exactly the image size.
    fn on_data(&mut self, data: &[u8]) -> bool {
        if data.len() != self.pixel_count() * 2 {
            return false;
        }
        let pixels = data
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        self.set_pixels(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::surface::Surface;

    fn paint(image: &Image, surface: &mut Surface) {
        let ctx = PaintContext {
            size: Size::new(4.0, 4.0),
            foreground: Color::WHITE,
            background: None,
        };
        image.paint_foreground(&ctx, &mut Canvas::new(surface));
    }

    #[test]
    fn test_placeholder_cross() {
        let image = Image::new(4, 4);
        let mut surface = Surface::new(4, 4);
        paint(&image, &mut surface);
        let white = Color::WHITE.to_raw();
        assert_eq!(surface.pixel(0, 0), Some(white));
        assert_eq!(surface.pixel(3, 0), Some(white));
        assert_eq!(surface.pixel(1, 0), Some(0));
    }

    #[test]
    fn test_on_data_requires_exact_size() {
        let mut image = Image::new(2, 1);
        assert!(!image.on_data(&[1, 2, 3]));
        assert!(!image.is_loaded());
        assert!(image.on_data(&[0x34, 0x12, 0xff, 0x00]));
        assert_eq!(image.pixels.as_deref(), Some(&[0x1234, 0x00ff][..]));
        assert!(image.clear());
    }

    #[test]
    fn test_pixels_centred() {
        let mut image = Image::new(2, 2);
        image.set_pixels(vec![7; 4]);
        let mut surface = Surface::new(4, 4);
        paint(&image, &mut surface);
        assert_eq!(surface.pixel(1, 1), Some(7));
        assert_eq!(surface.pixel(2, 2), Some(7));
        assert_eq!(surface.pixel(0, 0), Some(0));
    }
}

//! # Surface
//!
//! The repaint target: one `u16` per pixel, row-major from the top-left.
//! Reused across repaints; its bytes are handed to the driver after each
//! paint and never retained by it.

use std::borrow::Cow;

use g19_geometry::PixelRect;

/// A 5-6-5 pixel buffer.
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u16>,
}

impl Surface {
    /// A black surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![0; len],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The whole surface.
    #[must_use]
    pub const fn bounds(&self) -> PixelRect {
        PixelRect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        }
    }

    /// Raw pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Raw value at (`x`, `y`).
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u16> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Writes one pixel; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, raw: u16) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = raw;
        }
    }

    /// Fills `area` (clipped to the surface).
    pub fn fill_rect(&mut self, area: PixelRect, raw: u16) {
        let area = area.intersection(&self.bounds());
        if area.is_empty() {
            return;
        }
        let (Ok(x0), Ok(y0)) = (usize::try_from(area.x), usize::try_from(area.y)) else {
            return;
        };
        let stride = self.width as usize;
        for row in y0..y0 + area.height as usize {
            let start = row * stride + x0;
            self.pixels[start..start + area.width as usize].fill(raw);
        }
    }

    /// Frame bytes, little-endian 5-6-5, as the device expects.
    #[must_use]
    pub fn frame_bytes(&self) -> Cow<'_, [u8]> {
        #[cfg(target_endian = "little")]
        {
            Cow::Borrowed(bytemuck::cast_slice(&self.pixels))
        }
        #[cfg(not(target_endian = "little"))]
        {
            Cow::Owned(self.pixels.iter().flat_map(|p| p.to_le_bytes()).collect())
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y as usize * self.width as usize + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_bytes_little_endian() {
        let mut s = Surface::new(2, 1);
        s.set(0, 0, 0xf800);
        s.set(1, 0, 0x001f);
        assert_eq!(&*s.frame_bytes(), &[0x00, 0xf8, 0x1f, 0x00]);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut s = Surface::new(4, 4);
        s.fill_rect(PixelRect { x: 2, y: -1, width: 5, height: 2 }, 7);
        assert_eq!(s.pixel(2, 0), Some(7));
        assert_eq!(s.pixel(3, 0), Some(7));
        assert_eq!(s.pixel(1, 0), Some(0));
        assert_eq!(s.pixel(2, 1), Some(0));
        assert_eq!(s.pixel(4, 0), None);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut s = Surface::new(1, 1);
        s.set(-1, 0, 1);
        s.set(0, 1, 1);
        assert_eq!(s.pixels(), &[0]);
    }
}

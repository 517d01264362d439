//! # Colors
//!
//! Floating-point RGB in `0.0..=1.0`, reduced to 5-6-5 only when a pixel
//! is written. The panel has no alpha channel, so neither does this type.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{IntoStorage, RgbColor};

/// An RGB color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red, `0.0..=1.0`.
    pub red: f32,
    /// Green, `0.0..=1.0`.
    pub green: f32,
    /// Blue, `0.0..=1.0`.
    pub blue: f32,
}

#[allow(missing_docs)]
impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);
    pub const MAGENTA: Self = Self::new(1.0, 0.0, 1.0);
    pub const CYAN: Self = Self::new(0.0, 1.0, 1.0);
    pub const GRAY10: Self = Self::gray(0.1);
    pub const GRAY20: Self = Self::gray(0.2);
    pub const GRAY25: Self = Self::gray(0.25);
    pub const GRAY30: Self = Self::gray(0.3);
    pub const GRAY33: Self = Self::gray(1.0 / 3.0);
    pub const GRAY40: Self = Self::gray(0.4);
    pub const GRAY50: Self = Self::gray(0.5);
    pub const GRAY60: Self = Self::gray(0.6);
    pub const GRAY67: Self = Self::gray(2.0 / 3.0);
    pub const GRAY70: Self = Self::gray(0.7);
    pub const GRAY75: Self = Self::gray(0.75);
    pub const GRAY80: Self = Self::gray(0.8);
    pub const GRAY90: Self = Self::gray(0.9);
}

impl Color {
    /// Creates a color. Components are not clamped until conversion.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// A gray of the given lightness.
    #[must_use]
    pub const fn gray(level: f32) -> Self {
        Self::new(level, level, level)
    }

    /// From 8-bit channels.
    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::new(
            f32::from(red) / 255.0,
            f32::from(green) / 255.0,
            f32::from(blue) / 255.0,
        )
    }

    /// Darker: every channel divided by `divisor`.
    #[must_use]
    pub fn dimmed(self, divisor: f32) -> Self {
        Self::new(
            (self.red / divisor).clamp(0.0, 1.0),
            (self.green / divisor).clamp(0.0, 1.0),
            (self.blue / divisor).clamp(0.0, 1.0),
        )
    }

    /// Lighter: the distance to white divided by `factor`.
    #[must_use]
    pub fn lightened(self, factor: f32) -> Self {
        let lift = |c: f32| (1.0 - (1.0 - c) / factor).clamp(0.0, 1.0);
        Self::new(lift(self.red), lift(self.green), lift(self.blue))
    }

    /// Linear interpolation along a gradient of `(stop, color)` pairs.
    ///
    /// Values outside the stops take the nearest end color. Returns `None`
    /// for an empty gradient.
    #[must_use]
    pub fn interpolate(value: f32, gradient: &[(f32, Self)]) -> Option<Self> {
        let mut stops = gradient.to_vec();
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (first, last) = (*stops.first()?, *stops.last()?);
        if value <= first.0 {
            return Some(first.1);
        }
        for pair in stops.windows(2) {
            let ((lo, lo_color), (hi, hi_color)) = (pair[0], pair[1]);
            if value <= hi {
                let t = if hi > lo { (value - lo) / (hi - lo) } else { 1.0 };
                let mix = |a: f32, b: f32| a * (1.0 - t) + b * t;
                return Some(Self::new(
                    mix(lo_color.red, hi_color.red),
                    mix(lo_color.green, hi_color.green),
                    mix(lo_color.blue, hi_color.blue),
                ));
            }
        }
        Some(last.1)
    }

    /// 8-bit channels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.red), q(self.green), q(self.blue))
    }

    /// Panel color.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgb565(self) -> Rgb565 {
        let q = |c: f32, max: u8| (c.clamp(0.0, 1.0) * f32::from(max)).round() as u8;
        Rgb565::new(
            q(self.red, Rgb565::MAX_R),
            q(self.green, Rgb565::MAX_G),
            q(self.blue, Rgb565::MAX_B),
        )
    }

    /// Raw 16-bit pixel value.
    #[must_use]
    pub fn to_raw(self) -> u16 {
        self.to_rgb565().into_storage()
    }
}

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        color.to_rgb565()
    }
}

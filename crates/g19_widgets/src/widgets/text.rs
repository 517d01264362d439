//! Monospace text label.

use embedded_graphics::mono_font::ascii::{
    FONT_10X20, FONT_4X6, FONT_5X8, FONT_6X10, FONT_6X13, FONT_7X13, FONT_8X13, FONT_9X15,
    FONT_9X18,
};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::prelude::Point as EgPoint;
use embedded_graphics::text::{Baseline, Text as EgText};
use embedded_graphics::Drawable;
use g19_geometry::{HAnchor, Size};

use crate::canvas::{drawn, Canvas};
use crate::widget::{PaintContext, Widget};

/// Fonts [`Text::fit_font`] chooses from, smallest first.
pub const FONTS: [&MonoFont<'static>; 9] = [
    &FONT_4X6,
    &FONT_5X8,
    &FONT_6X10,
    &FONT_6X13,
    &FONT_7X13,
    &FONT_8X13,
    &FONT_9X15,
    &FONT_9X18,
    &FONT_10X20,
];

/// A single line of text, vertically centred.
#[derive(Clone)]
pub struct Text {
    text: String,
    font: &'static MonoFont<'static>,
    alignment: HAnchor,
}

impl std::fmt::Debug for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Text")
            .field("text", &self.text)
            .field("font", &self.font.character_size)
            .field("alignment", &self.alignment)
            .finish()
    }
}

impl Text {
    /// Left-aligned text in the default 9x15 font.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: &FONT_9X15,
            alignment: HAnchor::Left,
        }
    }

    /// Sets the font.
    #[must_use]
    pub const fn with_font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = font;
        self
    }

    /// Sets the horizontal alignment.
    #[must_use]
    pub const fn with_alignment(mut self, alignment: HAnchor) -> Self {
        self.alignment = alignment;
        self
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text. Returns true when it changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.text = text;
        true
    }

    /// Current font.
    #[must_use]
    pub const fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    /// Switches to the largest font in [`FONTS`] that fits the text into
    /// `available`, or the smallest one if none does. Returns true when the
    /// font changed.
    pub fn fit_font(&mut self, available: Size) -> bool {
        let fitting = FONTS
            .iter()
            .rev()
            .copied()
            .find(|font| text_size(&self.text, font).fits_into(available))
            .unwrap_or(FONTS[0]);
        if same_font(fitting, self.font) {
            return false;
        }
        self.font = fitting;
        true
    }
}

fn same_font(a: &MonoFont<'_>, b: &MonoFont<'_>) -> bool {
    a.character_size == b.character_size && a.character_spacing == b.character_spacing
}

#[allow(clippy::cast_precision_loss)]
fn text_size(text: &str, font: &MonoFont<'_>) -> Size {
    let chars = text.chars().count() as u32;
    let advance = font.character_size.width + font.character_spacing;
    let width = (chars * advance).saturating_sub(font.character_spacing);
    Size::new(width as f32, font.character_size.height as f32)
}

impl Widget for Text {
    #[allow(clippy::cast_possible_truncation)]
    fn paint_foreground(&self, ctx: &PaintContext, canvas: &mut Canvas<'_>) {
        if self.text.is_empty() {
            return;
        }
        let slack = ctx.size.width - text_size(&self.text, self.font).width;
        let x = (slack * self.alignment.factor()).round() as i32;
        let y = (ctx.size.height / 2.0).round() as i32;
        let style = MonoTextStyle::new(self.font, ctx.foreground.to_rgb565());
        drawn(
            EgText::with_baseline(&self.text, EgPoint::new(x, y), style, Baseline::Middle)
                .draw(canvas),
        );
    }

    fn preferred_size(&self, _available: Size) -> Option<Size> {
        Some(text_size(&self.text, self.font))
    }
}

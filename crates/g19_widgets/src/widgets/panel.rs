//! Plain background container.

use crate::canvas::Canvas;
use crate::widget::{PaintContext, Widget};

/// Plain container: only its background (and children) are painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Panel;

impl Widget for Panel {
    fn paint_foreground(&self, _ctx: &PaintContext, _canvas: &mut Canvas<'_>) {}
}

//! Vertical list of selectable text entries.

use embedded_graphics::mono_font::ascii::FONT_9X15;
use embedded_graphics::mono_font::MonoFont;
use g19_device::DisplayKey;
use g19_geometry::{Anchor, Point, Rectangle, Size};
use g19_input::{Key, KeyEdge, KeyEvent};
use tracing::debug;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::tree::WidgetId;
use crate::widget::{EventContext, PaintContext, Widget};
use crate::widgets::Text;

/// Runs when an entry is activated with OK.
pub type MenuAction = Box<dyn FnMut(&mut EventContext<'_>)>;

struct Entry {
    text: String,
    action: MenuAction,
    widget: Option<WidgetId>,
}

/// A menu. Each entry becomes a [`Text`] child on first layout; the
/// selected one is drawn with foreground and background swapped.
pub struct Menu {
    entries: Vec<Entry>,
    font: &'static MonoFont<'static>,
    current: usize,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    /// An empty menu in the 9x15 font.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            font: &FONT_9X15,
            current: 0,
        }
    }

    /// Appends an entry. Entries must be added before the menu joins a tree.
    #[must_use]
    pub fn with_entry(
        mut self,
        text: impl Into<String>,
        action: impl FnMut(&mut EventContext<'_>) + 'static,
    ) -> Self {
        self.entries.push(Entry {
            text: text.into(),
            action: Box::new(action),
            widget: None,
        });
        self
    }

    /// Sets the entry font.
    #[must_use]
    pub const fn with_font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = font;
        self
    }

    /// Index of the selected entry.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the menu has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[allow(clippy::cast_precision_loss)]
    fn row_height(&self) -> f32 {
        self.font.character_size.height as f32 + 4.0
    }

    fn select(&mut self, ctx: &mut EventContext<'_>, index: usize) {
        self.current = index;
        self.highlight(ctx);
        debug!(entry = self.current, "menu selection");
    }

    fn highlight(&self, ctx: &mut EventContext<'_>) {
        let id = ctx.id();
        let tree = ctx.tree();
        let foreground = tree.foreground(id);
        let background = tree.background(id).unwrap_or(Color::BLACK);
        for (index, entry) in self.entries.iter().enumerate() {
            let Some(widget) = entry.widget else {
                continue;
            };
            if index == self.current {
                tree.set_background(widget, Some(foreground));
                tree.set_foreground(widget, background);
            } else {
                tree.set_background(widget, Some(background));
                tree.set_foreground(widget, foreground);
            }
        }
    }
}

impl Widget for Menu {
    fn paint_foreground(&self, _ctx: &PaintContext, _canvas: &mut Canvas<'_>) {}

    #[allow(clippy::cast_precision_loss)]
    fn preferred_size(&self, available: Size) -> Option<Size> {
        Some(Size::new(
            available.width,
            self.row_height() * self.entries.len() as f32,
        ))
    }

    #[allow(clippy::cast_precision_loss)]
    fn layout(&mut self, ctx: &mut EventContext<'_>) {
        let width = ctx.rectangle().width();
        let row = self.row_height();
        let id = ctx.id();
        let font = self.font;
        for (index, entry) in self.entries.iter_mut().enumerate() {
            let rect = Rectangle::new(
                Point::new(0.0, row * index as f32).anchored(Anchor::TopLeft),
                Size::new(width, row),
            );
            match entry.widget {
                Some(widget) => ctx.tree().set_rectangle(widget, rect),
                None => {
                    let text = Text::new(entry.text.clone()).with_font(font);
                    entry.widget = Some(ctx.tree().add(id, rect, text));
                }
            }
        }
        self.highlight(ctx);
    }

    fn on_key(&mut self, ctx: &mut EventContext<'_>, event: &KeyEvent) -> bool {
        let Key::Display(key) = event.key else {
            return false;
        };
        if event.edge != KeyEdge::Down || self.entries.is_empty() {
            return false;
        }
        let count = self.entries.len();
        match key {
            DisplayKey::Up => self.select(ctx, (self.current + count - 1) % count),
            DisplayKey::Down => self.select(ctx, (self.current + 1) % count),
            DisplayKey::Ok => {
                debug!(entry = self.current, "menu entry activated");
                (self.entries[self.current].action)(ctx);
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::WidgetTree;
    use std::cell::Cell;
    use std::rc::Rc;

    fn press(tree: &mut WidgetTree, key: DisplayKey) -> bool {
        let root = tree.root();
        tree.dispatch_key(root, &KeyEvent::down(Key::Display(key)))
    }

    #[test]
    fn test_entries_become_highlighted_children() {
        let mut tree = WidgetTree::new(Size::new(100.0, 100.0));
        let menu = Menu::new().with_entry("a", |_| {}).with_entry("b", |_| {});
        let id = tree.add(tree.root(), Rectangle::from_size(Size::new(100.0, 100.0)), menu);
        let children = tree.children(id).to_vec();
        assert_eq!(children.len(), 2);
        assert_eq!(tree.background(children[0]), Some(Color::WHITE));
        assert_eq!(tree.foreground(children[0]), Color::BLACK);
        assert_eq!(tree.background(children[1]), Some(Color::BLACK));
        assert!((tree.rectangle(children[1]).top() - 19.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_up_down_wrap_and_ok_activates() {
        let activated = Rc::new(Cell::new(None));
        let mut tree = WidgetTree::new(Size::new(100.0, 100.0));
        let (first, second) = (Rc::clone(&activated), Rc::clone(&activated));
        let menu = Menu::new()
            .with_entry("a", move |_| first.set(Some(0)))
            .with_entry("b", move |_| second.set(Some(1)));
        let id = tree.add(tree.root(), Rectangle::from_size(Size::new(100.0, 100.0)), menu);

        assert!(press(&mut tree, DisplayKey::Up));
        assert_eq!(tree.widget::<Menu>(id).map(Menu::current), Some(1));
        assert!(press(&mut tree, DisplayKey::Down));
        assert_eq!(tree.widget::<Menu>(id).map(Menu::current), Some(0));
        assert!(press(&mut tree, DisplayKey::Ok));
        assert_eq!(activated.get(), Some(0));
        assert!(!press(&mut tree, DisplayKey::Left));
    }

    #[test]
    fn test_key_up_edges_ignored() {
        let mut tree = WidgetTree::new(Size::new(100.0, 100.0));
        let menu = Menu::new().with_entry("a", |_| {});
        tree.add(tree.root(), Rectangle::from_size(Size::new(100.0, 100.0)), menu);
        let root = tree.root();
        assert!(!tree.dispatch_key(root, &KeyEvent::up(Key::Display(DisplayKey::Down))));
    }
}

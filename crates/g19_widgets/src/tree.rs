//! # Widget Tree
//!
//! Arena storage for every widget. Parents own child ids, children store
//! their parent's id, so ownership stays a plain tree without back-pointers.
//!
//! ## Dirty Rule
//!
//! Setting a node dirty walks all the way up to the root, so the root can
//! answer "does anything need painting?" by looking at itself.
//! [`WidgetTree::repaint`] additionally marks the whole subtree.

use std::any::Any;

use g19_geometry::{Anchor, Rectangle, Size};
use g19_input::KeyEvent;
use tracing::trace;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::message::TimerToken;
use crate::surface::Surface;
use crate::widget::{Action, EventContext, PaintContext, Widget};
use crate::widgets::Panel;

/// Index of a node in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(usize);

struct Node {
    rect: Rectangle,
    dirty: bool,
    visible: bool,
    background: Option<Color>,
    foreground: Color,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    /// `None` only while the widget is being called back.
    widget: Option<Box<dyn Widget>>,
}

/// The widget arena.
pub struct WidgetTree {
    nodes: Vec<Node>,
    actions: Vec<Action>,
    next_timer: u64,
}

impl WidgetTree {
    /// A tree whose root covers `size`, black on white-text.
    #[must_use]
    pub fn new(size: Size) -> Self {
        let root = Node {
            rect: Rectangle::from_size(size),
            dirty: true,
            visible: true,
            background: Some(Color::BLACK),
            foreground: Color::WHITE,
            parent: None,
            children: Vec::new(),
            widget: Some(Box::new(Panel)),
        };
        Self {
            nodes: vec![root],
            actions: Vec::new(),
            next_timer: 0,
        }
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> WidgetId {
        WidgetId(0)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds `widget` as the last child of `parent`, inheriting its colors,
    /// and runs its layout hook.
    pub fn add<W: Widget>(&mut self, parent: WidgetId, rect: Rectangle, widget: W) -> WidgetId {
        let id = WidgetId(self.nodes.len());
        let (background, foreground) = self
            .node(parent)
            .map_or((Some(Color::BLACK), Color::WHITE), |p| (p.background, p.foreground));
        self.nodes.push(Node {
            rect,
            dirty: true,
            visible: true,
            background,
            foreground,
            parent: Some(parent),
            children: Vec::new(),
            widget: Some(Box::new(widget)),
        });
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        self.set_dirty(id, true);
        self.layout(id);
        id
    }

    /// Parent of `id`.
    #[must_use]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.node(id)?.parent
    }

    /// Children of `id`, in paint order.
    #[must_use]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// `id` and every node below it, depth-first, parents before children.
    #[must_use]
    pub fn descendants(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if self.node(next).is_none() {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// Rectangle in parent coordinates.
    #[must_use]
    pub fn rectangle(&self, id: WidgetId) -> Rectangle {
        self.node(id).map(|n| n.rect).unwrap_or_default()
    }

    /// Moves or resizes a widget and re-runs its layout hook.
    pub fn set_rectangle(&mut self, id: WidgetId, rect: Rectangle) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        node.rect = rect;
        // The uncovered area belongs to the parent.
        let parent = node.parent.unwrap_or(id);
        self.set_dirty(parent, true);
        self.set_dirty(id, true);
        self.layout(id);
    }

    /// Sizes a widget to its preferred size, keeping its top-left corner.
    pub fn fit_to_preferred(&mut self, id: WidgetId) {
        let rect = self.rectangle(id);
        let preferred = self
            .node(id)
            .and_then(|n| n.widget.as_ref())
            .and_then(|w| w.preferred_size(rect.size()));
        if let Some(size) = preferred {
            let anchor = Anchor::TopLeft;
            self.set_rectangle(id, Rectangle::new(rect.position(anchor).anchored(anchor), size));
        }
    }

    /// Whether `id` needs repainting.
    #[must_use]
    pub fn dirty(&self, id: WidgetId) -> bool {
        self.node(id).is_some_and(|n| n.dirty)
    }

    /// Sets the dirty flag. `true` also marks every ancestor; `false` only this node.
    pub fn set_dirty(&mut self, id: WidgetId, dirty: bool) {
        if !dirty {
            if let Some(node) = self.node_mut(id) {
                node.dirty = false;
            }
            return;
        }
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.node_mut(current) else {
                break;
            };
            node.dirty = true;
            cursor = node.parent;
        }
    }

    /// Marks `id`, all of its descendants and its ancestors dirty.
    pub fn repaint(&mut self, id: WidgetId) {
        for node in self.descendants(id) {
            if let Some(n) = self.node_mut(node) {
                n.dirty = true;
            }
        }
        self.set_dirty(id, true);
    }

    /// Whether `id` is painted and receives keys.
    #[must_use]
    pub fn visible(&self, id: WidgetId) -> bool {
        self.node(id).is_some_and(|n| n.visible)
    }

    /// Shows or hides a subtree.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if node.visible == visible {
            return;
        }
        node.visible = visible;
        let parent = node.parent.unwrap_or(id);
        self.set_dirty(parent, true);
    }

    /// Background color; `None` paints nothing behind the foreground.
    #[must_use]
    pub fn background(&self, id: WidgetId) -> Option<Color> {
        self.node(id).and_then(|n| n.background)
    }

    /// Sets the background color.
    pub fn set_background(&mut self, id: WidgetId, background: Option<Color>) {
        if let Some(node) = self.node_mut(id) {
            node.background = background;
            self.set_dirty(id, true);
        }
    }

    /// Foreground color.
    #[must_use]
    pub fn foreground(&self, id: WidgetId) -> Color {
        self.node(id).map_or(Color::WHITE, |n| n.foreground)
    }

    /// Sets the foreground color.
    pub fn set_foreground(&mut self, id: WidgetId, foreground: Color) {
        if let Some(node) = self.node_mut(id) {
            node.foreground = foreground;
            self.set_dirty(id, true);
        }
    }

    /// The widget at `id`, if it is a `W`.
    #[must_use]
    pub fn widget<W: Widget>(&self, id: WidgetId) -> Option<&W> {
        let widget: &dyn Any = self.node(id)?.widget.as_deref()?;
        widget.downcast_ref::<W>()
    }

    /// Mutates the widget at `id` if it is a `W`. When `f` returns true the
    /// widget is marked dirty. Returns `f`'s result.
    pub fn update<W: Widget>(&mut self, id: WidgetId, f: impl FnOnce(&mut W) -> bool) -> Option<bool> {
        let widget: &mut dyn Any = self.node_mut(id)?.widget.as_deref_mut()?;
        let changed = f(widget.downcast_mut::<W>()?);
        if changed {
            self.set_dirty(id, true);
        }
        Some(changed)
    }

    /// Runs `f` with the widget at `id` taken out of the tree, so it can
    /// mutate the tree through the context.
    pub fn with_widget<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut EventContext<'_>) -> R,
    ) -> Option<R> {
        let mut widget = self.node_mut(id)?.widget.take()?;
        let result = f(widget.as_mut(), &mut EventContext { tree: self, id });
        if let Some(node) = self.node_mut(id) {
            node.widget = Some(widget);
        }
        Some(result)
    }

    /// Offers `event` to the visible subtree at `id`: children first, in
    /// order, depth-first; then `id` itself. Stops at the first taker.
    pub fn dispatch_key(&mut self, id: WidgetId, event: &KeyEvent) -> bool {
        if !self.visible(id) {
            return false;
        }
        let children = self.children(id).to_vec();
        if children.into_iter().any(|child| self.dispatch_key(child, event)) {
            return true;
        }
        self.with_widget(id, |widget, ctx| widget.on_key(ctx, event))
            .unwrap_or(false)
    }

    /// Delivers a timer to its widget.
    pub fn dispatch_timer(&mut self, id: WidgetId, token: TimerToken) {
        self.with_widget(id, |widget, ctx| widget.on_timer(ctx, token));
    }

    /// Delivers fetched data to its widget.
    pub fn dispatch_data(&mut self, id: WidgetId, data: &[u8]) {
        let changed = self.with_widget(id, |widget, _| widget.on_data(data));
        if changed == Some(true) {
            self.set_dirty(id, true);
        }
    }

    /// Paints the tree onto `surface` if the root is dirty, then clears every
    /// dirty flag. Returns true when something was painted.
    pub fn paint(&mut self, surface: &mut Surface) -> bool {
        let root = self.root();
        if !self.dirty(root) {
            return false;
        }
        {
            let mut canvas = Canvas::new(surface);
            self.paint_node(root, &mut canvas);
        }
        for node in &mut self.nodes {
            node.dirty = false;
        }
        trace!(nodes = self.nodes.len(), "tree painted");
        true
    }

    fn paint_node(&self, id: WidgetId, canvas: &mut Canvas<'_>) {
        let Some(node) = self.node(id) else {
            return;
        };
        if let Some(background) = node.background {
            canvas.fill(background);
        }
        if let Some(widget) = &node.widget {
            let ctx = PaintContext {
                size: node.rect.size(),
                foreground: node.foreground,
                background: node.background,
            };
            widget.paint_foreground(&ctx, canvas);
        }
        for &child in &node.children {
            let Some(child_node) = self.node(child) else {
                continue;
            };
            if !child_node.visible {
                continue;
            }
            let mut sub = canvas.child(child_node.rect.to_pixels());
            self.paint_node(child, &mut sub);
        }
    }

    fn layout(&mut self, id: WidgetId) {
        self.with_widget(id, |widget, ctx| widget.layout(ctx));
    }

    pub(crate) fn push_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub(crate) fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    pub(crate) fn next_timer_token(&mut self) -> TimerToken {
        let token = TimerToken(self.next_timer);
        self.next_timer += 1;
        token
    }

    fn node(&self, id: WidgetId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: WidgetId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }
}

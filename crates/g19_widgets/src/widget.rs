//! # Widget Trait
//!
//! Widgets only know how to paint themselves and react to events. Geometry,
//! colors, dirty state and children live in the [`WidgetTree`].

use std::any::Any;
use std::time::Duration;

use g19_geometry::{Rectangle, Size};
use g19_input::KeyEvent;

use crate::app::ScreenId;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::message::TimerToken;
use crate::tree::{WidgetId, WidgetTree};

/// What a widget sees while painting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintContext {
    /// Widget size.
    pub size: Size,
    /// Foreground color.
    pub foreground: Color,
    /// Background color, already filled when set.
    pub background: Option<Color>,
}

/// Requests from event handlers, applied by the app after dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Switch to a screen.
    ShowScreen(ScreenId),
    /// Go back one screen.
    NavigateBack,
    /// Leave the main loop.
    Exit,
    /// Start a periodic timer for `target`.
    StartTimer {
        /// Token reported to `on_timer`.
        token: TimerToken,
        /// Widget receiving the timer.
        target: WidgetId,
        /// Period.
        interval: Duration,
    },
    /// Cancel a timer.
    StopTimer(TimerToken),
}

/// Access to the tree from inside a widget callback.
///
/// The widget being called is temporarily out of the tree: looking it up
/// through [`WidgetTree::widget`] yields `None` until the callback returns.
pub struct EventContext<'a> {
    pub(crate) tree: &'a mut WidgetTree,
    pub(crate) id: WidgetId,
}

impl EventContext<'_> {
    /// The widget being called.
    #[must_use]
    pub const fn id(&self) -> WidgetId {
        self.id
    }

    /// The tree.
    pub fn tree(&mut self) -> &mut WidgetTree {
        self.tree
    }

    /// This widget's rectangle in parent coordinates.
    #[must_use]
    pub fn rectangle(&self) -> Rectangle {
        self.tree.rectangle(self.id)
    }

    /// Marks this widget (and its ancestors) dirty.
    pub fn set_dirty(&mut self) {
        self.tree.set_dirty(self.id, true);
    }

    /// Asks the app to switch screens.
    pub fn show_screen(&mut self, screen: ScreenId) {
        self.tree.push_action(Action::ShowScreen(screen));
    }

    /// Asks the app to go back one screen.
    pub fn navigate_back(&mut self) {
        self.tree.push_action(Action::NavigateBack);
    }

    /// Asks the app to exit.
    pub fn exit(&mut self) {
        self.tree.push_action(Action::Exit);
    }

    /// Starts a periodic timer delivered to this widget's `on_timer`.
    pub fn start_timer(&mut self, interval: Duration) -> TimerToken {
        let token = self.tree.next_timer_token();
        let target = self.id;
        self.tree.push_action(Action::StartTimer {
            token,
            target,
            interval,
        });
        token
    }

    /// Cancels a timer.
    pub fn stop_timer(&mut self, token: TimerToken) {
        self.tree.push_action(Action::StopTimer(token));
    }
}

/// A node's behaviour.
pub trait Widget: Any {
    /// Draws on top of the already-filled background, in local coordinates.
    fn paint_foreground(&self, ctx: &PaintContext, canvas: &mut Canvas<'_>);

    /// Size this widget would like given `available` room.
    fn preferred_size(&self, _available: Size) -> Option<Size> {
        None
    }

    /// Called when the widget is added and whenever its rectangle changes.
    fn layout(&mut self, _ctx: &mut EventContext<'_>) {}

    /// Handles a key edge. Returns true when consumed.
    fn on_key(&mut self, _ctx: &mut EventContext<'_>, _event: &KeyEvent) -> bool {
        false
    }

    /// A timer started by this widget fired.
    fn on_timer(&mut self, _ctx: &mut EventContext<'_>, _token: TimerToken) {}

    /// Data fetched for this widget arrived. Returns true if it changed the widget.
    fn on_data(&mut self, _data: &[u8]) -> bool {
        false
    }
}

//! # App Root
//!
//! Owns the widget tree, the scheduler and the screens. Everything here runs
//! on the main thread; other threads only reach it through the mailbox.
//!
//! ```text
//! scheduler ──Tick(Update)──┐
//!           ──Tick(Timer)───┤
//! key reader ──Key──────────┼──► mailbox ──► App::handle ──► tree ──► Lcd
//! fetcher ──Fetched─────────┘
//! ```

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crossbeam_channel::Sender;
use g19_device::{DeviceResult, DisplayKey, Lcd};
use g19_geometry::{Rectangle, Size};
use g19_input::{Key, KeyEvent};
use g19_scheduler::{JobId, Schedule, Scheduler};
use tracing::{debug, info, trace, warn};

use crate::fetch::Fetcher;
use crate::message::{Command, Message, TimerToken};
use crate::surface::Surface;
use crate::tree::{WidgetId, WidgetTree};
use crate::widget::{Action, Widget};
use crate::widgets::Panel;

/// Opaque screen identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub &'static str);

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Builds a screen's widgets under the given (full-display) screen node.
pub type ScreenFactory = Box<dyn FnOnce(&mut WidgetTree, WidgetId)>;

enum ScreenSlot {
    Pending(ScreenFactory),
    Built(WidgetId),
}

/// The root of the application.
pub struct App {
    tree: WidgetTree,
    scheduler: Scheduler<Command>,
    mailbox: Sender<Message>,
    screens: HashMap<ScreenId, ScreenSlot>,
    current: Option<ScreenId>,
    back_stack: Vec<ScreenId>,
    menu_screen: Option<ScreenId>,
    timers: HashMap<TimerToken, (WidgetId, JobId)>,
    exit_requested: bool,
    surface: Surface,
}

impl App {
    /// An app for a display of `(width, height)` pixels. Scheduler jobs the
    /// app creates post into `mailbox`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(image_size: (u32, u32), scheduler: Scheduler<Command>, mailbox: Sender<Message>) -> Self {
        let (width, height) = image_size;
        Self {
            tree: WidgetTree::new(Size::new(width as f32, height as f32)),
            scheduler,
            mailbox,
            screens: HashMap::new(),
            current: None,
            back_stack: Vec::new(),
            menu_screen: None,
            timers: HashMap::new(),
            exit_requested: false,
            surface: Surface::new(width, height),
        }
    }

    /// Registers a screen. It is built the first time it is shown.
    pub fn register_screen(
        &mut self,
        id: ScreenId,
        factory: impl FnOnce(&mut WidgetTree, WidgetId) + 'static,
    ) {
        if self.screens.insert(id, ScreenSlot::Pending(Box::new(factory))).is_some() {
            warn!(screen = %id, "screen registered twice, keeping the latest");
        }
    }

    /// Screen opened by an unhandled SETTINGS press.
    pub fn set_menu_screen(&mut self, id: ScreenId) {
        self.menu_screen = Some(id);
    }

    /// Switches to `id`. Going to the screen on top of the back stack pops
    /// it; otherwise the current screen is pushed. Returns false if `id` is
    /// unknown or already current.
    pub fn set_screen(&mut self, id: ScreenId) -> bool {
        let switched = self.switch_to(id);
        self.apply_actions();
        switched
    }

    /// Returns to the previous screen. No-op with an empty back stack.
    pub fn navigate_back(&mut self) -> bool {
        let went_back = self.go_back();
        self.apply_actions();
        went_back
    }

    /// The active screen.
    #[must_use]
    pub const fn current_screen(&self) -> Option<ScreenId> {
        self.current
    }

    /// Previously visited screens, most recent last.
    #[must_use]
    pub fn back_stack(&self) -> &[ScreenId] {
        &self.back_stack
    }

    /// Root node of a built screen.
    #[must_use]
    pub fn screen_node(&self, id: ScreenId) -> Option<WidgetId> {
        match self.screens.get(&id)? {
            ScreenSlot::Built(node) => Some(*node),
            ScreenSlot::Pending(_) => None,
        }
    }

    /// The widget tree.
    #[must_use]
    pub const fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// The widget tree, mutably.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// Adds a widget outside of a screen factory and applies whatever its
    /// layout hook requested (timers, typically).
    pub fn add<W: Widget>(&mut self, parent: WidgetId, rect: Rectangle, widget: W) -> WidgetId {
        let id = self.tree.add(parent, rect, widget);
        self.apply_actions();
        id
    }

    /// The scheduler driving this app.
    #[must_use]
    pub const fn scheduler(&self) -> &Scheduler<Command> {
        &self.scheduler
    }

    /// The last painted frame.
    #[must_use]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Schedules the periodic repaint tick.
    pub fn start_updates(&self, interval: Duration) -> JobId {
        info!(interval_ms = interval.as_millis(), "update tick scheduled");
        self.scheduler
            .schedule_to_queue(Schedule::every(interval), Command::Update, self.mailbox.clone())
    }

    /// Starts a periodic timer for `target`. Each tick goes through the
    /// mailbox, so `on_timer` always runs on the main thread.
    pub fn schedule_timer(&mut self, target: WidgetId, interval: Duration) -> TimerToken {
        let token = self.tree.next_timer_token();
        self.start_timer(token, target, interval);
        token
    }

    /// Cancels a timer. Returns false for unknown tokens.
    pub fn stop_timer(&mut self, token: TimerToken) -> bool {
        match self.timers.remove(&token) {
            Some((_, job)) => self.scheduler.stop_job(job),
            None => false,
        }
    }

    /// Consumes one mailbox message.
    ///
    /// # Errors
    ///
    /// Propagates [`Lcd::send_frame`] errors, which only occur when the
    /// surface does not match the panel.
    pub fn handle(&mut self, message: Message, lcd: &dyn Lcd) -> DeviceResult<()> {
        match message {
            Message::Tick(params) => match params.command {
                Command::Update => {
                    self.update(lcd)?;
                }
                Command::Timer(token) => self.fire_timer(token),
                Command::KeyPoll => trace!("key poll tick on the main queue ignored"),
            },
            Message::Key(event) => self.on_key(&event),
            Message::Fetched { target, data } => self.deliver(target, &data),
        }
        Ok(())
    }

    /// Paints if anything is dirty and pushes the frame. Returns whether a
    /// frame was sent.
    ///
    /// # Errors
    ///
    /// See [`App::handle`].
    pub fn update(&mut self, lcd: &dyn Lcd) -> DeviceResult<bool> {
        if !self.tree.paint(&mut self.surface) {
            return Ok(false);
        }
        lcd.send_frame(&self.surface.frame_bytes())?;
        Ok(true)
    }

    /// Offers a key to the current screen. Unhandled SETTINGS and BACK
    /// presses open the menu screen and navigate back.
    pub fn on_key(&mut self, event: &KeyEvent) {
        let handled = self
            .current
            .and_then(|screen| self.screen_node(screen))
            .is_some_and(|node| self.tree.dispatch_key(node, event));
        self.apply_actions();
        if handled || !event.is_down() {
            return;
        }
        match event.key {
            Key::Display(DisplayKey::Settings) => {
                if let Some(menu) = self.menu_screen {
                    self.set_screen(menu);
                }
            }
            Key::Display(DisplayKey::Back) => {
                self.navigate_back();
            }
            _ => trace!(key = ?event.key, "key not handled"),
        }
    }

    /// Asks `fetcher` for `url` on behalf of `target`. Cached bytes are
    /// delivered at once, downloads later through the mailbox.
    pub fn fetch(&mut self, target: WidgetId, fetcher: &dyn Fetcher, url: &str, max_age: Duration) {
        let mailbox = self.mailbox.clone();
        let on_complete = Box::new(move |data: Vec<u8>| {
            if mailbox.send(Message::Fetched { target, data }).is_err() {
                trace!("mailbox closed, fetched data dropped");
            }
        });
        if let Some(data) = fetcher.get(url, on_complete, max_age) {
            self.deliver(target, &data);
        }
    }

    /// Whether a widget asked to exit.
    #[must_use]
    pub const fn should_exit(&self) -> bool {
        self.exit_requested
    }

    /// Asks the main loop to stop.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Cancels every timer and stops the scheduler thread.
    pub fn shutdown(&mut self) {
        for (_, (_, job)) in self.timers.drain() {
            self.scheduler.stop_job(job);
        }
        self.scheduler.shutdown();
    }

    fn deliver(&mut self, target: WidgetId, data: &[u8]) {
        trace!(widget = ?target, bytes = data.len(), "data delivered");
        self.tree.dispatch_data(target, data);
        self.apply_actions();
    }

    fn fire_timer(&mut self, token: TimerToken) {
        let Some(&(target, _)) = self.timers.get(&token) else {
            trace!(?token, "tick for a stopped timer");
            return;
        };
        self.tree.dispatch_timer(target, token);
        self.apply_actions();
    }

    fn start_timer(&mut self, token: TimerToken, target: WidgetId, interval: Duration) {
        let job = self.scheduler.schedule_to_queue(
            Schedule::every(interval),
            Command::Timer(token),
            self.mailbox.clone(),
        );
        debug!(?token, widget = ?target, interval_ms = interval.as_millis(), "timer started");
        self.timers.insert(token, (target, job));
    }

    fn switch_to(&mut self, id: ScreenId) -> bool {
        if self.current == Some(id) {
            return false;
        }
        if !self.screens.contains_key(&id) {
            warn!(screen = %id, "unknown screen");
            return false;
        }
        if let Some(previous) = self.current {
            if self.back_stack.last() == Some(&id) {
                self.back_stack.pop();
            } else {
                self.back_stack.push(previous);
            }
        }
        self.activate(id);
        true
    }

    fn go_back(&mut self) -> bool {
        let Some(previous) = self.back_stack.pop() else {
            return false;
        };
        self.activate(previous);
        true
    }

    fn activate(&mut self, id: ScreenId) {
        let Some(node) = self.build(id) else {
            return;
        };
        if let Some(old) = self.current.and_then(|screen| self.screen_node(screen)) {
            self.tree.set_visible(old, false);
        }
        self.tree.set_visible(node, true);
        self.tree.repaint(node);
        info!(screen = %id, depth = self.back_stack.len(), "screen shown");
        self.current = Some(id);
    }

    fn build(&mut self, id: ScreenId) -> Option<WidgetId> {
        match self.screens.remove(&id)? {
            ScreenSlot::Built(node) => {
                self.screens.insert(id, ScreenSlot::Built(node));
                Some(node)
            }
            ScreenSlot::Pending(factory) => {
                let root = self.tree.root();
                let bounds = Rectangle::from_size(self.tree.rectangle(root).size());
                let node = self.tree.add(root, bounds, Panel);
                self.tree.set_visible(node, false);
                factory(&mut self.tree, node);
                debug!(screen = %id, widgets = self.tree.descendants(node).len(), "screen built");
                self.screens.insert(id, ScreenSlot::Built(node));
                Some(node)
            }
        }
    }

    fn apply_actions(&mut self) {
        loop {
            let actions = self.tree.take_actions();
            if actions.is_empty() {
                break;
            }
            for action in actions {
                match action {
                    Action::ShowScreen(id) => {
                        self.switch_to(id);
                    }
                    Action::NavigateBack => {
                        self.go_back();
                    }
                    Action::Exit => {
                        info!("exit requested");
                        self.exit_requested = true;
                    }
                    Action::StartTimer { token, target, interval } => {
                        self.start_timer(token, target, interval);
                    }
                    Action::StopTimer(token) => {
                        self.stop_timer(token);
                    }
                }
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

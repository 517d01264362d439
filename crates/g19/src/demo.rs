//! # Demo Screens
//!
//! Enough screens to drive the panel end to end:
//!
//! ```text
//! clock ──SETTINGS──► menu ──OK──► clock | status | exit
//!   ▲                  │
//!   └──────BACK────────┘
//! ```

use std::time::{Duration, Instant};

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use g19_geometry::{Anchor, HAnchor, Point, Rectangle, Size};
use g19_widgets::{
    App, Bar, BarOrientation, Canvas, Color, EventContext, Image, Line, Menu, Orientation,
    PaintContext, ScreenId, Text, TimerToken, Widget, WidgetId, WidgetTree,
};
use time::macros::format_description;
use time::OffsetDateTime;

/// Large time and date with a seconds bar.
pub const CLOCK: ScreenId = ScreenId("clock");
/// Screen list.
pub const MENU: ScreenId = ScreenId("menu");
/// Uptime and key hints.
pub const STATUS: ScreenId = ScreenId("status");

/// Registers the demo screens and makes [`MENU`] the settings screen.
pub fn install(app: &mut App) {
    app.register_screen(CLOCK, build_clock);
    app.register_screen(MENU, build_menu);
    app.register_screen(STATUS, build_status);
    app.set_menu_screen(MENU);
}

fn build_clock(tree: &mut WidgetTree, screen: WidgetId) {
    let bounds = tree.rectangle(screen).size();
    tree.add(screen, Rectangle::from_size(bounds), Clock::default());
}

fn build_menu(tree: &mut WidgetTree, screen: WidgetId) {
    let bounds = tree.rectangle(screen).size();
    let title = Rectangle::new(Point::ZERO.anchored(Anchor::TopLeft), Size::new(bounds.width, 24.0));
    tree.add(screen, title, Text::new("Menu").with_alignment(HAnchor::Center));
    let rule = Rectangle::new(
        title.position(Anchor::BottomLeft).anchored(Anchor::TopLeft),
        Size::new(bounds.width, 4.0),
    );
    tree.add(screen, rule, Line::new(Orientation::Horizontal));
    let menu = Menu::new()
        .with_entry("Clock", |ctx| ctx.show_screen(CLOCK))
        .with_entry("Status", |ctx| ctx.show_screen(STATUS))
        .with_entry("Exit", |ctx| ctx.exit());
    let list = Rectangle::spanning(
        rule.position(Anchor::BottomLeft).anchored(Anchor::TopLeft),
        bounds.position(Anchor::BottomRight),
    );
    tree.add(screen, list, menu);
}

fn build_status(tree: &mut WidgetTree, screen: WidgetId) {
    let bounds = tree.rectangle(screen).size();
    let title = Rectangle::new(Point::new(8.0, 8.0).anchored(Anchor::TopLeft), Size::new(200.0, 20.0));
    let id = tree.add(screen, title, Text::new("G19 status"));
    tree.set_foreground(id, Color::YELLOW);

    let started = Instant::now();
    let uptime = Rectangle::new(
        title.position(Anchor::BottomLeft).anchored(Anchor::TopLeft),
        Size::new(200.0, 20.0),
    );
    tree.add(
        screen,
        uptime,
        LiveText::new(Duration::from_secs(1), move || {
            format!("up {}", format_duration(started.elapsed()))
        }),
    );

    let icon = Rectangle::new(
        bounds.position(Anchor::TopRight).anchored(Anchor::TopRight) + Point::new(-8.0, 8.0),
        Size::new(64.0, 64.0),
    );
    tree.add(screen, icon, Image::new(64, 64));

    let hint = Rectangle::new(
        bounds.position(Anchor::BottomCenter).anchored(Anchor::BottomCenter),
        Size::new(bounds.width, 16.0),
    );
    tree.add(
        screen,
        hint,
        Text::new("SETTINGS menu   BACK return")
            .with_font(&FONT_6X10)
            .with_alignment(HAnchor::Center),
    );
}

/// Time, date and a bar growing over each minute; refreshed every second.
#[derive(Default)]
struct Clock {
    time: Option<WidgetId>,
    date: Option<WidgetId>,
    seconds: Option<WidgetId>,
}

impl Clock {
    fn refresh(&self, tree: &mut WidgetTree) {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let (time, date, second) = format_clock(now);
        if let Some(id) = self.time {
            tree.update::<Text>(id, |t| t.set_text(time));
        }
        if let Some(id) = self.date {
            tree.update::<Text>(id, |t| t.set_text(date));
        }
        if let Some(id) = self.seconds {
            tree.update::<Bar>(id, |b| b.set_value(f32::from(second)));
        }
    }
}

impl Widget for Clock {
    fn paint_foreground(&self, _ctx: &PaintContext, _canvas: &mut Canvas<'_>) {}

    fn layout(&mut self, ctx: &mut EventContext<'_>) {
        if self.time.is_some() {
            return;
        }
        let id = ctx.id();
        let size = ctx.rectangle().size();
        let time = Rectangle::new(
            size.position(Anchor::Center).anchored(Anchor::BottomCenter),
            Size::new(size.width, 24.0),
        );
        let date = Rectangle::new(
            time.position(Anchor::BottomCenter).anchored(Anchor::TopCenter),
            Size::new(size.width, 16.0),
        );
        let bar = Rectangle::new(
            date.position(Anchor::BottomCenter).anchored(Anchor::TopCenter) + Point::new(0.0, 12.0),
            Size::new(size.width * 0.75, 12.0),
        );
        let tree = ctx.tree();
        self.time = Some(tree.add(
            id,
            time,
            Text::new("").with_font(&FONT_10X20).with_alignment(HAnchor::Center),
        ));
        self.date = Some(tree.add(
            id,
            date,
            Text::new("").with_font(&FONT_6X10).with_alignment(HAnchor::Center),
        ));
        self.seconds = Some(tree.add(
            id,
            bar,
            Bar::new(BarOrientation::LeftToRight)
                .with_total(59.0)
                .with_border(Color::GRAY50),
        ));
        if let Some(seconds) = self.seconds {
            tree.set_foreground(seconds, Color::CYAN);
        }
        self.refresh(tree);
        ctx.start_timer(Duration::from_secs(1));
    }

    fn on_timer(&mut self, ctx: &mut EventContext<'_>, _token: TimerToken) {
        self.refresh(ctx.tree());
    }
}

/// A text label re-rendered by a closure on a timer.
struct LiveText {
    interval: Duration,
    render: Box<dyn Fn() -> String>,
    text: Option<WidgetId>,
}

impl LiveText {
    fn new(interval: Duration, render: impl Fn() -> String + 'static) -> Self {
        Self {
            interval,
            render: Box::new(render),
            text: None,
        }
    }

    fn refresh(&self, tree: &mut WidgetTree) {
        if let Some(id) = self.text {
            let text = (self.render)();
            tree.update::<Text>(id, |t| t.set_text(text));
        }
    }
}

impl Widget for LiveText {
    fn paint_foreground(&self, _ctx: &PaintContext, _canvas: &mut Canvas<'_>) {}

    fn layout(&mut self, ctx: &mut EventContext<'_>) {
        let local = Rectangle::from_size(ctx.rectangle().size());
        match self.text {
            Some(id) => ctx.tree().set_rectangle(id, local),
            None => {
                let id = ctx.id();
                self.text = Some(ctx.tree().add(id, local, Text::new("")));
                self.refresh(ctx.tree());
                ctx.start_timer(self.interval);
            }
        }
    }

    fn on_timer(&mut self, ctx: &mut EventContext<'_>, _token: TimerToken) {
        self.refresh(ctx.tree());
    }
}

/// `HH:MM:SS`, `YYYY-MM-DD` and the second within the minute.
fn format_clock(now: OffsetDateTime) -> (String, String, u8) {
    (
        now.format(format_description!("[hour]:[minute]:[second]")).unwrap_or_default(),
        now.format(format_description!("[year]-[month]-[day]")).unwrap_or_default(),
        now.second(),
    )
}

fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (days, hours, minutes, seconds) = (secs / 86_400, secs / 3600 % 24, secs / 60 % 60, secs % 60);
    if days > 0 {
        format!("{days}d {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}

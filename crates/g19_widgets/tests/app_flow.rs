//! App-level behaviour: dirty propagation through screens, the back
//! stack, key fallbacks, timers and fetched data, all driven through the
//! mailbox the way the main loop drives them.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver};
use g19_device::{DisplayKey, Lcd, Simulator, FRAME_PIXEL_BYTES};
use g19_geometry::{Anchor, Point, Rectangle, Size};
use g19_input::{Key, KeyEvent};
use g19_scheduler::Scheduler;
use g19_widgets::{
    App, Canvas, Command, EventContext, FetchCallback, Fetcher, Image, Message, PaintContext,
    ScreenId, Text, TimerToken, Widget, WidgetId, WidgetTree,
};

const CLOCK: ScreenId = ScreenId("clock");
const MENU: ScreenId = ScreenId("menu");
const STATUS: ScreenId = ScreenId("status");

#[derive(Default)]
struct Ticker {
    ticks: u32,
    consume_left: bool,
}

impl Widget for Ticker {
    fn paint_foreground(&self, _ctx: &PaintContext, _canvas: &mut Canvas<'_>) {}

    fn layout(&mut self, ctx: &mut EventContext<'_>) {
        if !self.consume_left {
            ctx.start_timer(Duration::from_millis(5));
        }
    }

    fn on_key(&mut self, ctx: &mut EventContext<'_>, event: &KeyEvent) -> bool {
        if self.consume_left && event.key == Key::Display(DisplayKey::Left) {
            ctx.show_screen(STATUS);
            return true;
        }
        false
    }

    fn on_timer(&mut self, ctx: &mut EventContext<'_>, _token: TimerToken) {
        self.ticks += 1;
        ctx.set_dirty();
    }
}

fn area() -> Rectangle {
    Rectangle::new(Point::new(10.0, 10.0).anchored(Anchor::TopLeft), Size::new(100.0, 20.0))
}

/// Registers three screens, each with one leaf; records the leaf ids.
fn app() -> (App, Receiver<Message>, Rc<RefCell<Vec<(ScreenId, WidgetId)>>>) {
    let (tx, rx) = bounded(8);
    let scheduler = Scheduler::<Command>::new().expect("scheduler");
    let mut app = App::new((320, 240), scheduler, tx);
    let leaves = Rc::new(RefCell::new(Vec::new()));
    for screen in [CLOCK, MENU, STATUS] {
        let leaves = Rc::clone(&leaves);
        app.register_screen(screen, move |tree: &mut WidgetTree, node| {
            let leaf = if screen == CLOCK {
                tree.add(node, area(), Ticker { ticks: 0, consume_left: true })
            } else {
                tree.add(node, area(), Text::new(screen.0))
            };
            leaves.borrow_mut().push((screen, leaf));
        });
    }
    app.set_menu_screen(MENU);
    (app, rx, leaves)
}

fn leaf(leaves: &Rc<RefCell<Vec<(ScreenId, WidgetId)>>>, screen: ScreenId) -> WidgetId {
    leaves
        .borrow()
        .iter()
        .find(|(s, _)| *s == screen)
        .map(|(_, id)| *id)
        .expect("screen built")
}

fn press(app: &mut App, key: DisplayKey) {
    app.on_key(&KeyEvent::down(Key::Display(key)));
    app.on_key(&KeyEvent::up(Key::Display(key)));
}

#[test]
fn test_leaf_dirty_reaches_app_root() {
    let (mut app, _rx, leaves) = app();
    let lcd = Simulator::new();
    assert!(app.set_screen(CLOCK));
    assert!(app.update(&lcd).expect("paint"));
    assert!(!app.update(&lcd).expect("paint"), "clean tree must not repaint");

    let leaf = leaf(&leaves, CLOCK);
    let screen = app.screen_node(CLOCK).expect("built");
    let root = app.tree().root();
    app.tree_mut().set_dirty(leaf, true);
    assert!(app.tree().dirty(leaf));
    assert!(app.tree().dirty(screen));
    assert!(app.tree().dirty(root));

    assert!(app.update(&lcd).expect("paint"));
    assert_eq!(lcd.frames_shown(), 2);
    assert_eq!(lcd.last_frame().map(|f| f.len()), Some(FRAME_PIXEL_BYTES));
}

#[test]
fn test_screens_build_lazily() {
    let (mut app, _rx, leaves) = app();
    assert!(app.screen_node(STATUS).is_none());
    app.set_screen(CLOCK);
    assert_eq!(leaves.borrow().len(), 1);
    app.set_screen(STATUS);
    app.set_screen(CLOCK);
    assert_eq!(leaves.borrow().len(), 2, "screens are built once");
}

#[test]
fn test_back_stack_collapses_on_return() {
    let (mut app, _rx, _) = app();
    app.set_screen(CLOCK);
    app.set_screen(STATUS);
    assert_eq!(app.back_stack(), &[CLOCK]);

    // Forward into the screen we came from pops instead of pushing.
    app.set_screen(CLOCK);
    assert!(app.back_stack().is_empty());

    app.set_screen(MENU);
    app.set_screen(STATUS);
    assert_eq!(app.back_stack(), &[CLOCK, MENU]);
    assert!(app.navigate_back());
    assert_eq!(app.current_screen(), Some(MENU));
    assert!(app.navigate_back());
    assert!(!app.navigate_back());
    assert_eq!(app.current_screen(), Some(CLOCK));
    assert!(!app.set_screen(CLOCK));
    assert!(!app.set_screen(ScreenId("nope")));
}

#[test]
fn test_only_current_screen_is_visible() {
    let (mut app, _rx, _) = app();
    app.set_screen(CLOCK);
    app.set_screen(STATUS);
    let clock = app.screen_node(CLOCK).expect("built");
    let status = app.screen_node(STATUS).expect("built");
    assert!(!app.tree().visible(clock));
    assert!(app.tree().visible(status));
}

#[test]
fn test_unhandled_settings_and_back() {
    let (mut app, _rx, _) = app();
    app.set_screen(CLOCK);
    press(&mut app, DisplayKey::Settings);
    assert_eq!(app.current_screen(), Some(MENU));
    press(&mut app, DisplayKey::Back);
    assert_eq!(app.current_screen(), Some(CLOCK));
    // Nothing to go back to.
    press(&mut app, DisplayKey::Back);
    assert_eq!(app.current_screen(), Some(CLOCK));
}

#[test]
fn test_widget_handles_key_and_requests_screen() {
    let (mut app, _rx, _) = app();
    app.set_screen(CLOCK);
    press(&mut app, DisplayKey::Left);
    assert_eq!(app.current_screen(), Some(STATUS));
    assert_eq!(app.back_stack(), &[CLOCK]);
}

#[test]
fn test_timers_run_on_main_thread_via_mailbox() {
    let (tx, rx) = bounded(8);
    let scheduler = Scheduler::<Command>::new().expect("scheduler");
    let mut app = App::new((320, 240), scheduler, tx);
    let lcd = Simulator::new();
    let root = app.tree().root();
    let ticker = app.add(root, area(), Ticker::default());

    let mut timer_ticks = 0;
    while timer_ticks < 3 {
        let message = rx.recv_timeout(Duration::from_secs(2)).expect("timer tick");
        if matches!(&message, Message::Tick(p) if matches!(p.command, Command::Timer(_))) {
            timer_ticks += 1;
        }
        app.handle(message, &lcd).expect("handle");
    }
    assert_eq!(app.tree().widget::<Ticker>(ticker).map(|t| t.ticks), Some(3));
    assert!(app.tree().dirty(root));
    app.shutdown();
}

#[test]
fn test_stopped_timer_is_ignored() {
    let (tx, rx) = bounded(8);
    let scheduler = Scheduler::<Command>::new().expect("scheduler");
    let mut app = App::new((320, 240), scheduler, tx);
    let lcd = Simulator::new();
    let root = app.tree().root();
    let target = app.tree_mut().add(root, area(), Ticker { ticks: 0, consume_left: true });
    let token = app.schedule_timer(target, Duration::from_millis(5));

    let message = rx.recv_timeout(Duration::from_secs(2)).expect("timer tick");
    assert!(app.stop_timer(token));
    assert!(!app.stop_timer(token));
    app.handle(message, &lcd).expect("handle");
    assert_eq!(app.tree().widget::<Ticker>(target).map(|t| t.ticks), Some(0));
}

#[test]
fn test_update_ticks_reach_the_panel() {
    let (tx, rx) = bounded(1);
    let scheduler = Scheduler::<Command>::new().expect("scheduler");
    let mut app = App::new((320, 240), scheduler, tx);
    let lcd = Simulator::new();
    app.register_screen(CLOCK, |tree, node| {
        tree.add(node, area(), Text::new("12:00"));
    });
    app.set_screen(CLOCK);
    app.start_updates(Duration::from_millis(5));

    let message = rx.recv_timeout(Duration::from_secs(2)).expect("update tick");
    app.handle(message, &lcd).expect("handle");
    assert_eq!(lcd.frames_shown(), 1);
    assert!(!app.tree().dirty(app.tree().root()));
}

struct CannedFetcher {
    cached: Option<Vec<u8>>,
    later: Vec<u8>,
}

impl Fetcher for CannedFetcher {
    fn get(&self, _url: &str, on_complete: FetchCallback, _max_age: Duration) -> Option<Vec<u8>> {
        if self.cached.is_some() {
            return self.cached.clone();
        }
        let later = self.later.clone();
        std::thread::spawn(move || on_complete(later));
        None
    }
}

#[test]
fn test_fetched_data_cached_and_async() {
    let (tx, rx) = bounded(8);
    let scheduler = Scheduler::<Command>::new().expect("scheduler");
    let mut app = App::new((320, 240), scheduler, tx);
    let lcd = Simulator::new();
    let root = app.tree().root();
    let image = app.add(root, area(), Image::new(1, 1));

    let cached = CannedFetcher { cached: Some(vec![1, 0]), later: Vec::new() };
    app.fetch(image, &cached, "http://cache/hit", Duration::from_secs(60));
    assert_eq!(app.tree().widget::<Image>(image).map(Image::is_loaded), Some(true));

    let image = app.add(root, area(), Image::new(1, 1));
    let remote = CannedFetcher { cached: None, later: vec![2, 0] };
    app.fetch(image, &remote, "http://remote/miss", Duration::from_secs(60));
    assert_eq!(app.tree().widget::<Image>(image).map(Image::is_loaded), Some(false));

    let message = rx.recv_timeout(Duration::from_secs(2)).expect("fetched");
    assert!(matches!(&message, Message::Fetched { target, .. } if *target == image));
    app.handle(message, &lcd).expect("handle");
    assert_eq!(app.tree().widget::<Image>(image).map(Image::is_loaded), Some(true));
}

#[test]
fn test_exit_action() {
    struct Quitter;
    impl Widget for Quitter {
        fn paint_foreground(&self, _ctx: &PaintContext, _canvas: &mut Canvas<'_>) {}
        fn on_key(&mut self, ctx: &mut EventContext<'_>, _event: &KeyEvent) -> bool {
            ctx.exit();
            true
        }
    }
    let (mut app, _rx, _) = app();
    app.register_screen(ScreenId("quit"), |tree, node| {
        tree.add(node, area(), Quitter);
    });
    app.set_screen(ScreenId("quit"));
    assert!(!app.should_exit());
    press(&mut app, DisplayKey::Ok);
    assert!(app.should_exit());
}

#[test]
fn test_frame_matches_panel_size() {
    let (mut app, _rx, _) = app();
    let lcd = Simulator::new();
    let (w, h) = lcd.image_size();
    app.set_screen(STATUS);
    app.update(&lcd).expect("paint");
    assert_eq!(app.surface().pixels().len(), (w * h) as usize);
}

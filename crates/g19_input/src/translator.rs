//! # Key Translator
//!
//! Two-state (up/down) machine per key, one bit per key, one mask per group.

use g19_device::{DisplayKey, GKey};

/// Direction of a key transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyEdge {
    /// The key went down.
    Down,
    /// The key was released.
    Up,
}

/// A key from either group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Display-panel key.
    Display(DisplayKey),
    /// G, M or light key.
    G(GKey),
}

/// One edge of one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Down or up.
    pub edge: KeyEdge,
    /// Which key.
    pub key: Key,
}

impl KeyEvent {
    /// A key-down event.
    #[must_use]
    pub const fn down(key: Key) -> Self {
        Self { edge: KeyEdge::Down, key }
    }

    /// A key-up event.
    #[must_use]
    pub const fn up(key: Key) -> Self {
        Self { edge: KeyEdge::Up, key }
    }

    /// True for key-down events.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.edge == KeyEdge::Down
    }
}

/// Held-key mask of one key group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyGroupState {
    mask: u32,
}

impl KeyGroupState {
    /// Currently held bits.
    #[must_use]
    pub const fn mask(&self) -> u32 {
        self.mask
    }

    /// Replaces the mask, returning `(down, up)` transition masks.
    pub fn update(&mut self, current: u32) -> (u32, u32) {
        let previous = self.mask;
        self.mask = current;
        (!previous & current, previous & !current)
    }
}

/// Tracks both key groups and emits their edges.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyTranslator {
    display: KeyGroupState,
    g: KeyGroupState,
}

impl KeyTranslator {
    /// All keys up.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one poll worth of packets. `None` means the group reported
    /// nothing this tick and keeps its state.
    ///
    /// Every down edge (display group first) precedes every up edge, each
    /// group in ascending bit order. Bits without a symbolic key are
    /// tracked but not reported.
    pub fn translate(&mut self, display: Option<u8>, g: Option<u32>) -> Vec<KeyEvent> {
        let (display_down, display_up) = display.map_or((0, 0), |m| self.display.update(u32::from(m)));
        let (g_down, g_up) = g.map_or((0, 0), |m| self.g.update(m));

        let mut events = Vec::new();
        push_display(&mut events, display_down, KeyEvent::down);
        push_g(&mut events, g_down, KeyEvent::down);
        push_display(&mut events, display_up, KeyEvent::up);
        push_g(&mut events, g_up, KeyEvent::up);
        events
    }

    /// Display key mask.
    #[must_use]
    pub const fn display_state(&self) -> KeyGroupState {
        self.display
    }

    /// G/M key mask.
    #[must_use]
    pub const fn g_state(&self) -> KeyGroupState {
        self.g
    }

    /// Keys currently held, display keys first.
    #[must_use]
    pub fn pressed(&self) -> Vec<Key> {
        let mut keys = Vec::new();
        for_each_bit(self.display.mask, |bit| {
            if let Some(key) = u8::try_from(bit).ok().and_then(DisplayKey::from_bit) {
                keys.push(Key::Display(key));
            }
        });
        for_each_bit(self.g.mask, |bit| {
            if let Some(key) = GKey::from_bit(bit) {
                keys.push(Key::G(key));
            }
        });
        keys
    }
}

fn push_display(events: &mut Vec<KeyEvent>, mask: u32, make: fn(Key) -> KeyEvent) {
    for_each_bit(mask, |bit| {
        if let Some(key) = u8::try_from(bit).ok().and_then(DisplayKey::from_bit) {
            events.push(make(Key::Display(key)));
        }
    });
}

fn push_g(events: &mut Vec<KeyEvent>, mask: u32, make: fn(Key) -> KeyEvent) {
    for_each_bit(mask, |bit| {
        if let Some(key) = GKey::from_bit(bit) {
            events.push(make(Key::G(key)));
        }
    });
}

/// Calls `f` with each set bit of `mask`, lowest first.
fn for_each_bit(mut mask: u32, mut f: impl FnMut(u32)) {
    while mask != 0 {
        let bit = mask & mask.wrapping_neg();
        f(bit);
        mask &= !bit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(key: DisplayKey) -> Key {
        Key::Display(key)
    }

    #[test]
    fn test_edge_sequence() {
        let mut t = KeyTranslator::new();
        assert!(t.translate(Some(0), None).is_empty());
        assert_eq!(
            t.translate(Some(0b101), None),
            vec![
                KeyEvent::down(display(DisplayKey::Settings)),
                KeyEvent::down(display(DisplayKey::Menu)),
            ]
        );
        // Menu stays held: no second down.
        assert_eq!(t.translate(Some(0b100), None), vec![KeyEvent::up(display(DisplayKey::Settings))]);
        assert!(t.translate(Some(0b100), None).is_empty());
    }

    #[test]
    fn test_downs_before_ups_across_groups() {
        let mut t = KeyTranslator::new();
        t.translate(Some(DisplayKey::Up.bit()), Some(GKey::G05.bit()));
        let events = t.translate(Some(DisplayKey::Ok.bit()), Some(GKey::M1.bit()));
        assert_eq!(
            events,
            vec![
                KeyEvent::down(display(DisplayKey::Ok)),
                KeyEvent::down(Key::G(GKey::M1)),
                KeyEvent::up(display(DisplayKey::Up)),
                KeyEvent::up(Key::G(GKey::G05)),
            ]
        );
    }

    #[test]
    fn test_no_data_keeps_state() {
        let mut t = KeyTranslator::new();
        t.translate(Some(DisplayKey::Back.bit()), None);
        assert!(t.translate(None, None).is_empty());
        assert_eq!(t.pressed(), vec![display(DisplayKey::Back)]);
    }

    #[test]
    fn test_unknown_bits_tracked_silently() {
        let mut t = KeyTranslator::new();
        let events = t.translate(None, Some(0x01_0000 | GKey::G01.bit()));
        assert_eq!(events, vec![KeyEvent::down(Key::G(GKey::G01))]);
        assert_eq!(t.g_state().mask(), 0x01_0001);
        assert!(t.translate(None, Some(0)).iter().all(|e| !e.is_down()));
    }

    #[test]
    fn test_group_update() {
        let mut g = KeyGroupState::default();
        assert_eq!(g.update(0b0110), (0b0110, 0));
        assert_eq!(g.update(0b0011), (0b0001, 0b0100));
        assert_eq!(g.mask(), 0b0011);
    }
}

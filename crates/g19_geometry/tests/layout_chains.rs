//! Integration tests for anchor-based layout composition.

use g19_geometry::{Anchor, HAnchor, Point, Rectangle, Size, VAnchor};
use proptest::prelude::*;

fn anchor_strategy() -> impl Strategy<Value = Anchor> {
    (0usize..9).prop_map(|i| Anchor::ALL[i])
}

proptest! {
    #[test]
    fn prop_position_round_trip(
        x in -1000.0f32..1000.0,
        y in -1000.0f32..1000.0,
        w in 0.0f32..500.0,
        h in 0.0f32..500.0,
        built in anchor_strategy(),
        queried in anchor_strategy(),
    ) {
        let r = Rectangle::new(Point::new(x, y).anchored(built), Size::new(w, h));
        let p = r.position(queried);
        let rebuilt = Rectangle::new(p.anchored(queried), r.size());
        prop_assert_eq!(rebuilt.position(queried), p);
    }

    #[test]
    fn prop_built_anchor_is_exact(
        x in -1000.0f32..1000.0,
        y in -1000.0f32..1000.0,
        w in 0.0f32..500.0,
        h in 0.0f32..500.0,
        anchor in anchor_strategy(),
    ) {
        let p = Point::new(x, y);
        prop_assert_eq!(Rectangle::new(p.anchored(anchor), Size::new(w, h)).position(anchor), p);
    }
}

#[test]
fn test_place_next_to() {
    let screen = Rectangle::from_size(Size::new(320.0, 240.0));
    let header = Rectangle::new(
        screen.position(Anchor::TopLeft).anchored(Anchor::TopLeft),
        Size::new(320.0, 30.0),
    );
    let body = Rectangle::spanning(
        header.position(Anchor::BottomLeft).anchored(Anchor::TopLeft),
        screen.position(Anchor::BottomRight),
    );
    assert_eq!(body.top(), 30.0);
    assert_eq!(body.size(), Size::new(320.0, 210.0));

    let badge = Rectangle::new(
        (body.position(Anchor::TopRight) + Point::new(-4.0, 4.0)).anchored(Anchor::TopRight),
        Size::new(20.0, 10.0),
    );
    assert_eq!(badge.left(), 296.0);
    assert_eq!(badge.top(), 34.0);
}

#[test]
fn test_deep_nesting() {
    // Each level is centered in its parent by moving its TopLeft onto the parent's.
    let mut outer = Rectangle::from_size(Size::new(320.0, 240.0));
    let mut origin = Point::ZERO;
    for _ in 0..4 {
        let inner_size = outer.size() / 2.0;
        let inner = Rectangle::new(
            outer.position(Anchor::Center).anchored(Anchor::Center),
            inner_size,
        );
        origin = origin + inner.top_left();
        outer = Rectangle::from_size(inner_size);
    }
    assert_eq!(outer.size(), Size::new(20.0, 15.0));
    assert_eq!(origin, Point::new(150.0, 112.5));
}

#[test]
fn test_split_column() {
    let column = Rectangle::from_size(Size::new(100.0, 90.0));
    let top = column.with_height(30.0, VAnchor::Top);
    let bottom = column.with_height(30.0, VAnchor::Bottom);
    let narrow = column.with_width(10.0, HAnchor::Center);
    assert_eq!(top.bottom(), 30.0);
    assert_eq!(bottom.top(), 60.0);
    assert_eq!(narrow.left(), 45.0);
}

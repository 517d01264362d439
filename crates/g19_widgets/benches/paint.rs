//! Benchmark for a full-tree repaint of a typical screen.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use g19_geometry::{Anchor, Point, Rectangle, Size};
use g19_widgets::{Bar, BarOrientation, Color, Line, Orientation, Surface, Text, WidgetTree};

#[allow(clippy::cast_precision_loss)]
fn status_screen() -> WidgetTree {
    let mut tree = WidgetTree::new(Size::new(320.0, 240.0));
    let root = tree.root();
    for row in 0..8 {
        let top = row as f32 * 30.0;
        let label = Rectangle::new(Point::new(4.0, top).anchored(Anchor::TopLeft), Size::new(100.0, 20.0));
        tree.add(root, label, Text::new(format!("cpu{row}")));
        let bar = Bar::new(BarOrientation::LeftToRight)
            .with_total(100.0)
            .with_border(Color::GRAY50);
        let bar_rect = Rectangle::new(label.position(Anchor::TopRight).anchored(Anchor::TopLeft), Size::new(200.0, 20.0));
        let id = tree.add(root, bar_rect, bar);
        tree.update::<Bar>(id, |b| b.set_values(vec![(row as f32 * 10.0, None), (5.0, Some(Color::RED))]));
        let rule = Rectangle::new(label.position(Anchor::BottomLeft).anchored(Anchor::TopLeft), Size::new(312.0, 6.0));
        tree.add(root, rule, Line::new(Orientation::Horizontal));
    }
    tree
}

fn bench_paint(c: &mut Criterion) {
    let mut tree = status_screen();
    let mut surface = Surface::new(320, 240);
    let root = tree.root();

    c.bench_function("paint_full_tree", |b| {
        b.iter(|| {
            tree.repaint(root);
            black_box(tree.paint(&mut surface))
        });
    });
    c.bench_function("paint_clean_tree", |b| {
        b.iter(|| black_box(tree.paint(&mut surface)));
    });
}

criterion_group!(benches, bench_paint);
criterion_main!(benches);

// Property-style checks for the evasive placement, swept over seeds and layouts.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use valentine_page::evade::{
    EvadeConfig, Layout, PlacementKind, evade_pointer, is_near, place_evasive,
};
use valentine_page::geometry::{Bounds, Point, Rect, Size};

const NO: Size = Size::new(120.0, 44.0);

fn layouts() -> Vec<Layout> {
    let mut out = Vec::new();
    for &(w, h) in &[(800.0, 600.0), (375.0, 667.0), (1920.0, 1080.0), (320.0, 240.0)] {
        for &(nx, ny) in &[(16.0, 16.0), (100.0, 100.0), (w / 2.0, h / 2.0)] {
            let no = Rect::at(Point::new(nx, ny), NO);
            let yes = Rect::new(w / 3.0, h / 3.0, 110.0, 48.0);
            if let Some(l) = Layout::measured(Size::new(w, h), no, yes) {
                out.push(l);
            }
        }
    }
    out
}

#[test]
fn placement_always_within_bounds() {
    let cfg = EvadeConfig::default();
    for layout in layouts() {
        let bounds = Bounds::inset(layout.container, layout.no.size, cfg.margin);
        for seed in 0..64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let p = place_evasive(&layout, layout.no.center(), &cfg, &mut rng);
            if p.kind != PlacementKind::Stayed {
                assert!(bounds.contains(p.position), "{:?} out of {:?}", p.position, bounds);
            }
        }
    }
}

#[test]
fn moved_button_never_overlaps_padded_yes() {
    let cfg = EvadeConfig::default();
    for layout in layouts() {
        let keep_out = layout.yes.inflate(cfg.yes_padding);
        for seed in 0..64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let p = place_evasive(&layout, layout.no.center(), &cfg, &mut rng);
            if p.moved() {
                assert!(!Rect::at(p.position, layout.no.size).intersects(&keep_out));
            }
        }
    }
}

#[test]
fn far_cursor_leaves_button_alone() {
    let cfg = EvadeConfig::default();
    let layout = layouts()[0];
    let mut rng = SmallRng::seed_from_u64(0);
    for &(x, y) in &[(700.0, 500.0), (0.0, 590.0), (790.0, 10.0)] {
        let cursor = Point::new(x, y);
        assert!(!is_near(&layout.no, cursor, &cfg));
        assert!(evade_pointer(&layout, cursor, &cfg, &mut rng).is_none());
    }
}

#[test]
fn stationary_cursor_converges() {
    // Feeding each result back in with the cursor parked: every call returns
    // after a bounded number of samples and the button ends up out of reach.
    let cfg = EvadeConfig::default();
    let mut layout = layouts()[1];
    let cursor = layout.no.center();
    let mut rng = SmallRng::seed_from_u64(99);
    let mut dodges = 0;
    while let Some(p) = evade_pointer(&layout, cursor, &cfg, &mut rng) {
        layout.no.origin = p.position;
        dodges += 1;
        assert!(dodges < 10, "button kept churning under a still cursor");
    }
    assert!(dodges >= 1);
}

// 800×600, No at (100,100), Yes at (300,100), cursor (110,110).
#[test]
fn reference_scenario() {
    let cfg = EvadeConfig::default();
    let layout = Layout::measured(
        Size::new(800.0, 600.0),
        Rect::at(Point::new(100.0, 100.0), NO),
        Rect::at(Point::new(300.0, 100.0), NO),
    )
    .unwrap();
    let cursor = Point::new(110.0, 110.0);
    for seed in 0..32 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let p = evade_pointer(&layout, cursor, &cfg, &mut rng).expect("cursor is inside the radius");
        assert_eq!(p.kind, PlacementKind::Accepted);
        let rect = Rect::at(p.position, NO);
        assert!(rect.center().distance(cursor) >= 140.0);
        assert!(!rect.intersects(&layout.yes.inflate(cfg.yes_padding)));
    }
}

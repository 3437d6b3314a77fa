use super::*;
use crate::camera::Size;
use crate::consts::HIT_SLACK_PX;

/// 1000×1000 container over a 1000×1000 image: identity transform at fit.
fn viewport() -> Viewport {
    let mut vp = Viewport::new();
    vp.set_container(Size::new(1000.0, 1000.0));
    vp.set_image(Size::new(1000.0, 1000.0));
    vp
}

fn store(pins: Vec<Pin>) -> PinStore {
    let mut s = PinStore::new();
    s.load_snapshot(pins);
    s
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// pin_screen_position
// =============================================================

#[test]
fn screen_position_of_placed_pin() {
    let vp = viewport();
    let pin = Pin::new("a", "A").at(0.1, 0.2);
    assert_eq!(pin_screen_position(&pin, &vp), Some(pt(100.0, 200.0)));
}

#[test]
fn screen_position_of_unplaced_pin_is_none() {
    let vp = viewport();
    assert!(pin_screen_position(&Pin::new("a", "A"), &vp).is_none());
}

#[test]
fn screen_position_without_image_is_none() {
    let vp = Viewport::new();
    assert!(pin_screen_position(&Pin::new("a", "A").at(0.5, 0.5), &vp).is_none());
}

// =============================================================
// find_pin_at
// =============================================================

#[test]
fn hit_exact_center() {
    let pins = store(vec![Pin::new("a", "A").at(0.1, 0.1)]);
    let hit = find_pin_at(pt(100.0, 100.0), &pins, &viewport());
    assert_eq!(hit.map(|p| p.id.as_str()), Some("a"));
}

#[test]
fn hit_at_radius_boundary() {
    let pins = store(vec![Pin::new("a", "A").at(0.1, 0.1)]);
    assert!(find_pin_at(pt(100.0 + HIT_RADIUS_PX - 0.001, 100.0), &pins, &viewport()).is_some());
}

#[test]
fn miss_just_outside_radius() {
    let pins = store(vec![Pin::new("a", "A").at(0.1, 0.1)]);
    assert!(find_pin_at(pt(100.0 + HIT_RADIUS_PX + 0.01, 100.0), &pins, &viewport()).is_none());
}

#[test]
fn hit_radius_is_hover_radius_plus_slack() {
    assert!((HIT_RADIUS_PX - (9.0 + HIT_SLACK_PX)).abs() < f64::EPSILON);
}

#[test]
fn miss_on_empty_store() {
    assert!(find_pin_at(pt(100.0, 100.0), &PinStore::new(), &viewport()).is_none());
}

#[test]
fn unplaced_pins_are_never_hit() {
    let pins = store(vec![Pin::new("a", "A")]);
    assert!(find_pin_at(pt(0.0, 0.0), &pins, &viewport()).is_none());
}

#[test]
fn overlapping_pins_last_drawn_wins() {
    let pins = store(vec![
        Pin::new("under", "Under").at(0.1, 0.1),
        Pin::new("over", "Over").at(0.104, 0.1),
    ]);
    let hit = find_pin_at(pt(100.0, 100.0), &pins, &viewport());
    assert_eq!(hit.map(|p| p.id.as_str()), Some("over"));
}

#[test]
fn overlapping_pins_order_not_distance_decides() {
    // "under" is exactly on the pointer but "over" is drawn later and still in range.
    let pins = store(vec![
        Pin::new("under", "Under").at(0.1, 0.1),
        Pin::new("over", "Over").at(0.11, 0.1),
    ]);
    let hit = find_pin_at(pt(100.0, 100.0), &pins, &viewport());
    assert_eq!(hit.map(|p| p.id.as_str()), Some("over"));
}

#[test]
fn later_unplaced_pin_does_not_shadow() {
    let pins = store(vec![Pin::new("a", "A").at(0.1, 0.1), Pin::new("b", "B")]);
    let hit = find_pin_at(pt(100.0, 100.0), &pins, &viewport());
    assert_eq!(hit.map(|p| p.id.as_str()), Some("a"));
}

#[test]
fn hit_radius_is_screen_space_invariant() {
    let pins = store(vec![Pin::new("a", "A").at(0.5, 0.5)]);
    let offset = HIT_RADIUS_PX - 1.0;
    for factor in [0.2, 0.5, 1.0, 3.0, 8.0] {
        let mut vp = viewport();
        vp.zoom_at(pt(123.0, 456.0), factor);
        let center = pin_screen_position(pins.get(&crate::doc::PinId::new("a")).unwrap(), &vp).unwrap();
        assert!(find_pin_at(pt(center.x + offset, center.y), &pins, &vp).is_some(), "scale x{factor}");
        assert!(find_pin_at(pt(center.x + HIT_RADIUS_PX + 1.0, center.y), &pins, &vp).is_none(), "scale x{factor}");
    }
}

#[test]
fn hit_follows_pan() {
    let pins = store(vec![Pin::new("a", "A").at(0.5, 0.5)]);
    let mut vp = viewport();
    vp.pan_by(100.0, -50.0);
    assert!(find_pin_at(pt(600.0, 450.0), &pins, &vp).is_some());
    assert!(find_pin_at(pt(500.0, 500.0), &pins, &vp).is_none());
}

#[test]
fn two_pins_overlap_at_fixed_screen_point() {
    // Both centers sit within the radius of (100, 100); the later one wins.
    let pins = store(vec![
        Pin::new("first", "First").at(0.095, 0.1),
        Pin::new("second", "Second").at(0.105, 0.1),
    ]);
    let hit = find_pin_at(pt(100.0, 100.0), &pins, &viewport());
    assert_eq!(hit.map(|p| p.id.as_str()), Some("second"));
}

#![allow(clippy::float_cmp)]

use super::*;

fn from() -> Transform {
    Transform::new(0.0, 0.0, 1.0)
}

fn to() -> Transform {
    Transform::new(-200.0, 100.0, 3.0)
}

#[test]
fn ease_out_cubic_endpoints() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
}

#[test]
fn ease_out_cubic_front_loaded() {
    // Ease-out covers more than half the distance by the midpoint.
    assert!(ease_out_cubic(0.5) > 0.5);
}

#[test]
fn sample_at_start_is_from() {
    let tween = Tween::new(from(), to(), 1000.0, 300.0);
    let (t, done) = tween.sample(1000.0);
    assert_eq!(t, from());
    assert!(!done);
}

#[test]
fn sample_before_start_is_from() {
    let tween = Tween::new(from(), to(), 1000.0, 300.0);
    let (t, done) = tween.sample(900.0);
    assert_eq!(t, from());
    assert!(!done);
}

#[test]
fn sample_midway_is_between() {
    let tween = Tween::new(from(), to(), 0.0, 300.0);
    let (t, done) = tween.sample(150.0);
    assert!(!done);
    assert!(t.scale > 1.0 && t.scale < 3.0);
    assert!(t.offset_x < 0.0 && t.offset_x > -200.0);
    assert!(t.offset_y > 0.0 && t.offset_y < 100.0);
}

#[test]
fn sample_at_end_is_exact_target() {
    let tween = Tween::new(from(), to(), 0.0, 300.0);
    let (t, done) = tween.sample(300.0);
    assert_eq!(t, to());
    assert!(done);
}

#[test]
fn sample_after_end_is_exact_target() {
    let tween = Tween::new(from(), to(), 0.0, 300.0);
    let (t, done) = tween.sample(10_000.0);
    assert_eq!(t, to());
    assert!(done);
}

#[test]
fn zero_duration_finishes_immediately() {
    let tween = Tween::new(from(), to(), 0.0, 0.0);
    let (t, done) = tween.sample(0.0);
    assert_eq!(t, to());
    assert!(done);
}

#[test]
fn scale_is_monotonic_toward_target() {
    let tween = Tween::new(from(), to(), 0.0, 300.0);
    let mut last = from().scale;
    for ms in (0..=300).step_by(30) {
        let (t, _) = tween.sample(f64::from(ms));
        assert!(t.scale >= last);
        last = t.scale;
    }
}

#[test]
fn target_reports_destination() {
    let tween = Tween::new(from(), to(), 0.0, 300.0);
    assert_eq!(tween.target(), to());
}

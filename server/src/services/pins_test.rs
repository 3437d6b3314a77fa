#![allow(clippy::float_cmp)]

use super::*;
use crate::state::test_helpers::test_app_state;

fn record(id: &str, x: Option<f64>, y: Option<f64>) -> PinRecord {
    PinRecord {
        id: id.to_owned(),
        name: format!("Pin {id}"),
        category: Some("Landmark".into()),
        status: None,
        description: String::new(),
        tags: vec!["coast".into()],
        x,
        y,
    }
}

// =============================================================================
// validate_coords
// =============================================================================

#[test]
fn validate_accepts_unit_square_including_edges() {
    assert!(validate_coords(0.0, 0.0).is_ok());
    assert!(validate_coords(1.0, 1.0).is_ok());
    assert!(validate_coords(0.2, 0.8).is_ok());
}

#[test]
fn validate_rejects_out_of_range() {
    assert!(matches!(validate_coords(1.01, 0.5), Err(PinError::OutOfRange { .. })));
    assert!(matches!(validate_coords(0.5, -0.0001), Err(PinError::OutOfRange { .. })));
}

#[test]
fn validate_rejects_non_finite() {
    assert!(validate_coords(f64::NAN, 0.5).is_err());
    assert!(validate_coords(0.5, f64::INFINITY).is_err());
}

// =============================================================================
// PinRecord wire shape
// =============================================================================

#[test]
fn unplaced_record_serializes_null_coordinates() {
    let json = serde_json::to_value(record("a", None, None)).unwrap();
    assert_eq!(json["id"], "a");
    assert!(json["x"].is_null());
    assert!(json["y"].is_null());
    assert_eq!(json["tags"][0], "coast");
}

#[test]
fn placed_record_serializes_coordinates() {
    let json = serde_json::to_value(record("a", Some(0.25), Some(0.75))).unwrap();
    assert_eq!(json["x"], 0.25);
    assert_eq!(json["y"], 0.75);
    assert_eq!(json["category"], "Landmark");
}

// =============================================================================
// list_pins / place_pin without a database
// =============================================================================

#[tokio::test]
async fn list_pins_serves_cache_without_database() {
    let state = test_app_state();
    state.pin_cache.store(vec![record("a", None, None)], 0);

    let pins = list_pins(&state, false).await.unwrap();
    assert_eq!(pins.len(), 1);
    assert_eq!(pins[0].id, "a");
}

#[tokio::test]
async fn list_pins_bust_skips_cache() {
    let state = test_app_state();
    state.pin_cache.store(vec![record("a", None, None)], 0);

    let err = list_pins(&state, true).await.unwrap_err();
    assert!(matches!(err, PinError::Database(_)));
}

#[tokio::test]
async fn place_pin_validates_before_database() {
    let state = test_app_state();
    let err = place_pin(&state, "a", 2.0, 0.5).await.unwrap_err();
    assert!(matches!(err, PinError::OutOfRange { x, .. } if x == 2.0));
}

#[tokio::test]
async fn failed_place_keeps_cache() {
    let state = test_app_state();
    state.pin_cache.store(vec![record("a", None, None)], 0);

    assert!(place_pin(&state, "a", 0.5, 0.5).await.is_err());
    assert!(state.pin_cache.get().is_some());
}

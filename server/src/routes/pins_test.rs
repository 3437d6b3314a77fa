use super::*;

// =============================================================================
// pin_error_to_status
// =============================================================================

#[test]
fn not_found_maps_to_404() {
    assert_eq!(pin_error_to_status(&PinError::NotFound("p1".into())), StatusCode::NOT_FOUND);
}

#[test]
fn out_of_range_maps_to_400() {
    assert_eq!(pin_error_to_status(&PinError::OutOfRange { x: 1.5, y: 0.0 }), StatusCode::BAD_REQUEST);
}

#[test]
fn database_maps_to_500() {
    assert_eq!(pin_error_to_status(&PinError::Database(sqlx::Error::PoolTimedOut)), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// request shapes
// =============================================================================

#[test]
fn place_body_accepts_pin_id() {
    let body: PlaceBody = serde_json::from_str(r#"{"pin_id":"p1","x":0.2,"y":0.8}"#).unwrap();
    assert_eq!(body.pin_id, "p1");
}

#[test]
fn place_body_accepts_page_id_alias() {
    let body: PlaceBody = serde_json::from_str(r#"{"pageId":"p2","x":0,"y":1}"#).unwrap();
    assert_eq!(body.pin_id, "p2");
}

#[test]
fn place_body_requires_coordinates() {
    assert!(serde_json::from_str::<PlaceBody>(r#"{"pin_id":"p1","x":0.2}"#).is_err());
}

#[test]
fn refresh_flag_only_for_literal_true() {
    assert!(ListQuery { refresh: Some("true".into()) }.bust_cache());
    assert!(!ListQuery { refresh: Some("1".into()) }.bust_cache());
    assert!(!ListQuery { refresh: None }.bust_cache());
}

use super::*;

fn id(s: &str) -> PinId {
    PinId::new(s)
}

// =============================================================
// Button / Key
// =============================================================

#[test]
fn button_all_variants_distinct() {
    let variants = [Button::Primary, Button::Middle, Button::Secondary];
    for (i, a) in variants.iter().enumerate() {
        for (j, b) in variants.iter().enumerate() {
            if i == j {
                assert_eq!(a, b);
            } else {
                assert_ne!(a, b);
            }
        }
    }
}

#[test]
fn key_escape_detection() {
    assert!(Key("Escape".into()).is_escape());
    assert!(Key("Esc".into()).is_escape());
    assert!(!Key("Enter".into()).is_escape());
    assert!(!Key("escape".into()).is_escape());
}

// =============================================================
// InteractionMode
// =============================================================

#[test]
fn mode_default_is_idle() {
    assert_eq!(InteractionMode::default(), InteractionMode::Idle);
}

#[test]
fn mode_kind_matches_variant() {
    assert_eq!(InteractionMode::Idle.kind(), ModeKind::Idle);
    assert_eq!(InteractionMode::Hovering(id("a")).kind(), ModeKind::Hovering);
    assert_eq!(InteractionMode::Placing(id("a")).kind(), ModeKind::Placing);
    assert_eq!(
        InteractionMode::Dragging { id: id("a"), candidate: Point::new(0.5, 0.5), origin_screen: Point::new(0.0, 0.0) }.kind(),
        ModeKind::Dragging
    );
    assert_eq!(InteractionMode::Panning.kind(), ModeKind::Panning);
}

#[test]
fn mode_pin_id() {
    assert_eq!(InteractionMode::Hovering(id("h")).pin_id(), Some(&id("h")));
    assert_eq!(InteractionMode::Placing(id("p")).pin_id(), Some(&id("p")));
    assert_eq!(
        InteractionMode::Dragging { id: id("d"), candidate: Point::new(0.0, 0.0), origin_screen: Point::new(0.0, 0.0) }.pin_id(),
        Some(&id("d"))
    );
    assert_eq!(InteractionMode::Idle.pin_id(), None);
    assert_eq!(InteractionMode::Panning.pin_id(), None);
}

#[test]
fn mode_hovered_only_while_hovering() {
    assert_eq!(InteractionMode::Hovering(id("h")).hovered(), Some(&id("h")));
    assert_eq!(InteractionMode::Placing(id("p")).hovered(), None);
}

#[test]
fn placing_and_dragging_suppress_hover() {
    assert!(InteractionMode::Idle.tracks_hover());
    assert!(InteractionMode::Hovering(id("a")).tracks_hover());
    assert!(!InteractionMode::Placing(id("a")).tracks_hover());
    assert!(!InteractionMode::Dragging { id: id("a"), candidate: Point::new(0.1, 0.1), origin_screen: Point::new(0.0, 0.0) }.tracks_hover());
    assert!(!InteractionMode::Panning.tracks_hover());
}

// =============================================================
// Press
// =============================================================

#[test]
fn press_starts_with_last_at_origin() {
    let p = Press::new(Button::Primary, Point::new(10.0, 20.0), None);
    assert_eq!(p.last, p.origin);
    assert!(p.armed.is_none());
}

#[test]
fn press_displacement_is_from_origin() {
    let mut p = Press::new(Button::Primary, Point::new(0.0, 0.0), Some(id("a")));
    p.last = Point::new(100.0, 100.0);
    assert!((p.displacement(Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_state_default_no_selection_not_authorized() {
    let ui = UiState::default();
    assert!(ui.selected_id.is_none());
    assert!(!ui.authorized);
}

//! Hit-testing pins in screen space.
//!
//! The test runs on screen coordinates, so the tolerance around a pin stays
//! [`HIT_RADIUS_PX`] no matter how far the user has zoomed in or out.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Point, Viewport};
use crate::consts::HIT_RADIUS_PX;
use crate::doc::{Pin, PinStore};

/// Screen position of a placed pin's center, or `None` for unplaced pins or
/// before the image size is known.
#[must_use]
pub fn pin_screen_position(pin: &Pin, viewport: &Viewport) -> Option<Point> {
    viewport.normalized_to_screen(pin.position()?)
}

/// Topmost placed pin whose center lies within [`HIT_RADIUS_PX`] of `screen_pt`.
///
/// Ties go to the pin drawn last, so what the user sees on top is what they hit.
#[must_use]
pub fn find_pin_at<'a>(screen_pt: Point, pins: &'a PinStore, viewport: &Viewport) -> Option<&'a Pin> {
    pins.placed().rev().find(|pin| {
        pin_screen_position(pin, viewport).is_some_and(|center| center.distance(screen_pt) <= HIT_RADIUS_PX)
    })
}

//! Shared numeric constants for the viewer crate.

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed image-to-screen scale factor.
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed image-to-screen scale factor.
pub const MAX_SCALE: f64 = 10.0;

/// Zoom multiplier applied per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

/// Screen pixels of image that must stay inside the container when panning.
pub const PAN_MARGIN_PX: f64 = 48.0;

/// Zoom level for list-driven focus, relative to the fit scale.
pub const FOCUS_ZOOM_FACTOR: f64 = 1.5;

/// Duration of the list-driven focus animation.
pub const FOCUS_DURATION_MS: f64 = 300.0;

// ── Pins ────────────────────────────────────────────────────────

/// Resting pin radius in screen pixels.
pub const PIN_RADIUS_PX: f64 = 7.0;

/// Pin radius while hovered or selected, in screen pixels.
pub const PIN_RADIUS_HOVER_PX: f64 = 9.0;

/// Extra tolerance around the hovered pin disc.
pub const HIT_SLACK_PX: f64 = 4.0;

/// Screen-space hit radius around a pin center. Independent of zoom.
pub const HIT_RADIUS_PX: f64 = PIN_RADIUS_HOVER_PX + HIT_SLACK_PX;

/// Vertical distance from pin center to its label, in screen pixels.
pub const LABEL_OFFSET_PX: f64 = 16.0;

// ── Gestures ────────────────────────────────────────────────────

/// Pointer travel (screen pixels) that separates a click from a drag.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

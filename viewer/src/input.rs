//! Input model: pointer buttons, keys, wheel deltas, and the interaction mode.
//!
//! `InteractionMode` is the single source of truth for what the pointer is
//! doing. Placing and dragging are variants of one union, so they can never
//! be active together. Selection is not a mode; it lives in `UiState` and is
//! independent of hover.
//!
//! `Press` is the pointer-down record kept between pointer-down and
//! pointer-up. It carries the origin used for click-versus-drag
//! disambiguation and, when the press began on the selected pin, the armed
//! pin that a following move will start dragging.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::PinId;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button; always pans.
    Middle,
    /// Right mouse button; ignored by the map.
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape" || self.0 == "Esc"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down = zoom out).
    pub dy: f64,
}

/// What the pointer is currently doing on the map.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionMode {
    /// Nothing under the pointer, no gesture in progress.
    #[default]
    Idle,
    /// The pointer rests over a pin.
    Hovering(PinId),
    /// The next click on the map places this pin.
    Placing(PinId),
    /// The selected pin is being dragged to a new spot.
    Dragging {
        /// Pin being relocated.
        id: PinId,
        /// Normalized drop position, always inside the unit square.
        candidate: Point,
        /// Screen position where the gesture began.
        origin_screen: Point,
    },
    /// The map is being dragged.
    Panning,
}

/// Payload-free discriminant of [`InteractionMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Idle,
    Hovering,
    Placing,
    Dragging,
    Panning,
}

impl InteractionMode {
    #[must_use]
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Idle => ModeKind::Idle,
            Self::Hovering(_) => ModeKind::Hovering,
            Self::Placing(_) => ModeKind::Placing,
            Self::Dragging { .. } => ModeKind::Dragging,
            Self::Panning => ModeKind::Panning,
        }
    }

    /// The pin this mode refers to, if any.
    #[must_use]
    pub fn pin_id(&self) -> Option<&PinId> {
        match self {
            Self::Hovering(id) | Self::Placing(id) | Self::Dragging { id, .. } => Some(id),
            Self::Idle | Self::Panning => None,
        }
    }

    /// The hovered pin, only while hovering.
    #[must_use]
    pub fn hovered(&self) -> Option<&PinId> {
        match self {
            Self::Hovering(id) => Some(id),
            _ => None,
        }
    }

    /// Hover tracking runs only when no placement or drag is active.
    #[must_use]
    pub fn tracks_hover(&self) -> bool {
        matches!(self, Self::Idle | Self::Hovering(_))
    }
}

/// Pointer-down record, alive until the matching pointer-up or leave.
#[derive(Debug, Clone, PartialEq)]
pub struct Press {
    /// Button that started the gesture.
    pub button: Button,
    /// Screen position of the pointer-down.
    pub origin: Point,
    /// Screen position of the most recent pointer event in this gesture.
    pub last: Point,
    /// Selected pin under the pointer-down; a move will start dragging it.
    pub armed: Option<PinId>,
}

impl Press {
    #[must_use]
    pub fn new(button: Button, origin: Point, armed: Option<PinId>) -> Self {
        Self { button, origin, last: origin, armed }
    }

    /// Straight-line screen distance from the pointer-down to `pt`.
    #[must_use]
    pub fn displacement(&self, pt: Point) -> f64 {
        self.origin.distance(pt)
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The currently selected pin, if any.
    pub selected_id: Option<PinId>,
    /// Whether the caller may place or move pins.
    pub authorized: bool,
}

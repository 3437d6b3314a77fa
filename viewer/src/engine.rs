//! Engine: the interaction state machine and view controller.
//!
//! `EngineCore` owns the pin store, the viewport, and all interaction state.
//! Every input handler returns a list of [`Action`]s for the host to process:
//! repaint requests, cursor changes, selection notifications, and the
//! coordinate writes the host must persist.
//!
//! Coordinate writes are optimistic. The pin moves the moment a placement or
//! drag is committed; the host persists the move and reports back through
//! [`EngineCore::resolve_placement`], which either confirms (and selects) or
//! rolls the pin back.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Point, Size, Transform, Viewport};
use crate::consts::{DRAG_THRESHOLD_PX, FOCUS_DURATION_MS, FOCUS_ZOOM_FACTOR, WHEEL_ZOOM_STEP};
use crate::doc::{Coords, Pin, PinId, PinStore};
use crate::hit;
use crate::input::{Button, InteractionMode, Key, ModeKind, Press, UiState, WheelDelta};
use crate::persist::{PendingPlacements, Resolution};
use crate::render;

const CURSOR_GRAB: &str = "grab";
const CURSOR_GRABBING: &str = "grabbing";
const CURSOR_POINTER: &str = "pointer";
const CURSOR_CROSSHAIR: &str = "crosshair";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The pin under the pointer changed.
    HoverChanged(Option<PinId>),
    Selected(PinId),
    Deselected,
    ModeChanged(ModeKind),
    /// Normalized position under the pointer while placing; `None` once the
    /// pointer leaves the map.
    PlacementPreview { id: PinId, at: Option<Point> },
    PlacementCancelled { id: PinId },
    /// Persist `(x, y)` for `id`, then call [`EngineCore::resolve_placement`] with `seq`.
    PlacementCommitted { id: PinId, x: f64, y: f64, seq: u64 },
    DragUpdated { id: PinId, at: Point },
    /// Persist `(x, y)` for `id`, then call [`EngineCore::resolve_placement`] with `seq`.
    DragCommitted { id: PinId, x: f64, y: f64, seq: u64 },
    DragCancelled { id: PinId },
    /// A coordinate write was rejected and the pin was moved back.
    PlacementFailed { id: PinId, reason: String },
    ViewportChanged(Transform),
    SetCursor(String),
    RenderNeeded,
}

/// A placed pin as it should appear on screen this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPin<'a> {
    pub pin: &'a Pin,
    /// Screen position of the pin center.
    pub screen: Point,
    pub hovered: bool,
    pub selected: bool,
    /// Drawn at the drag candidate instead of its stored position.
    pub dragging: bool,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub pins: PinStore,
    pub viewport: Viewport,
    pub ui: UiState,
    pub mode: InteractionMode,
    pub press: Option<Press>,
    pub pending: PendingPlacements,
    /// Last known pointer position in screen space; `None` after leave.
    pub pointer: Option<Point>,
    /// Normalized position of the placement ghost.
    pub preview: Option<Point>,
    pub dpr: f64,
    cursor: &'static str,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            pins: PinStore::new(),
            viewport: Viewport::new(),
            ui: UiState::default(),
            mode: InteractionMode::Idle,
            press: None,
            pending: PendingPlacements::new(),
            pointer: None,
            preview: None,
            dpr: 1.0,
            cursor: CURSOR_GRAB,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Replace the pin set with a fresh list from the data source.
    ///
    /// Writes still awaiting a response are re-applied on top of the snapshot.
    /// Selection, hover, placement and drag state that refers to a pin that
    /// vanished is dropped.
    pub fn load_snapshot(&mut self, pins: Vec<Pin>) -> Vec<Action> {
        self.pins.load_snapshot(pins);

        let store = &self.pins;
        self.pending.retain_known(|id| store.contains(id));
        let reapply: Vec<(PinId, Point)> = self.pending.iter().map(|(id, p)| (id.clone(), p.candidate)).collect();
        for (id, candidate) in reapply {
            let confirmed = self.pins.get(&id).map_or_else(Coords::default, Pin::coords);
            self.pending.rebase(&id, confirmed);
            self.pins.set_position(&id, Some(candidate));
        }

        let mut actions = vec![Action::RenderNeeded];
        if self.ui.selected_id.as_ref().is_some_and(|id| !self.pins.contains(id)) {
            self.deselect(&mut actions);
        }
        if let Some(press) = self.press.as_mut() {
            if press.armed.as_ref().is_some_and(|id| !self.pins.contains(id)) {
                press.armed = None;
            }
        }
        if let Some(id) = self.mode.pin_id().filter(|id| !self.pins.contains(id)).cloned() {
            match self.mode.kind() {
                ModeKind::Placing => self.end_placement(id, &mut actions),
                ModeKind::Dragging => self.end_drag(id, &mut actions),
                _ => self.set_mode(InteractionMode::Idle, &mut actions),
            }
        }
        self.refresh_hover(&mut actions);
        self.finish(actions)
    }

    /// Grant or revoke write access. Revoking ends any placement or drag.
    pub fn set_authorized(&mut self, authorized: bool) -> Vec<Action> {
        self.ui.authorized = authorized;
        let mut actions = Vec::new();
        if !authorized {
            if let Some(press) = self.press.as_mut() {
                press.armed = None;
            }
            match self.mode.clone() {
                InteractionMode::Placing(id) => self.end_placement(id, &mut actions),
                InteractionMode::Dragging { id, .. } => self.end_drag(id, &mut actions),
                _ => {}
            }
        }
        self.finish(actions)
    }

    /// Report the outcome of persisting a committed placement or drag.
    ///
    /// Responses for writes that a newer write superseded are ignored. On
    /// success the pin becomes selected. On failure the pin returns to its last
    /// confirmed position and selection is left alone.
    pub fn resolve_placement(&mut self, id: &PinId, seq: u64, result: Result<(), String>) -> Vec<Action> {
        let Resolution::Current(pending) = self.pending.resolve(id, seq) else {
            debug!(%id, seq, "ignoring superseded placement response");
            return Vec::new();
        };

        let mut actions = Vec::new();
        match result {
            Ok(()) => {
                debug!(%id, seq, "placement confirmed");
                if self.pins.contains(id) {
                    self.select(id.clone(), &mut actions);
                }
            }
            Err(reason) => {
                warn!(%id, seq, %reason, "placement rejected; rolling back");
                self.pins.restore(id, pending.rollback);
                actions.push(Action::PlacementFailed { id: id.clone(), reason });
                self.refresh_hover(&mut actions);
            }
        }
        self.finish(actions)
    }

    // --- Placement / selection requests from the host UI ---

    /// Arm placement: the next click on the map places `id`.
    ///
    /// Requires write access and a known pin; refused while dragging. Clears
    /// the current selection.
    pub fn enter_placement(&mut self, id: &PinId) -> Vec<Action> {
        if !self.ui.authorized {
            debug!(%id, "placement refused: not authorized");
            return Vec::new();
        }
        if !self.pins.contains(id) || self.mode.kind() == ModeKind::Dragging {
            return Vec::new();
        }

        let mut actions = Vec::new();
        if let InteractionMode::Placing(previous) = self.mode.clone() {
            if &previous != id {
                actions.push(Action::PlacementCancelled { id: previous });
            }
        }
        self.deselect(&mut actions);
        self.set_mode(InteractionMode::Placing(id.clone()), &mut actions);
        self.preview = self.pointer.and_then(|pt| self.viewport.screen_to_normalized(pt));
        if self.preview.is_some() {
            actions.push(Action::PlacementPreview { id: id.clone(), at: self.preview });
        }
        self.finish(actions)
    }

    /// Leave placement mode without placing.
    pub fn cancel_placement(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let InteractionMode::Placing(id) = self.mode.clone() {
            self.end_placement(id, &mut actions);
        }
        self.finish(actions)
    }

    /// Select a pin from outside the map (e.g. a list) and animate the view to
    /// center it. Unplaced pins are selected without moving the view.
    pub fn select_from_list(&mut self, id: &PinId, now_ms: f64) -> Vec<Action> {
        let Some(position) = self.pins.get(id).map(Pin::position) else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        if let InteractionMode::Placing(placing) = self.mode.clone() {
            self.end_placement(placing, &mut actions);
        }
        self.select(id.clone(), &mut actions);
        if let Some(position) = position {
            self.focus(position, now_ms);
        }
        self.finish(actions)
    }

    // --- Viewport ---

    /// Update the container size (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.dpr = dpr;
        let mut actions = vec![Action::RenderNeeded];
        if self.viewport.set_container(Size::new(width_css, height_css)) {
            actions.push(Action::ViewportChanged(self.viewport.transform()));
        }
        self.finish(actions)
    }

    /// Record the natural size of the map image once it has loaded.
    pub fn set_image_size(&mut self, width: f64, height: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.viewport.set_image(Size::new(width, height)) {
            actions.push(Action::ViewportChanged(self.viewport.transform()));
        }
        self.finish(actions)
    }

    /// Advance the focus animation. Call once per animation frame while
    /// [`EngineCore::is_animating`] holds.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.viewport.tick(now_ms) {
            actions.push(Action::ViewportChanged(self.viewport.transform()));
            self.refresh_hover(&mut actions);
        }
        self.finish(actions)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.pointer = Some(screen_pt);
        if !self.viewport.is_ready() || button == Button::Secondary || self.press.is_some() {
            return Vec::new();
        }

        // Only an already-selected pin can be picked up.
        let armed = if button == Button::Primary
            && self.ui.authorized
            && !matches!(self.mode, InteractionMode::Placing(_))
        {
            hit::find_pin_at(screen_pt, &self.pins, &self.viewport)
                .map(|pin| pin.id.clone())
                .filter(|id| self.ui.selected_id.as_ref() == Some(id))
        } else {
            None
        };
        self.press = Some(Press::new(button, screen_pt, armed));
        Vec::new()
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.pointer = Some(screen_pt);
        if !self.viewport.is_ready() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        match self.press.clone() {
            Some(press) => self.continue_press(&press, screen_pt, &mut actions),
            None => self.refresh_hover(&mut actions),
        }
        if let Some(press) = self.press.as_mut() {
            press.last = screen_pt;
        }

        if let InteractionMode::Placing(id) = &self.mode {
            let at = self.viewport.screen_to_normalized(screen_pt);
            if at != self.preview {
                self.preview = at;
                actions.push(Action::PlacementPreview { id: id.clone(), at });
            }
        }
        self.finish(actions)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.pointer = Some(screen_pt);
        let Some(press) = self.press.take_if(|p| p.button == button) else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        let is_click = button == Button::Primary && press.displacement(screen_pt) <= DRAG_THRESHOLD_PX;
        match self.mode.clone() {
            InteractionMode::Dragging { id, candidate, origin_screen } => {
                let candidate = self.viewport.screen_to_normalized(screen_pt).map_or(candidate, Point::clamp_unit);
                self.set_mode(InteractionMode::Idle, &mut actions);
                if origin_screen.distance(screen_pt) > DRAG_THRESHOLD_PX {
                    let seq = self.commit_move(&id, candidate);
                    actions.push(Action::DragCommitted { id, x: candidate.x, y: candidate.y, seq });
                } else {
                    actions.push(Action::DragCancelled { id });
                }
            }
            InteractionMode::Placing(id) => {
                if is_click {
                    self.place_at(id, screen_pt, &mut actions);
                }
            }
            InteractionMode::Panning => {
                self.set_mode(InteractionMode::Idle, &mut actions);
                if is_click {
                    self.click(screen_pt, &mut actions);
                }
            }
            InteractionMode::Idle | InteractionMode::Hovering(_) => {
                if is_click {
                    self.click(screen_pt, &mut actions);
                }
            }
        }
        self.refresh_hover(&mut actions);
        self.finish(actions)
    }

    /// The pointer left the map surface: abandon any gesture in progress.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.pointer = None;
        self.press = None;

        let mut actions = Vec::new();
        match self.mode.clone() {
            InteractionMode::Dragging { id, .. } => self.end_drag(id, &mut actions),
            InteractionMode::Placing(id) => {
                if self.preview.take().is_some() {
                    actions.push(Action::PlacementPreview { id, at: None });
                }
            }
            InteractionMode::Panning | InteractionMode::Hovering(_) => {
                self.set_mode(InteractionMode::Idle, &mut actions);
            }
            InteractionMode::Idle => {}
        }
        self.finish(actions)
    }

    /// Wheel up zooms in, wheel down zooms out, anchored at the pointer.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        self.pointer = Some(screen_pt);
        let factor = if delta.dy < 0.0 {
            WHEEL_ZOOM_STEP
        } else if delta.dy > 0.0 {
            1.0 / WHEEL_ZOOM_STEP
        } else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        if self.viewport.zoom_at(screen_pt, factor) {
            actions.push(Action::ViewportChanged(self.viewport.transform()));
            self.refresh_hover(&mut actions);
        }
        self.finish(actions)
    }

    /// Escape cancels placement, else an active drag, else the selection.
    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        if !key.is_escape() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        match self.mode.clone() {
            InteractionMode::Placing(id) => self.end_placement(id, &mut actions),
            InteractionMode::Dragging { id, .. } => self.end_drag(id, &mut actions),
            _ => self.deselect(&mut actions),
        }
        self.finish(actions)
    }

    // --- Queries ---

    /// The currently selected pin, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&PinId> {
        self.ui.selected_id.as_ref()
    }

    #[must_use]
    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Look up a pin by ID.
    #[must_use]
    pub fn pin(&self, id: &PinId) -> Option<&Pin> {
        self.pins.get(id)
    }

    /// Whether a coordinate write for `id` is awaiting a response.
    #[must_use]
    pub fn is_pending(&self, id: &PinId) -> bool {
        self.pending.get(id).is_some()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.viewport.is_animating()
    }

    #[must_use]
    pub fn zoom_percent(&self) -> i64 {
        self.viewport.zoom_percent()
    }

    /// CSS cursor for the current mode.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        cursor_for(&self.mode)
    }

    /// Screen position of the placement ghost, while placing over the map.
    #[must_use]
    pub fn placement_preview_screen(&self) -> Option<Point> {
        if self.mode.kind() != ModeKind::Placing {
            return None;
        }
        self.viewport.normalized_to_screen(self.preview?)
    }

    /// Screen positions for every visible pin in draw order. The dragged pin
    /// appears at its drag candidate.
    #[must_use]
    pub fn overlay(&self) -> Vec<OverlayPin<'_>> {
        if !self.viewport.is_ready() {
            return Vec::new();
        }
        let dragged = match &self.mode {
            InteractionMode::Dragging { id, candidate, .. } => Some((id, *candidate)),
            _ => None,
        };
        let hovered = self.mode.hovered();
        let selected = self.ui.selected_id.as_ref();

        self.pins
            .iter()
            .filter_map(|pin| {
                let drag_pos = dragged.filter(|(id, _)| *id == &pin.id).map(|(_, c)| c);
                let normalized = drag_pos.or_else(|| pin.position())?;
                let screen = self.viewport.normalized_to_screen(normalized)?;
                Some(OverlayPin {
                    pin,
                    screen,
                    hovered: hovered == Some(&pin.id),
                    selected: selected == Some(&pin.id),
                    dragging: drag_pos.is_some(),
                })
            })
            .collect()
    }

    // --- Internals ---

    fn continue_press(&mut self, press: &Press, screen_pt: Point, actions: &mut Vec<Action>) {
        if let Some(id) = press.armed.clone() {
            // The armed pin must still be the selection, and placement wins over dragging.
            let still_armed = self.ui.selected_id.as_ref() == Some(&id) && self.mode.kind() != ModeKind::Placing;
            if still_armed {
                let Some(candidate) = self.viewport.screen_to_normalized(screen_pt).map(Point::clamp_unit) else {
                    return;
                };
                let next = InteractionMode::Dragging { id: id.clone(), candidate, origin_screen: press.origin };
                self.set_mode(next, actions);
                actions.push(Action::DragUpdated { id, at: candidate });
                return;
            }
            if self.mode.kind() == ModeKind::Dragging {
                self.end_drag(id, actions);
                return;
            }
            if let Some(current) = self.press.as_mut() {
                current.armed = None;
            }
        }

        if self.viewport.pan_by(screen_pt.x - press.last.x, screen_pt.y - press.last.y) {
            actions.push(Action::ViewportChanged(self.viewport.transform()));
        }
        // Placing survives a pan so the user can reposition before clicking.
        if self.mode.kind() != ModeKind::Placing {
            self.set_mode(InteractionMode::Panning, actions);
        }
    }

    fn click(&mut self, screen_pt: Point, actions: &mut Vec<Action>) {
        match hit::find_pin_at(screen_pt, &self.pins, &self.viewport).map(|pin| pin.id.clone()) {
            Some(id) => self.select(id, actions),
            None => self.deselect(actions),
        }
    }

    fn place_at(&mut self, id: PinId, screen_pt: Point, actions: &mut Vec<Action>) {
        let Some(at) = self.viewport.screen_to_normalized(screen_pt).filter(|p| p.in_unit_square()) else {
            debug!(%id, "placement click outside the map ignored");
            return;
        };
        self.preview = None;
        self.set_mode(InteractionMode::Idle, actions);
        let seq = self.commit_move(&id, at);
        actions.push(Action::PlacementCommitted { id, x: at.x, y: at.y, seq });
    }

    fn commit_move(&mut self, id: &PinId, at: Point) -> u64 {
        let confirmed = self.pins.set_position(id, Some(at)).unwrap_or_default();
        let seq = self.pending.begin(id, at, confirmed);
        debug!(%id, x = at.x, y = at.y, seq, "optimistic move applied");
        seq
    }

    fn end_placement(&mut self, id: PinId, actions: &mut Vec<Action>) {
        self.preview = None;
        self.set_mode(InteractionMode::Idle, actions);
        actions.push(Action::PlacementCancelled { id });
        self.refresh_hover(actions);
    }

    fn end_drag(&mut self, id: PinId, actions: &mut Vec<Action>) {
        self.press = None;
        self.set_mode(InteractionMode::Idle, actions);
        actions.push(Action::DragCancelled { id });
    }

    fn focus(&mut self, position: Point, now_ms: f64) {
        let Some(image) = self.viewport.image() else {
            return;
        };
        let scale = self.viewport.scale().max(self.viewport.fit_scale() * FOCUS_ZOOM_FACTOR);
        let center = Point::new(position.x * image.width, position.y * image.height);
        let target = self.viewport.centered_on(center, scale);
        self.viewport.set_transform(target, FOCUS_DURATION_MS, now_ms);
    }

    fn select(&mut self, id: PinId, actions: &mut Vec<Action>) {
        if self.ui.selected_id.as_ref() != Some(&id) {
            self.ui.selected_id = Some(id.clone());
            actions.push(Action::Selected(id));
        }
    }

    fn deselect(&mut self, actions: &mut Vec<Action>) {
        if self.ui.selected_id.take().is_some() {
            actions.push(Action::Deselected);
        }
    }

    /// Re-run the hover test at the last pointer position. Only applies while
    /// idle or hovering with no button held.
    fn refresh_hover(&mut self, actions: &mut Vec<Action>) {
        if !self.mode.tracks_hover() || self.press.is_some() || !self.viewport.is_ready() {
            return;
        }
        let next = self
            .pointer
            .and_then(|pt| hit::find_pin_at(pt, &self.pins, &self.viewport))
            .map_or(InteractionMode::Idle, |pin| InteractionMode::Hovering(pin.id.clone()));
        self.set_mode(next, actions);
    }

    fn set_mode(&mut self, next: InteractionMode, actions: &mut Vec<Action>) {
        if next == self.mode {
            return;
        }
        let prev = std::mem::replace(&mut self.mode, next);
        if prev.hovered() != self.mode.hovered() {
            actions.push(Action::HoverChanged(self.mode.hovered().cloned()));
        }
        if prev.kind() != self.mode.kind() {
            debug!(from = ?prev.kind(), to = ?self.mode.kind(), "interaction mode changed");
            actions.push(Action::ModeChanged(self.mode.kind()));
        }
    }

    /// Append a cursor update if the mode changed it, and a single repaint
    /// request if anything visible happened.
    fn finish(&mut self, mut actions: Vec<Action>) -> Vec<Action> {
        let needs_render = actions.iter().any(|a| !matches!(a, Action::SetCursor(_)));
        actions.retain(|a| !matches!(a, Action::RenderNeeded));

        let cursor = cursor_for(&self.mode);
        if cursor != self.cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor.to_owned()));
        }
        if needs_render {
            actions.push(Action::RenderNeeded);
        }
        actions
    }
}

fn cursor_for(mode: &InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Placing(_) => CURSOR_CROSSHAIR,
        InteractionMode::Hovering(_) => CURSOR_POINTER,
        InteractionMode::Dragging { .. } | InteractionMode::Panning => CURSOR_GRABBING,
        InteractionMode::Idle => CURSOR_GRAB,
    }
}

/// The full map engine. Wraps `EngineCore` and owns the overlay canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Delegated data inputs ---

    pub fn load_snapshot(&mut self, pins: Vec<Pin>) -> Vec<Action> {
        self.core.load_snapshot(pins)
    }

    pub fn set_authorized(&mut self, authorized: bool) -> Vec<Action> {
        self.core.set_authorized(authorized)
    }

    pub fn resolve_placement(&mut self, id: &PinId, seq: u64, result: Result<(), String>) -> Vec<Action> {
        self.core.resolve_placement(id, seq, result)
    }

    pub fn enter_placement(&mut self, id: &PinId) -> Vec<Action> {
        self.core.enter_placement(id)
    }

    pub fn cancel_placement(&mut self) -> Vec<Action> {
        self.core.cancel_placement()
    }

    pub fn select_from_list(&mut self, id: &PinId, now_ms: f64) -> Vec<Action> {
        self.core.select_from_list(id, now_ms)
    }

    // --- Viewport ---

    /// Update viewport dimensions and resize the canvas backing store to match.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.canvas.set_width((width_css * dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * dpr).round().max(0.0) as u32);
        self.core.set_viewport(width_css, height_css, dpr)
    }

    pub fn set_image_size(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.core.set_image_size(width, height)
    }

    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        self.core.tick(now_ms)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta)
    }

    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        self.core.on_key_down(key)
    }

    // --- Render ---

    /// Draw the pin overlay to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        render::draw(&ctx, &self.core)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<&PinId> {
        self.core.selection()
    }

    #[must_use]
    pub fn mode(&self) -> &InteractionMode {
        self.core.mode()
    }

    #[must_use]
    pub fn pin(&self, id: &PinId) -> Option<&Pin> {
        self.core.pin(id)
    }

    #[must_use]
    pub fn zoom_percent(&self) -> i64 {
        self.core.zoom_percent()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.core.is_animating()
    }
}

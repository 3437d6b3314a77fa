//! Rendering: draws the pin overlay to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! The map image itself is drawn by the host underneath the canvas using the
//! transform from [`crate::engine::Action::ViewportChanged`]; this overlay
//! only draws pins, their labels, and the placement ghost. It reads engine
//! state and never mutates it.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Point;
use crate::consts::{LABEL_OFFSET_PX, PIN_RADIUS_HOVER_PX, PIN_RADIUS_PX};
use crate::engine::{EngineCore, OverlayPin};

/// Fill used for pins with no or an unknown category.
pub const FALLBACK_COLOR: &str = "#8B8178";

const OUTLINE_COLOR: &str = "#FFFFFF";
const SELECTED_RING_COLOR: &str = "#FFD166";
const LABEL_TEXT_COLOR: &str = "#F4F1EA";
const LABEL_BG_COLOR: &str = "rgba(20, 18, 16, 0.85)";
const LABEL_FONT: &str = "600 13px sans-serif";
const LABEL_PAD_PX: f64 = 6.0;
const LABEL_HEIGHT_PX: f64 = 20.0;
const GHOST_ALPHA: f64 = 0.55;

/// Pin fill color for a category.
#[must_use]
pub fn category_color(category: Option<&str>) -> &'static str {
    match category {
        Some("Business") => "#5B9BD5",
        Some("Landmark") => "#F5A855",
        Some("Venue") => "#E85D5D",
        Some("Cultural") => "#9B72CF",
        Some("Infrastructure") => "#8B8178",
        Some("Residential") => "#6BBF6B",
        Some("Shop / Market") => "#E88BC4",
        Some("Nature") => "#7CB87C",
        _ => FALLBACK_COLOR,
    }
}

/// Disc radius for a pin: enlarged while hovered, selected or dragged.
#[must_use]
pub fn pin_radius(pin: &OverlayPin<'_>) -> f64 {
    if pin.hovered || pin.selected || pin.dragging { PIN_RADIUS_HOVER_PX } else { PIN_RADIUS_PX }
}

/// Whether a pin shows its name label.
#[must_use]
pub fn shows_label(pin: &OverlayPin<'_>) -> bool {
    pin.hovered || pin.selected || pin.dragging
}

/// Draw the full overlay: pins in draw order, labels on top, then the ghost.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let container = core.viewport.container();

    // Layer 1: clear in CSS pixel units.
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, container.width, container.height);

    // Layer 2: pin discs, bottom first.
    let overlay = core.overlay();
    for pin in &overlay {
        draw_pin(ctx, pin)?;
    }

    // Layer 3: labels above every disc.
    for pin in overlay.iter().filter(|p| shows_label(p)) {
        draw_label(ctx, &pin.pin.name, pin.screen)?;
    }

    // Layer 4: placement ghost.
    if let (Some(at), Some(screen)) = (core.preview, core.placement_preview_screen()) {
        if at.in_unit_square() {
            let color = core
                .mode
                .pin_id()
                .and_then(|id| core.pins.get(id))
                .map_or(FALLBACK_COLOR, |pin| category_color(pin.category.as_deref()));
            draw_ghost(ctx, screen, color)?;
        }
    }

    Ok(())
}

fn draw_pin(ctx: &CanvasRenderingContext2d, pin: &OverlayPin<'_>) -> Result<(), JsValue> {
    let radius = pin_radius(pin);
    ctx.begin_path();
    ctx.arc(pin.screen.x, pin.screen.y, radius, 0.0, TAU)?;
    ctx.set_fill_style_str(category_color(pin.pin.category.as_deref()));
    ctx.fill();
    ctx.set_line_width(2.0);
    ctx.set_stroke_style_str(OUTLINE_COLOR);
    ctx.stroke();

    if pin.selected {
        ctx.begin_path();
        ctx.arc(pin.screen.x, pin.screen.y, radius + 4.0, 0.0, TAU)?;
        ctx.set_line_width(2.0);
        ctx.set_stroke_style_str(SELECTED_RING_COLOR);
        ctx.stroke();
    }
    Ok(())
}

fn draw_label(ctx: &CanvasRenderingContext2d, name: &str, center: Point) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_font(LABEL_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    let width = ctx.measure_text(name)?.width() + LABEL_PAD_PX * 2.0;
    let y = center.y - LABEL_OFFSET_PX - LABEL_HEIGHT_PX / 2.0;
    ctx.set_fill_style_str(LABEL_BG_COLOR);
    ctx.fill_rect(center.x - width / 2.0, y - LABEL_HEIGHT_PX / 2.0, width, LABEL_HEIGHT_PX);
    ctx.set_fill_style_str(LABEL_TEXT_COLOR);
    ctx.fill_text(name, center.x, y)?;

    ctx.restore();
    Ok(())
}

fn draw_ghost(ctx: &CanvasRenderingContext2d, center: Point, color: &str) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_global_alpha(GHOST_ALPHA);
    ctx.begin_path();
    ctx.arc(center.x, center.y, PIN_RADIUS_HOVER_PX, 0.0, TAU)?;
    ctx.set_fill_style_str(color);
    ctx.fill();
    ctx.set_line_width(2.0);
    ctx.set_stroke_style_str(OUTLINE_COLOR);
    ctx.stroke();
    ctx.restore();
    Ok(())
}

//! Affine viewport: the pan/zoom transform between image and screen space.
//!
//! Image space is measured in native map-image pixels; screen space is CSS
//! pixels relative to the map container's top-left corner. The mapping is
//! `screen = image * scale + offset` on both axes.
//!
//! Every mutating operation reports whether the visible transform changed and
//! is a no-op until the viewport is ready (image loaded, container sized).

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::Serialize;

use crate::animate::Tween;
use crate::consts::{MAX_SCALE, MIN_SCALE, PAN_MARGIN_PX};

/// A point in either screen, image, or normalized space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both coordinates lie in the unit square `[0,1]×[0,1]`.
    #[must_use]
    pub fn in_unit_square(self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    /// Clamp both coordinates into the unit square.
    #[must_use]
    pub fn clamp_unit(self) -> Self {
        Self { x: self.x.clamp(0.0, 1.0), y: self.y.clamp(0.0, 1.0) }
    }
}

/// Width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative, or not a number.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Pan offset plus scale: `screen = image * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self { offset_x: 0.0, offset_y: 0.0, scale: 1.0 }
    }
}

impl Transform {
    #[must_use]
    pub fn new(offset_x: f64, offset_y: f64, scale: f64) -> Self {
        Self { offset_x, offset_y, scale }
    }

    /// Map an image-space point to screen space.
    #[must_use]
    pub fn apply(&self, image: Point) -> Point {
        Point { x: image.x * self.scale + self.offset_x, y: image.y * self.scale + self.offset_y }
    }

    /// Map a screen-space point back to image space.
    #[must_use]
    pub fn invert(&self, screen: Point) -> Point {
        Point { x: (screen.x - self.offset_x) / self.scale, y: (screen.y - self.offset_y) / self.scale }
    }
}

/// How far the image may be panned away from the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanPolicy {
    /// No limit; the image may leave the container entirely.
    Free,
    /// At least `margin_px` screen pixels of the image stay inside the container on each axis.
    KeepVisible { margin_px: f64 },
}

impl Default for PanPolicy {
    fn default() -> Self {
        Self::KeepVisible { margin_px: PAN_MARGIN_PX }
    }
}

/// Viewport state for pan/zoom over the map image.
#[derive(Debug, Clone)]
pub struct Viewport {
    transform: Transform,
    min_scale: f64,
    max_scale: f64,
    fit_scale: f64,
    container: Size,
    image: Option<Size>,
    pan_policy: PanPolicy,
    animation: Option<Tween>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            fit_scale: 1.0,
            container: Size::default(),
            image: None,
            pan_policy: PanPolicy::default(),
            animation: None,
        }
    }
}

impl Viewport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the scale bounds. `min` and `max` are swapped if given out of order.
    #[must_use]
    pub fn with_scale_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_scale = min.min(max);
        self.max_scale = min.max(max);
        self.transform.scale = self.clamp_scale(self.transform.scale);
        self
    }

    #[must_use]
    pub fn with_pan_policy(mut self, policy: PanPolicy) -> Self {
        self.pan_policy = policy;
        self
    }

    // --- Queries ---

    /// The image has loaded and the container has a height.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.image.is_some() && self.container.height > 0.0
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Scale chosen by the last [`Viewport::fit`].
    #[must_use]
    pub fn fit_scale(&self) -> f64 {
        self.fit_scale
    }

    #[must_use]
    pub fn container(&self) -> Size {
        self.container
    }

    #[must_use]
    pub fn image(&self) -> Option<Size> {
        self.image
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Current zoom rounded to a whole percentage, for the zoom indicator.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn zoom_percent(&self) -> i64 {
        (self.transform.scale * 100.0).round() as i64
    }

    // --- Conversions ---

    /// Convert an image-space point (map pixels) to screen coordinates.
    #[must_use]
    pub fn image_to_screen(&self, image: Point) -> Point {
        self.transform.apply(image)
    }

    /// Convert a screen-space point to image coordinates (map pixels).
    #[must_use]
    pub fn screen_to_image(&self, screen: Point) -> Point {
        self.transform.invert(screen)
    }

    /// Convert a normalized `[0,1]` map position to screen coordinates.
    /// `None` until the image size is known.
    #[must_use]
    pub fn normalized_to_screen(&self, normalized: Point) -> Option<Point> {
        let image = self.image?;
        Some(self.image_to_screen(Point::new(normalized.x * image.width, normalized.y * image.height)))
    }

    /// Convert a screen point to a normalized map position. The result may lie
    /// outside `[0,1]` when the point is off the image.
    #[must_use]
    pub fn screen_to_normalized(&self, screen: Point) -> Option<Point> {
        let image = self.image?;
        let p = self.screen_to_image(screen);
        Some(Point::new(p.x / image.width, p.y / image.height))
    }

    /// Transform that places `image_pt` at the container center at `scale`.
    #[must_use]
    pub fn centered_on(&self, image_pt: Point, scale: f64) -> Transform {
        let scale = self.clamp_scale(scale);
        Transform {
            offset_x: self.container.width / 2.0 - image_pt.x * scale,
            offset_y: self.container.height / 2.0 - image_pt.y * scale,
            scale,
        }
    }

    // --- Sizing ---

    /// Record the container size, refitting when the viewport is ready.
    pub fn set_container(&mut self, size: Size) -> bool {
        self.container = size;
        self.fit()
    }

    /// Record the natural size of the loaded map image, fitting when ready.
    /// Empty sizes are ignored.
    pub fn set_image(&mut self, size: Size) -> bool {
        if size.is_empty() {
            return false;
        }
        self.image = Some(size);
        self.fit()
    }

    /// Fit the image height to the container, centered horizontally, top-aligned.
    pub fn fit(&mut self) -> bool {
        let Some(image) = self.image.filter(|_| self.is_ready()) else {
            return false;
        };
        self.animation = None;
        let scale = self.clamp_scale(self.container.height / image.height);
        self.fit_scale = scale;
        self.replace(Transform {
            offset_x: (self.container.width - image.width * scale) / 2.0,
            offset_y: 0.0,
            scale,
        })
    }

    // --- Gestures ---

    /// Multiply the scale by `factor` (clamped to bounds), keeping the image
    /// point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) -> bool {
        if !self.is_ready() || !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        self.animation = None;
        let scale = self.clamp_scale(self.transform.scale * factor);
        if (scale - self.transform.scale).abs() < f64::EPSILON {
            return false;
        }
        let anchor = self.screen_to_image(screen);
        self.replace(Transform {
            offset_x: screen.x - anchor.x * scale,
            offset_y: screen.y - anchor.y * scale,
            scale,
        })
    }

    /// Translate the view by a screen-space delta, subject to the pan policy.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.animation = None;
        let (offset_x, offset_y) =
            self.clamp_offset(self.transform.offset_x + dx, self.transform.offset_y + dy, self.transform.scale);
        self.replace(Transform { offset_x, offset_y, scale: self.transform.scale })
    }

    // --- Animation ---

    /// Move to `target` over `duration_ms`, starting at `now_ms`. Supersedes any
    /// animation in flight. A non-positive duration applies immediately.
    pub fn set_transform(&mut self, target: Transform, duration_ms: f64, now_ms: f64) -> bool {
        if !self.is_ready() {
            return false;
        }
        let target = Transform { scale: self.clamp_scale(target.scale), ..target };
        if duration_ms <= 0.0 {
            self.animation = None;
            return self.replace(target);
        }
        self.animation = Some(Tween::new(self.transform, target, now_ms, duration_ms));
        false
    }

    /// Advance the in-flight animation to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(tween) = self.animation else {
            return false;
        };
        let (next, finished) = tween.sample(now_ms);
        if finished {
            self.animation = None;
        }
        self.replace(next)
    }

    pub fn cancel_animation(&mut self) {
        self.animation = None;
    }

    // --- Internals ---

    fn replace(&mut self, next: Transform) -> bool {
        let changed = next != self.transform;
        self.transform = next;
        changed
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    fn clamp_offset(&self, x: f64, y: f64, scale: f64) -> (f64, f64) {
        let (PanPolicy::KeepVisible { margin_px }, Some(image)) = (self.pan_policy, self.image) else {
            return (x, y);
        };
        let x = clamp_axis(x, margin_px - image.width * scale, self.container.width - margin_px);
        let y = clamp_axis(y, margin_px - image.height * scale, self.container.height - margin_px);
        (x, y)
    }
}

/// Clamp into `[lo, hi]`; when the range is inverted, settle on its midpoint.
fn clamp_axis(v: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi { (lo + hi) / 2.0 } else { v.clamp(lo, hi) }
}

//! Eased tweening between two viewport transforms.

#[cfg(test)]
#[path = "animate_test.rs"]
mod animate_test;

use crate::camera::Transform;

/// A transform animation from `from` to `to`, timed against host clock milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: Transform,
    to: Transform,
    start_ms: f64,
    duration_ms: f64,
}

impl Tween {
    #[must_use]
    pub fn new(from: Transform, to: Transform, start_ms: f64, duration_ms: f64) -> Self {
        Self { from, to, start_ms, duration_ms }
    }

    #[must_use]
    pub fn target(&self) -> Transform {
        self.to
    }

    /// Interpolated transform at `now_ms`, and whether the tween has finished.
    /// The finishing sample is exactly `to`.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> (Transform, bool) {
        if self.duration_ms <= 0.0 {
            return (self.to, true);
        }
        let t = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        if t >= 1.0 {
            return (self.to, true);
        }
        let e = ease_out_cubic(t);
        let lerp = |a: f64, b: f64| a + (b - a) * e;
        let frame = Transform {
            offset_x: lerp(self.from.offset_x, self.to.offset_x),
            offset_y: lerp(self.from.offset_y, self.to.offset_y),
            scale: lerp(self.from.scale, self.to.scale),
        };
        (frame, false)
    }
}

/// Cubic ease-out on `t ∈ [0,1]`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

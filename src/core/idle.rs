//! Idle "float" of the character artwork.
//!
//! Independent of scrolling: every image drifts up and back down forever,
//! each one starting a little later than the previous so the row never
//! bobs in lockstep.  Only the drawn image moves; slide placement is
//! untouched.

/// Standard CSS `ease-in-out` control points.
const EASE_IN_OUT: (f64, f64, f64, f64) = (0.42, 0.0, 0.58, 1.0);

/// Looping vertical drift parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatBob {
    /// Peak upward drift in pixels.
    pub amplitude_px: f64,
    /// Seconds for one full up-and-down cycle.
    pub period_s: f64,
    /// Extra start delay per item index, in seconds.
    pub stagger_s: f64,
}

impl Default for FloatBob {
    fn default() -> Self {
        Self {
            amplitude_px: 15.0,
            period_s: 4.0,
            stagger_s: 0.2,
        }
    }
}

impl FloatBob {
    /// Vertical offset (px, negative = up) of item `index` after `elapsed_s`.
    pub fn offset_px(&self, elapsed_s: f64, index: usize) -> f64 {
        let local = elapsed_s - index as f64 * self.stagger_s;
        if !local.is_finite() || local <= 0.0 || self.period_s <= 0.0 {
            return 0.0;
        }
        let phase = (local % self.period_s) / self.period_s;
        // Two eased segments: 0 → peak over the first half, back over the second.
        let lift = if phase < 0.5 {
            ease_in_out(phase * 2.0)
        } else {
            1.0 - ease_in_out((phase - 0.5) * 2.0)
        };
        -self.amplitude_px * lift
    }
}

/// Evaluate the `ease-in-out` cubic Bézier at progress `t ∈ [0, 1]`.
pub fn ease_in_out(t: f64) -> f64 {
    cubic_bezier(EASE_IN_OUT, t)
}

/// Solve x(s) = t for the curve parameter by bisection, then return y(s).
fn cubic_bezier((x1, y1, x2, y2): (f64, f64, f64, f64), t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let bez = |a: f64, b: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..40 {
        let mid = (lo + hi) * 0.5;
        if bez(x1, x2, mid) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bez(y1, y2, (lo + hi) * 0.5)
}

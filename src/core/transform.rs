//! Per-item visual state as a pure function of modular distance.
//!
//! Nothing here looks at time, item identity or any other state: feed the
//! same distance, get the same numbers.  The renderer owns units: `vw` is a
//! percentage of the stage width, `px` assumes a 16px terminal row.

// ───────────────────────────────────────── curve constants ───

/// Horizontal spacing between neighbouring slides, in viewport-width percent.
pub const SLIDE_SPACING_VW: f64 = 30.0;
/// Scale of the centred slide.
pub const CENTER_SCALE: f64 = 1.75;
/// Scale lost per unit of distance.
pub const SCALE_FALLOFF: f64 = 1.25;
/// Distant slides never shrink below this.
pub const MIN_SCALE: f64 = 0.4;
/// How far off-centre slides float upward (px, saturates at distance 1).
pub const LIFT_PX: f64 = 120.0;
/// Slides further than this from centre are blurred.
pub const BLUR_THRESHOLD: f64 = 0.5;
/// Blur radius applied past [`BLUR_THRESHOLD`] (px).
pub const BLUR_PX: f64 = 4.0;
/// Opacity lost per unit of distance.
pub const OPACITY_FALLOFF: f64 = 0.2;
/// Stack order of the centred slide.
pub const TOP_Z: f64 = 100.0;
/// Stack order lost per unit of distance.
pub const Z_FALLOFF: f64 = 10.0;
/// Maximum downward drift of a fading caption (px).
pub const CAPTION_DRIFT_PX: f64 = 20.0;

const BACKGROUND_STOPS: &[(f64, f64)] = &[(-0.5, 0.0), (0.0, 1.0), (0.5, 0.0)];
const CAPTION_OPACITY_STOPS: &[(f64, f64)] = &[(0.0, 1.0), (0.3, 0.0)];
const CAPTION_DRIFT_STOPS: &[(f64, f64)] = &[(0.0, 0.0), (0.5, CAPTION_DRIFT_PX)];

// ───────────────────────────────────────── interpolation ─────

/// Clamped piecewise-linear interpolation through `stops` (sorted by x).
///
/// Left of the first stop returns its y, right of the last returns the last
/// y.  An empty slice yields 0.
pub fn interpolate(x: f64, stops: &[(f64, f64)]) -> f64 {
    let Some(&(first_x, first_y)) = stops.first() else {
        return 0.0;
    };
    if x <= first_x || x.is_nan() {
        return first_y;
    }
    for pair in stops.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x <= x1 {
            if x1 == x0 {
                return y1;
            }
            return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
        }
    }
    stops[stops.len() - 1].1
}

// ───────────────────────────────────────── slide state ───────

/// Everything the renderer needs to place one slide for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    /// Horizontal offset from stage centre, viewport-width percent.
    pub x_vw: f64,
    /// Vertical offset from the bottom anchor, pixels (negative = up).
    pub y_px: f64,
    pub scale: f64,
    pub blur_px: f64,
    pub opacity: f64,
    /// Higher draws on top.
    pub z_index: i32,
}

impl VisualState {
    pub fn from_distance(d: f64) -> Self {
        let abs = d.abs();
        Self {
            x_vw: d * SLIDE_SPACING_VW,
            y_px: -abs.min(1.0) * LIFT_PX,
            scale: (CENTER_SCALE - abs * SCALE_FALLOFF).max(MIN_SCALE),
            blur_px: if abs > BLUR_THRESHOLD { BLUR_PX } else { 0.0 },
            // Floor only matters for catalogues larger than ten items.
            opacity: (1.0 - abs * OPACITY_FALLOFF).max(0.0),
            z_index: (TOP_Z - abs * Z_FALLOFF).round() as i32,
        }
    }
}

/// Opacity of an item's full-screen gradient: a triangle peaking at centre.
pub fn background_opacity(d: f64) -> f64 {
    interpolate(d, BACKGROUND_STOPS)
}

/// Caption block state for one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionState {
    pub opacity: f64,
    /// Downward drift in pixels while fading out.
    pub y_px: f64,
}

impl CaptionState {
    pub fn from_distance(d: f64) -> Self {
        let abs = d.abs();
        Self {
            opacity: interpolate(abs, CAPTION_OPACITY_STOPS),
            y_px: interpolate(abs, CAPTION_DRIFT_STOPS),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Opacity of an item's position dot: lit while it is the nearest slide.
pub fn indicator_opacity(d: f64) -> f64 {
    if d.abs() < 0.5 {
        1.0
    } else {
        0.4
    }
}

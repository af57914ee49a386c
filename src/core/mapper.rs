//! Scroll progress → virtual index.
//!
//! The hero region is scrolled once, top to bottom, but the carousel should
//! feel endless.  Progress is stretched across `loop_factor` full turns of the
//! item circle so a single pass never visibly runs out of slides.

use std::num::NonZeroUsize;

/// Default number of full turns a complete scroll of the hero covers.
pub const DEFAULT_LOOP_FACTOR: f64 = 10.0;

/// Force a progress reading into `[0, 1]`.
///
/// NaN collapses to the start of the region; infinities saturate at the
/// nearer end.  Garbage from the scroll observer must never reach the spring.
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Linear map from scroll progress to the unbounded virtual index.
///
/// `virtual_index(1.0, 7, 10) == 70`: ten complete turns of seven items.
pub fn virtual_index(progress: f64, item_count: NonZeroUsize, loop_factor: f64) -> f64 {
    clamp_progress(progress) * item_count.get() as f64 * loop_factor
}

/// Inverse of [`virtual_index`], clamped to the scrollable range.
pub fn progress_for_index(index: f64, item_count: NonZeroUsize, loop_factor: f64) -> f64 {
    let span = item_count.get() as f64 * loop_factor;
    if span > 0.0 {
        clamp_progress(index / span)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seven() -> NonZeroUsize {
        NonZeroUsize::new(7).unwrap()
    }

    #[test]
    fn endpoints() {
        assert_eq!(virtual_index(1.0, seven(), 10.0), 70.0);
        assert_eq!(virtual_index(0.0, seven(), 10.0), 0.0);
    }

    #[test]
    fn linear_in_between() {
        assert!((virtual_index(0.5, seven(), 10.0) - 35.0).abs() < 1e-12);
        assert!((virtual_index(0.25, seven(), 2.0) - 3.5).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(virtual_index(-0.3, seven(), 10.0), 0.0);
        assert_eq!(virtual_index(1.7, seven(), 10.0), 70.0);
    }

    #[test]
    fn non_finite_progress_never_escapes() {
        assert_eq!(virtual_index(f64::NAN, seven(), 10.0), 0.0);
        assert_eq!(virtual_index(f64::INFINITY, seven(), 10.0), 70.0);
        assert_eq!(virtual_index(f64::NEG_INFINITY, seven(), 10.0), 0.0);
    }

    #[test]
    fn progress_for_index_inverts_the_map() {
        let p = progress_for_index(21.0, seven(), 10.0);
        assert!((p - 0.3).abs() < 1e-12);
        assert!((virtual_index(p, seven(), 10.0) - 21.0).abs() < 1e-9);
        assert_eq!(progress_for_index(500.0, seven(), 10.0), 1.0);
        assert_eq!(progress_for_index(-2.0, seven(), 10.0), 0.0);
    }
}

//! Scroll position inside the pinned hero region.
//!
//! The hero is a tall section (`sections` viewports high) whose stage stays
//! pinned while the page scrolls past it.  Progress is 0 when the section's
//! top meets the viewport's top and 1 when its bottom meets the viewport's
//! bottom, so the scrollable distance is `viewport × (sections − 1)`.

/// Default height of the hero region, in viewports.
pub const DEFAULT_SECTIONS: f64 = 20.0;

/// Offset-based scroll model, measured in terminal rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrack {
    offset: f64,
    viewport: f64,
    sections: f64,
    /// Progress held while there is nothing to scroll.
    parked: f64,
}

impl ScrollTrack {
    pub fn new(viewport_rows: u16, sections: f64) -> Self {
        Self {
            offset: 0.0,
            viewport: viewport_rows as f64,
            sections: if sections.is_finite() { sections.max(1.0) } else { DEFAULT_SECTIONS },
            parked: 0.0,
        }
    }

    /// Rows that can actually be scrolled.
    pub fn distance(&self) -> f64 {
        (self.viewport * (self.sections - 1.0)).max(0.0)
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Fraction of the region scrolled, in `[0, 1]`.
    ///
    /// With no scrollable distance this is the last progress the track had.
    pub fn progress(&self) -> f64 {
        let distance = self.distance();
        if distance > 0.0 {
            (self.offset / distance).clamp(0.0, 1.0)
        } else {
            self.parked
        }
    }

    /// Scroll by `rows` (positive = further down the page).
    pub fn scroll_by(&mut self, rows: f64) {
        if rows.is_finite() {
            self.offset = (self.offset + rows).clamp(0.0, self.distance());
        }
    }

    pub fn set_progress(&mut self, progress: f64) {
        if progress.is_finite() {
            self.place(progress.clamp(0.0, 1.0));
        }
    }

    pub fn scroll_to_start(&mut self) {
        self.place(0.0);
    }

    pub fn scroll_to_end(&mut self) {
        self.place(1.0);
    }

    pub fn viewport_rows(&self) -> f64 {
        self.viewport
    }

    /// Change the viewport height without moving the carousel.
    pub fn resize(&mut self, viewport_rows: u16) {
        let progress = self.progress();
        self.viewport = viewport_rows as f64;
        self.place(progress);
    }

    fn place(&mut self, progress: f64) {
        self.parked = progress;
        self.offset = progress * self.distance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_spans_region_minus_one_viewport() {
        let mut track = ScrollTrack::new(40, 20.0);
        assert_eq!(track.distance(), 760.0);
        assert_eq!(track.progress(), 0.0);
        track.scroll_by(380.0);
        assert_eq!(track.progress(), 0.5);
        track.scroll_to_end();
        assert_eq!(track.progress(), 1.0);
    }

    #[test]
    fn offset_is_clamped() {
        let mut track = ScrollTrack::new(10, 3.0);
        track.scroll_by(-5.0);
        assert_eq!(track.offset(), 0.0);
        track.scroll_by(1_000.0);
        assert_eq!(track.offset(), 20.0);
        track.scroll_by(f64::NAN);
        assert_eq!(track.offset(), 20.0);
    }

    #[test]
    fn resize_keeps_progress() {
        let mut track = ScrollTrack::new(30, 20.0);
        track.set_progress(0.25);
        track.resize(50);
        assert!((track.progress() - 0.25).abs() < 1e-12);
        assert_eq!(track.viewport_rows(), 50.0);
    }

    #[test]
    fn single_viewport_region_cannot_scroll() {
        let mut track = ScrollTrack::new(30, 1.0);
        track.scroll_by(10.0);
        assert_eq!(track.progress(), 0.0);

        let mut zero = ScrollTrack::new(0, 20.0);
        zero.scroll_by(10.0);
        assert_eq!(zero.progress(), 0.0);
    }

    #[test]
    fn resize_to_zero_and_back_keeps_progress() {
        let mut track = ScrollTrack::new(30, 20.0);
        track.set_progress(0.4);
        track.resize(0);
        assert_eq!(track.distance(), 0.0);
        assert!((track.progress() - 0.4).abs() < 1e-12);

        track.scroll_by(5.0);
        assert!((track.progress() - 0.4).abs() < 1e-12);

        track.resize(45);
        assert!((track.progress() - 0.4).abs() < 1e-12);
        assert!((track.offset() - 0.4 * 45.0 * 19.0).abs() < 1e-9);
    }

    #[test]
    fn set_progress_clamps() {
        let mut track = ScrollTrack::new(10, 11.0);
        track.set_progress(2.0);
        assert_eq!(track.offset(), 100.0);
        track.set_progress(-1.0);
        assert_eq!(track.offset(), 0.0);
        track.scroll_to_start();
        assert_eq!(track.progress(), 0.0);
    }
}

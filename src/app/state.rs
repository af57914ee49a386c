//! Central application state.
//!
//! All mutable state lives here so that rendering is a pure function of
//! `&AppState` and input handling a mutation of `&mut AppState`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::carousel::{Carousel, CarouselEvent};
use crate::core::idle::FloatBob;
use crate::core::scroll::ScrollTrack;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Stage,
    Controls,
}

/// Decoded slide artwork keyed by resolved file path.
pub type ImageCache = HashMap<PathBuf, Arc<image::RgbaImage>>;

/// Top-level application state.
pub struct AppState {
    /// The carousel engine (items, scroll target, spring).
    pub carousel: Carousel,
    /// Scroll position inside the pinned hero region.
    pub track: ScrollTrack,
    /// User configuration (bindings, display settings).
    pub config: AppConfig,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Seconds of animation time since start; drives the idle float.
    pub elapsed: f64,
    /// Idle float parameters, `None` when floating is switched off.
    pub float: Option<FloatBob>,
    /// Slide artwork decoded so far.  Missing entries render as silhouettes.
    pub images: ImageCache,
}

impl AppState {
    pub fn new(carousel: Carousel, config: AppConfig, viewport_rows: u16) -> Self {
        let track = ScrollTrack::new(viewport_rows, config.display.track_viewports);
        let float = config.display.float.then(FloatBob::default);
        Self {
            carousel,
            track,
            config,
            active_view: ActiveView::default(),
            should_quit: false,
            status_message: None,
            elapsed: 0.0,
            float,
            images: ImageCache::new(),
        }
    }

    /// Push the track's current progress into the carousel.
    pub fn sync_scroll(&mut self) {
        self.carousel.apply(CarouselEvent::Scroll {
            progress: self.track.progress(),
        });
    }

    /// Advance animation time by one frame.
    pub fn tick(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.carousel.apply(CarouselEvent::Tick { dt });
    }

    /// Resolve an item's image name against the assets directory.
    pub fn image_path(&self, image: &str) -> PathBuf {
        self.config.display.assets_dir.join(image)
    }

    /// Every distinct artwork path referenced by the catalogue.
    pub fn artwork_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for item in self.carousel.items() {
            let path = self.image_path(&item.image);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }

    /// Decoded artwork per item, in item order.
    pub fn artwork(&self) -> Vec<Option<&image::RgbaImage>> {
        self.carousel
            .items()
            .iter()
            .map(|item| self.images.get(&self.image_path(&item.image)).map(Arc::as_ref))
            .collect()
    }
}

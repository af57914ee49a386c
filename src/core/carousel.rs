//! The carousel state machine and its per-frame output.
//!
//! [`Carousel`] is the composition root of the core: it owns the items, the
//! loop factor and the single piece of evolving state (the index filter).
//! The host feeds it [`CarouselEvent`]s (scroll updates and frame ticks, in
//! whatever order they arrive) and asks for a [`Frame`] when it draws.
//! A frame computes the smoothed index once and derives every item from it.

use std::num::NonZeroUsize;

use super::distance::modular_distance;
use super::error::CarouselError;
use super::item::Item;
use super::mapper::{self, clamp_progress};
use super::spring::{Spring, SpringConfig};
use super::transform::{background_opacity, indicator_opacity, CaptionState, VisualState};

// ───────────────────────────────────────── configuration ─────

/// Everything needed to build a carousel.  Consumed by [`Carousel::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    pub items: Vec<Item>,
    pub loop_factor: f64,
    pub spring: SpringConfig,
    /// `false` replaces the spring with an identity filter.
    pub smoothing: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            items: super::item::default_items(),
            loop_factor: mapper::DEFAULT_LOOP_FACTOR,
            spring: SpringConfig::default(),
            smoothing: true,
        }
    }
}

// ───────────────────────────────────────── events ────────────

/// Inputs from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    /// New scroll progress from the observer (clamped to `[0, 1]`).
    Scroll { progress: f64 },
    /// One rendering frame elapsed, `dt` seconds since the previous one.
    Tick { dt: f64 },
}

// ───────────────────────────────────────── index filter ──────

/// Smoothing applied between the virtual and the smoothed index.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexFilter {
    Spring(Spring),
    /// Output equals input; nothing to settle.
    Identity { value: f64 },
}

impl IndexFilter {
    fn update(&mut self, target: f64, dt: f64) -> f64 {
        match self {
            IndexFilter::Spring(spring) => spring.update(target, dt),
            IndexFilter::Identity { value } => {
                *value = target;
                *value
            }
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            IndexFilter::Spring(spring) => spring.position(),
            IndexFilter::Identity { value } => *value,
        }
    }

    pub fn is_resting(&self) -> bool {
        match self {
            IndexFilter::Spring(spring) => spring.is_resting(),
            IndexFilter::Identity { .. } => true,
        }
    }
}

// ───────────────────────────────────────── frame output ──────

/// Derived state for one item in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemFrame {
    pub index: usize,
    /// Signed modular distance from the smoothed index, in `(−N/2, N/2]`.
    pub distance: f64,
    pub visual: VisualState,
    pub background_opacity: f64,
    pub caption: CaptionState,
    pub indicator_opacity: f64,
}

impl ItemFrame {
    pub fn derive(smoothed_index: f64, index: usize, count: NonZeroUsize) -> Self {
        let distance = modular_distance(smoothed_index, index as i64, count);
        Self {
            index,
            distance,
            visual: VisualState::from_distance(distance),
            background_opacity: background_opacity(distance),
            caption: CaptionState::from_distance(distance),
            indicator_opacity: indicator_opacity(distance),
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub progress: f64,
    pub virtual_index: f64,
    pub smoothed_index: f64,
    /// Index of the item nearest the centre (lowest index on ties).
    pub active: usize,
    /// One entry per item, in item order.
    pub items: Vec<ItemFrame>,
}

impl Frame {
    /// Item indices sorted back-to-front by stack order.
    pub fn draw_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        order.sort_by_key(|&i| self.items[i].visual.z_index);
        order
    }
}

// ───────────────────────────────────────── carousel ──────────

/// Scroll-driven carousel over a fixed, non-empty list of items.
#[derive(Debug, Clone)]
pub struct Carousel {
    items: Vec<Item>,
    count: NonZeroUsize,
    loop_factor: f64,
    spring_config: SpringConfig,
    progress: f64,
    virtual_index: f64,
    filter: IndexFilter,
}

impl Carousel {
    /// Validate `config` and build a carousel resting at the first item.
    pub fn new(config: CarouselConfig) -> Result<Self, CarouselError> {
        let count = NonZeroUsize::new(config.items.len()).ok_or(CarouselError::NoItems)?;
        if !config.loop_factor.is_finite() || config.loop_factor <= 0.0 {
            return Err(CarouselError::LoopFactor(config.loop_factor));
        }
        config.spring.validate()?;

        tracing::debug!(
            items = count.get(),
            loop_factor = config.loop_factor,
            damping_ratio = config.spring.damping_ratio(),
            smoothing = config.smoothing,
            "carousel configured"
        );

        let filter = if config.smoothing {
            IndexFilter::Spring(Spring::new(config.spring, 0.0))
        } else {
            IndexFilter::Identity { value: 0.0 }
        };

        Ok(Self {
            items: config.items,
            count,
            loop_factor: config.loop_factor,
            spring_config: config.spring,
            progress: 0.0,
            virtual_index: 0.0,
            filter,
        })
    }

    /// Apply one host event.
    pub fn apply(&mut self, event: CarouselEvent) {
        match event {
            CarouselEvent::Scroll { progress } => {
                let clamped = clamp_progress(progress);
                if clamped != progress {
                    tracing::trace!(progress, clamped, "scroll progress clamped");
                }
                self.progress = clamped;
                self.virtual_index = mapper::virtual_index(clamped, self.count, self.loop_factor);
                if let IndexFilter::Identity { value } = &mut self.filter {
                    *value = self.virtual_index;
                }
            }
            CarouselEvent::Tick { dt } => {
                let was_resting = self.filter.is_resting();
                self.filter.update(self.virtual_index, dt);
                if !was_resting && self.filter.is_resting() {
                    tracing::trace!(index = self.filter.value(), "index filter settled");
                }
            }
        }
    }

    /// Shift the smoothed index by whole turns of the catalogue so that at
    /// most half a turn of travel remains toward the virtual index.
    ///
    /// Every item sits at the same modular distance before and after, so the
    /// frame is unchanged; the spring then animates only the remainder.
    /// Returns the shift applied, in slots.
    pub fn shorten_travel(&mut self) -> f64 {
        let IndexFilter::Spring(spring) = &mut self.filter else {
            return 0.0;
        };
        let n = self.count.get() as f64;
        let turns = ((self.virtual_index - spring.position()) / n).round();
        if turns == 0.0 {
            return 0.0;
        }
        let shift = turns * n;
        spring.rebase(shift);
        tracing::debug!(turns, shift, "index filter rebased");
        shift
    }

    /// Switch between spring smoothing and the identity filter.
    ///
    /// The smoothed index carries over, so toggling never makes slides jump.
    pub fn set_smoothing(&mut self, enabled: bool) {
        let current = self.filter.value();
        self.filter = if enabled {
            IndexFilter::Spring(Spring::new(self.spring_config, current))
        } else {
            IndexFilter::Identity { value: current }
        };
    }

    pub fn smoothing(&self) -> bool {
        matches!(self.filter, IndexFilter::Spring(_))
    }

    /// Derive the complete frame from the current smoothed index.
    pub fn frame(&self) -> Frame {
        let smoothed_index = self.filter.value();
        let items: Vec<ItemFrame> = (0..self.count.get())
            .map(|index| ItemFrame::derive(smoothed_index, index, self.count))
            .collect();

        let mut active = 0;
        for (i, item) in items.iter().enumerate() {
            if item.distance.abs() < items[active].distance.abs() {
                active = i;
            }
        }

        Frame {
            progress: self.progress,
            virtual_index: self.virtual_index,
            smoothed_index,
            active,
            items,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn count(&self) -> NonZeroUsize {
        self.count
    }

    pub fn loop_factor(&self) -> f64 {
        self.loop_factor
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn virtual_index(&self) -> f64 {
        self.virtual_index
    }

    pub fn smoothed_index(&self) -> f64 {
        self.filter.value()
    }

    /// True when nothing will move until the next scroll event.
    pub fn is_resting(&self) -> bool {
        self.filter.is_resting() && self.filter.value() == self.virtual_index
    }
}

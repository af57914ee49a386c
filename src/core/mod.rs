//! Core carousel engine: scroll mapping, smoothing, per-item transforms.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Every
//! derivation is a pure function of the smoothed index; the only state that
//! evolves over time is the spring inside [`carousel::Carousel`].

pub mod carousel;
pub mod distance;
pub mod error;
pub mod idle;
pub mod item;
pub mod mapper;
pub mod scroll;
pub mod spring;
pub mod transform;

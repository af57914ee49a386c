//! Application orchestration: state, frame pacing, background jobs, input.

pub mod dump;
pub mod event;
pub mod handler;
pub mod image_runtime;
pub mod state;
pub mod ticker;

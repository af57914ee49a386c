//! Configuration-time failures for the carousel core.
//!
//! Everything past construction is total: distances, transforms and the
//! spring never fail, so this is the only error type the core exposes.

use thiserror::Error;

/// Why a carousel could not be built from its configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CarouselError {
    /// The item list was empty, so there is no modulus to wrap around.
    #[error("carousel needs at least one item")]
    NoItems,

    /// The loop factor must be a finite, strictly positive number.
    #[error("loop factor must be finite and positive, got {0}")]
    LoopFactor(f64),

    /// A spring parameter was NaN, infinite, or out of range.
    #[error("spring {field} must be finite and {requirement}, got {value}")]
    Spring {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },

    /// A gradient colour string could not be parsed.
    #[error("invalid colour `{0}` (expected #rgb, #rrggbb or #rrggbbaa)")]
    Color(String),

    /// An `item = ...` config line did not have the six expected fields.
    #[error("malformed item `{0}` (expected id | image | #start | #end | title | description)")]
    ItemLine(String),
}

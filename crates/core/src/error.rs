//! Error types for the metaballs core.
//!
//! Only configuration and construction can fail. The numeric degeneracies of
//! the field pipeline (a node sitting exactly on a source center, two equal
//! corner values on an edge) are carried through as non-finite floats and
//! never surface here.

use thiserror::Error;

/// Errors produced while building or configuring a simulation.
#[derive(Debug, Error)]
pub enum MetaballError {
    /// Grid columns/rows or the domain size were zero, or their product overflowed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Grid spacing was zero, negative or not finite.
    #[error("invalid grid spacing {0}: must be finite and greater than zero")]
    InvalidSpacing(f64),

    /// A source radius was zero, negative or not finite.
    #[error("invalid source radius {0}: must be finite and greater than zero")]
    InvalidRadius(f64),

    /// The contour threshold was zero, negative or not finite.
    #[error("invalid threshold {0}: must be finite and greater than zero")]
    InvalidThreshold(f64),

    /// A randomization range had `min > max` or an otherwise unusable bound.
    #[error("invalid range for '{name}': [{min}, {max}]")]
    InvalidRange { name: String, min: i64, max: i64 },

    /// A grid node index was outside the field.
    #[error("node ({x}, {y}) out of bounds for grid of size ({cols}, {rows})")]
    OutOfBounds {
        x: usize,
        y: usize,
        cols: usize,
        rows: usize,
    },

    /// A data buffer did not match the grid it was meant for.
    #[error("dimension mismatch: expected {expected} values, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A renderer failed to write its output.
    #[error("i/o error: {0}")]
    Io(String),
}

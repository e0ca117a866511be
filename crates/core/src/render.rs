//! The boundary between a simulation and whatever draws it.
//!
//! A [`Frame`] borrows one tick's output; a [`Renderer`] consumes it. The
//! trait is object-safe so frontends can hold a `Box<dyn Renderer>`.

use crate::error::MetaballError;
use crate::geometry::{Bounds, Segment};
use crate::source::Source;

/// One tick's drawable output.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub bounds: Bounds,
    /// Contour pieces in cell order. Some may be non-finite.
    pub segments: &'a [Segment],
    /// Current sources, for optional guide circles.
    pub sources: &'a [Source],
}

/// Draws frames produced by a simulation.
pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), MetaballError>;
}

//! Sampling the summed source field onto grid nodes.
//!
//! The field at a point is the sum of every source's [`Influence`]:
//! `Σ radius² / squared_distance(point, center)`. Distances stay squared (no
//! square root), so the falloff is inverse-square.
//!
//! A point that lands exactly on a source center divides by zero. The result
//! is `inf` (counted as inside the contour) or `NaN` when the numerator is
//! zero too; neither is guarded against here.

use crate::field::Field;
use crate::geometry::Point;
use crate::source::Influence;
use glam::DVec2;

/// `(p1.x - p2.x)² + (p1.y - p2.y)²`.
pub fn squared_distance(p1: Point, p2: Point) -> f64 {
    let d = p1 - p2;
    d.x * d.x + d.y * d.y
}

/// Field value at `point`: the summed influence of every source.
pub fn sample<S: Influence>(sources: &[S], point: Point) -> f64 {
    sources.iter().map(|s| s.influence(point)).sum()
}

/// Overwrites every node of `field` with the sampled value at
/// `(x * spacing, y * spacing)`.
///
/// Cost is `O(cols * rows * sources)`; this is the hot loop of a tick.
pub fn fill_grid<S: Influence>(field: &mut Field, sources: &[S], spacing: f64) {
    let cols = field.cols();
    for (i, node) in field.data_mut().iter_mut().enumerate() {
        let x = (i % cols) as f64 * spacing;
        let y = (i / cols) as f64 * spacing;
        *node = sample(sources, DVec2::new(x, y));
    }
}

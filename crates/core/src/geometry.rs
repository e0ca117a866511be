//! Plane geometry shared by the sampler, the contour extractor and renderers.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A position in domain coordinates.
pub type Point = DVec2;

/// The domain rectangle `[0, width] × [0, height]` that sources bounce inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center of the domain.
    pub fn center(&self) -> Point {
        DVec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// One straight piece of the isocontour, lying inside a single grid cell.
///
/// Endpoints come from unclamped linear interpolation, so a segment built
/// from a degenerate edge may hold `NaN` or infinite coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// `true` when both endpoints are finite and the segment can be drawn.
    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }

    /// Midpoint of the two endpoints.
    pub fn midpoint(&self) -> Point {
        (self.start + self.end) * 0.5
    }
}

/// The four edges of a grid cell.
///
/// Crossing points are numbered after these edges: `p1` on [`Edge::Top`],
/// `p2` on [`Edge::Right`], `p3` on [`Edge::Bottom`], `p4` on [`Edge::Left`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// a → b
    Top,
    /// b → c
    Right,
    /// d → c
    Bottom,
    /// a → d
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Slot of this edge's crossing point in a `[Point; 4]`.
    pub fn index(self) -> usize {
        match self {
            Edge::Top => 0,
            Edge::Right => 1,
            Edge::Bottom => 2,
            Edge::Left => 3,
        }
    }
}

/// Linear interpolation `a + (b - a) * t` without clamping `t`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_length_is_euclidean() {
        let s = Segment::new(DVec2::new(0.0, 0.0), DVec2::new(3.0, 4.0));
        assert!((s.length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn segment_with_nan_is_not_finite() {
        let s = Segment::new(DVec2::new(f64::NAN, 0.0), DVec2::new(1.0, 1.0));
        assert!(!s.is_finite());
        let ok = Segment::new(DVec2::ZERO, DVec2::ONE);
        assert!(ok.is_finite());
    }

    #[test]
    fn midpoint_is_average() {
        let s = Segment::new(DVec2::new(2.0, 8.0), DVec2::new(4.0, 0.0));
        assert_eq!(s.midpoint(), DVec2::new(3.0, 4.0));
    }

    #[test]
    fn edge_indices_are_distinct_and_ordered() {
        let idx: Vec<usize> = Edge::ALL.iter().map(|e| e.index()).collect();
        assert_eq!(idx, vec![0, 1, 2, 3]);
    }

    #[test]
    fn lerp_does_not_clamp() {
        assert!((lerp(0.0, 8.0, 0.5) - 4.0).abs() < f64::EPSILON);
        assert!((lerp(0.0, 8.0, 1.5) - 12.0).abs() < f64::EPSILON);
        assert!(lerp(0.0, 8.0, f64::NAN).is_nan());
    }

    #[test]
    fn bounds_center() {
        assert_eq!(Bounds::new(640.0, 480.0).center(), DVec2::new(320.0, 240.0));
    }

    #[test]
    fn segment_serializes_through_json() {
        let s = Segment::new(DVec2::new(1.5, 2.0), DVec2::new(3.0, 4.25));
        let json = serde_json::to_string(&s).unwrap();
        let back: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}

//! Marching-squares extraction of the threshold isocontour.
//!
//! Each cell of the grid is the square between four adjacent nodes, named
//! clockwise from the top-left:
//!
//! ```text
//!   a ---- b
//!   |      |
//!   d ---- c
//! ```
//!
//! A corner is inside when its value is `>= threshold`. The four inside bits
//! form `config = 8a + 4b + 2c + d`, which indexes [`CASE_TABLE`]. The table
//! names which edge crossings to join; crossing points are linearly
//! interpolated along each edge.
//!
//! The saddle cases 5 and 10 always use the pairing in the table. They are
//! not resolved by sampling the cell center, so neighbouring saddles can
//! produce visibly disconnected contours.

use crate::field::Field;
use crate::geometry::{lerp, Edge, Point, Segment};
use glam::DVec2;

/// Default contour level: a node is inside the blob at a field value of 1.
pub const THRESHOLD: f64 = 1.0;

/// Edge pairs to connect for each of the 16 cell configurations.
pub const CASE_TABLE: [&[(Edge, Edge)]; 16] = {
    use Edge::{Bottom, Left, Right, Top};
    [
        &[],
        &[(Bottom, Left)],
        &[(Bottom, Right)],
        &[(Right, Left)],
        &[(Top, Right)],
        &[(Top, Left), (Right, Bottom)],
        &[(Top, Bottom)],
        &[(Top, Left)],
        &[(Top, Left)],
        &[(Top, Bottom)],
        &[(Top, Right), (Bottom, Left)],
        &[(Top, Right)],
        &[(Right, Left)],
        &[(Right, Bottom)],
        &[(Bottom, Left)],
        &[],
    ]
};

/// Packs the inside bits of corners a, b, c, d into a value in `0..=15`.
///
/// `NaN` corners compare false and count as outside.
pub fn cell_config(a: f64, b: f64, c: f64, d: f64, threshold: f64) -> u8 {
    let bit = |v: f64| u8::from(v >= threshold);
    8 * bit(a) + 4 * bit(b) + 2 * bit(c) + bit(d)
}

/// One grid cell: its top-left node and its four corner values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    /// Corner values in `[a, b, c, d]` order.
    pub values: [f64; 4],
}

impl Cell {
    /// The cell whose top-left node is `(x, y)`, or `None` if it would extend
    /// past the last row or column.
    pub fn at(field: &Field, x: usize, y: usize) -> Option<Self> {
        Some(Self {
            x,
            y,
            values: [
                field.get(x, y)?,
                field.get(x + 1, y)?,
                field.get(x + 1, y + 1)?,
                field.get(x, y + 1)?,
            ],
        })
    }

    pub fn config(&self, threshold: f64) -> u8 {
        let [a, b, c, d] = self.values;
        cell_config(a, b, c, d, threshold)
    }

    /// Threshold crossings on all four edges, indexed by [`Edge::index`].
    ///
    /// Every edge is interpolated whether or not the config uses it. An edge
    /// whose two corners hold the same value yields `t = ±inf` or `NaN`, and
    /// the resulting point is returned as is.
    pub fn crossings(&self, spacing: f64, threshold: f64) -> [Point; 4] {
        let [fa, fb, fc, fd] = self.values;
        let x0 = self.x as f64 * spacing;
        let y0 = self.y as f64 * spacing;
        let x1 = x0 + spacing;
        let y1 = y0 + spacing;
        let t = |near: f64, far: f64| (threshold - near) / (far - near);

        [
            DVec2::new(lerp(x0, x1, t(fa, fb)), y0),
            DVec2::new(x1, lerp(y0, y1, t(fb, fc))),
            DVec2::new(lerp(x0, x1, t(fd, fc)), y1),
            DVec2::new(x0, lerp(y0, y1, t(fa, fd))),
        ]
    }

    /// Segments this cell contributes to the contour: zero, one or two.
    pub fn segments(&self, spacing: f64, threshold: f64) -> impl Iterator<Item = Segment> {
        let points = self.crossings(spacing, threshold);
        let pairs: &'static [(Edge, Edge)] = CASE_TABLE[usize::from(self.config(threshold))];
        pairs
            .iter()
            .map(move |&(from, to)| Segment::new(points[from.index()], points[to.index()]))
    }
}

/// Iterates every cell of `field` in row-major order (rows outer, columns inner).
pub fn cells(field: &Field) -> impl Iterator<Item = Cell> + '_ {
    let cell_cols = field.cols().saturating_sub(1);
    let cell_rows = field.rows().saturating_sub(1);
    (0..cell_rows)
        .flat_map(move |y| (0..cell_cols).map(move |x| (x, y)))
        .filter_map(move |(x, y)| Cell::at(field, x, y))
}

/// Extracts the contour of `field` at `threshold` as a list of segments.
///
/// Segments come out in cell order, unjoined and undeduplicated.
pub fn extract(field: &Field, spacing: f64, threshold: f64) -> Vec<Segment> {
    let mut out = Vec::new();
    extract_into(field, spacing, threshold, &mut out);
    out
}

/// Like [`extract`], but clears and refills a caller-owned buffer.
pub fn extract_into(field: &Field, spacing: f64, threshold: f64, out: &mut Vec<Segment>) {
    out.clear();
    out.extend(cells(field).flat_map(|cell| cell.segments(spacing, threshold)));
}

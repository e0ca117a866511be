//! Two-dimensional grid of scalar field values, one per grid node.
//!
//! A `Field` stores `cols * rows` f64 values in row-major layout. Unlike a
//! normalized image, values are not clamped: summed inverse-square influences
//! are unbounded and a node that coincides with a source center holds `inf`
//! (or `NaN`). Access is bounds-checked, there is no wrap-around.

use crate::error::MetaballError;

/// A 2D grid of unclamped node values.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    cols: usize,
    rows: usize,
    data: Vec<f64>,
}

impl Field {
    /// Creates a zero-filled grid of `cols × rows` nodes.
    ///
    /// Returns `MetaballError::InvalidDimensions` if either dimension is zero
    /// or if `cols * rows` overflows `usize`.
    pub fn new(cols: usize, rows: usize) -> Result<Self, MetaballError> {
        let len = checked_len(cols, rows)?;
        Ok(Self {
            cols,
            rows,
            data: vec![0.0; len],
        })
    }

    /// Creates the node grid covering a `width × height` domain at `spacing`.
    ///
    /// There is one node per multiple of `spacing` including both borders,
    /// so a 640-wide domain at spacing 8 has 81 columns.
    pub fn for_domain(width: f64, height: f64, spacing: f64) -> Result<Self, MetaballError> {
        let (cols, rows) = grid_dimensions(width, height, spacing)?;
        Self::new(cols, rows)
    }

    /// Creates a grid from a pre-built row-major buffer.
    pub fn from_data(cols: usize, rows: usize, data: Vec<f64>) -> Result<Self, MetaballError> {
        let expected = checked_len(cols, rows)?;
        if data.len() != expected {
            return Err(MetaballError::DimensionMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { cols, rows, data })
    }

    /// Number of node columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of node rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.cols && y < self.rows).then(|| y * self.cols + x)
    }

    /// Value at node `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Overwrites node `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, value: f64) -> Result<(), MetaballError> {
        let i = self.index(x, y).ok_or(MetaballError::OutOfBounds {
            x,
            y,
            cols: self.cols,
            rows: self.rows,
        })?;
        self.data[i] = value;
        Ok(())
    }

    /// Sets every node to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Whether node `(x, y)` is on the inside of the contour at `threshold`.
    ///
    /// `inf` counts as inside; `NaN` compares false and counts as outside.
    pub fn is_inside(&self, x: usize, y: usize, threshold: f64) -> bool {
        self.get(x, y).is_some_and(|v| v >= threshold)
    }

    /// Iterates over all nodes yielding `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data.iter().enumerate().map(|(i, &v)| {
            let x = i % self.cols;
            let y = i / self.cols;
            (x, y, v)
        })
    }
}

/// Largest grid accepted, in nodes (512 MiB of `f64`).
pub const MAX_NODES: usize = 1 << 26;

/// Node counts `(cols, rows)` for a domain sampled every `spacing` units.
pub fn grid_dimensions(
    width: f64,
    height: f64,
    spacing: f64,
) -> Result<(usize, usize), MetaballError> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(MetaballError::InvalidSpacing(spacing));
    }
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(MetaballError::InvalidDimensions);
    }
    let cols = (width / spacing).floor() + 1.0;
    let rows = (height / spacing).floor() + 1.0;
    // compared in f64 before casting, which would saturate
    if cols * rows > MAX_NODES as f64 {
        return Err(MetaballError::InvalidDimensions);
    }
    Ok((cols as usize, rows as usize))
}

fn checked_len(cols: usize, rows: usize) -> Result<usize, MetaballError> {
    if cols == 0 || rows == 0 {
        return Err(MetaballError::InvalidDimensions);
    }
    cols.checked_mul(rows)
        .filter(|&len| len <= MAX_NODES)
        .ok_or(MetaballError::InvalidDimensions)
}

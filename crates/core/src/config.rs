//! Tunable constants of a simulation, gathered in one validated struct.

use crate::contour::THRESHOLD;
use crate::error::MetaballError;
use crate::field::grid_dimensions;
use crate::geometry::Bounds;
use crate::params::{param_f64, param_i64, param_usize};
use crate::source::{IntRange, SourceRanges};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default domain width.
pub const DEFAULT_WIDTH: f64 = 640.0;
/// Default domain height.
pub const DEFAULT_HEIGHT: f64 = 640.0;
/// Default distance between neighbouring grid nodes.
pub const DEFAULT_SPACING: f64 = 8.0;
/// Default number of sources placed on construction and reset.
pub const DEFAULT_SOURCE_COUNT: usize = 5;

/// Everything that shapes a simulation besides its PRNG seed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub width: f64,
    pub height: f64,
    pub spacing: f64,
    pub source_count: usize,
    pub threshold: f64,
    pub ranges: SourceRanges,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::for_domain(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl SimulationConfig {
    /// Defaults for a `width × height` domain, with placement ranges scaled to it.
    pub fn for_domain(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            spacing: DEFAULT_SPACING,
            source_count: DEFAULT_SOURCE_COUNT,
            threshold: THRESHOLD,
            ranges: SourceRanges::for_domain(width, height),
        }
    }

    /// Reads a config from a flat JSON object, falling back to defaults per key.
    ///
    /// Placement ranges default to those of the (possibly overridden) domain.
    pub fn from_json(params: &Value) -> Self {
        let width = param_f64(params, "width", DEFAULT_WIDTH);
        let height = param_f64(params, "height", DEFAULT_HEIGHT);
        let base = Self::for_domain(width, height);
        let range = |name: &str, r: IntRange| {
            IntRange::new(
                param_i64(params, &format!("{name}_min"), r.min),
                param_i64(params, &format!("{name}_max"), r.max),
            )
        };
        Self {
            width,
            height,
            spacing: param_f64(params, "spacing", base.spacing),
            source_count: param_usize(params, "source_count", base.source_count),
            threshold: param_f64(params, "threshold", base.threshold),
            ranges: SourceRanges {
                x: range("x", base.ranges.x),
                y: range("y", base.ranges.y),
                radius: range("radius", base.ranges.radius),
                speed: range("speed", base.ranges.speed),
            },
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Grid node counts `(cols, rows)` for this domain and spacing.
    pub fn grid_dimensions(&self) -> Result<(usize, usize), MetaballError> {
        grid_dimensions(self.width, self.height, self.spacing)
    }

    pub fn validate(&self) -> Result<(), MetaballError> {
        self.grid_dimensions()?;
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(MetaballError::InvalidThreshold(self.threshold));
        }
        self.ranges.validate()
    }

    /// Current values in the flat key layout accepted by [`Self::from_json`].
    pub fn to_json(&self) -> Value {
        json!({
            "width": self.width,
            "height": self.height,
            "spacing": self.spacing,
            "source_count": self.source_count,
            "threshold": self.threshold,
            "x_min": self.ranges.x.min,
            "x_max": self.ranges.x.max,
            "y_min": self.ranges.y.min,
            "y_max": self.ranges.y.max,
            "radius_min": self.ranges.radius.min,
            "radius_max": self.ranges.radius.max,
            "speed_min": self.ranges.speed.min,
            "speed_max": self.ranges.speed.max,
        })
    }

    /// Describes every key of [`Self::to_json`]: type, default and meaning.
    pub fn schema() -> Value {
        let d = Self::default();
        json!({
            "width": {
                "type": "number",
                "default": d.width,
                "description": "Domain width in field units"
            },
            "height": {
                "type": "number",
                "default": d.height,
                "description": "Domain height in field units"
            },
            "spacing": {
                "type": "number",
                "default": d.spacing,
                "description": "Distance between neighbouring grid nodes"
            },
            "source_count": {
                "type": "integer",
                "default": d.source_count,
                "description": "Number of sources placed on start and reset"
            },
            "threshold": {
                "type": "number",
                "default": d.threshold,
                "description": "Field value at which the contour is drawn"
            },
            "x_min": { "type": "integer", "default": d.ranges.x.min, "description": "Lowest starting x" },
            "x_max": { "type": "integer", "default": d.ranges.x.max, "description": "Highest starting x" },
            "y_min": { "type": "integer", "default": d.ranges.y.min, "description": "Lowest starting y" },
            "y_max": { "type": "integer", "default": d.ranges.y.max, "description": "Highest starting y" },
            "radius_min": { "type": "integer", "default": d.ranges.radius.min, "min": 1, "description": "Smallest source radius" },
            "radius_max": { "type": "integer", "default": d.ranges.radius.max, "min": 1, "description": "Largest source radius" },
            "speed_min": { "type": "integer", "default": d.ranges.speed.min, "description": "Lowest per-axis velocity" },
            "speed_max": { "type": "integer", "default": d.ranges.speed.max, "description": "Highest per-axis velocity" }
        })
    }
}

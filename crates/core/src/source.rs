//! Moving circular field emitters ("metaballs").
//!
//! A [`Source`] owns its own motion: each tick it moves by its velocity and
//! then reflects any axis on which its circle has touched the domain border.
//! It contributes `radius² / d²` to the field at a point `d` away from its
//! center (see [`Influence`]).

use crate::error::MetaballError;
use crate::geometry::{Bounds, Point};
use crate::prng::Xorshift64;
use crate::sampler::squared_distance;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Anything that adds a scalar contribution to the field at a point.
///
/// Implementations must be deterministic: same point, same value.
pub trait Influence {
    fn influence(&self, point: Point) -> f64;
}

/// A circular emitter with position, per-tick velocity and fixed radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Source {
    center: Point,
    velocity: DVec2,
    radius: f64,
}

impl Source {
    /// Creates a source, rejecting a radius that is not finite and positive.
    pub fn new(center: Point, velocity: DVec2, radius: f64) -> Result<Self, MetaballError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(MetaballError::InvalidRadius(radius));
        }
        Ok(Self {
            center,
            velocity,
            radius,
        })
    }

    /// Draws a source from `ranges`, in the order x, y, radius, vx, vy.
    pub fn random(rng: &mut Xorshift64, ranges: &SourceRanges) -> Result<Self, MetaballError> {
        let x = ranges.x.draw(rng);
        let y = ranges.y.draw(rng);
        let radius = ranges.radius.draw(rng);
        let vx = ranges.speed.draw(rng);
        let vy = ranges.speed.draw(rng);
        Self::new(DVec2::new(x, y), DVec2::new(vx, vy), radius)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Displacement applied by the next [`Self::advance`].
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Moves by one tick of velocity, then reflects.
    ///
    /// The border test runs after the move, so the circle may overlap the
    /// border for one tick before heading back. Each axis reverses
    /// independently when `center + radius >= upper` or `center - radius < 0`.
    pub fn advance(&mut self, bounds: Bounds) {
        self.center += self.velocity;

        if self.center.x + self.radius >= bounds.width || self.center.x - self.radius < 0.0 {
            self.velocity.x = -self.velocity.x;
        }
        if self.center.y + self.radius >= bounds.height || self.center.y - self.radius < 0.0 {
            self.velocity.y = -self.velocity.y;
        }
    }
}

impl Influence for Source {
    /// Inverse-square falloff on squared distance; `inf` (or `NaN`) at the center.
    fn influence(&self, point: Point) -> f64 {
        self.radius * self.radius / squared_distance(point, self.center)
    }
}

/// Closed integer range used when drawing random source attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    fn draw(&self, rng: &mut Xorshift64) -> f64 {
        rng.next_int_inclusive(self.min, self.max) as f64
    }

    fn validate(&self, name: &str) -> Result<(), MetaballError> {
        if self.min > self.max {
            return Err(MetaballError::InvalidRange {
                name: name.to_string(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Randomization ranges for freshly placed sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRanges {
    pub x: IntRange,
    pub y: IntRange,
    pub radius: IntRange,
    /// Per-axis velocity; both components draw from this range.
    pub speed: IntRange,
}

/// Default radius range for new sources.
pub const DEFAULT_RADIUS_RANGE: IntRange = IntRange::new(20, 100);
/// Default per-axis speed range for new sources.
pub const DEFAULT_SPEED_RANGE: IntRange = IntRange::new(1, 3);

impl SourceRanges {
    /// Starting positions in `[w/4, w/2] × [w/4, h/2]`.
    ///
    /// The lower y bound is measured on the width.
    pub fn for_domain(width: f64, height: f64) -> Self {
        let quarter_w = (width / 4.0) as i64;
        Self {
            x: IntRange::new(quarter_w, (width / 2.0) as i64),
            y: IntRange::new(quarter_w, (height / 2.0) as i64),
            radius: DEFAULT_RADIUS_RANGE,
            speed: DEFAULT_SPEED_RANGE,
        }
    }

    /// Rejects inverted ranges and radii that could be zero or negative.
    pub fn validate(&self) -> Result<(), MetaballError> {
        self.x.validate("x")?;
        self.y.validate("y")?;
        self.radius.validate("radius")?;
        self.speed.validate("speed")?;
        if self.radius.min <= 0 {
            return Err(MetaballError::InvalidRange {
                name: "radius".into(),
                min: self.radius.min,
                max: self.radius.max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        width: 640.0,
        height: 640.0,
    };

    fn source(x: f64, y: f64, vx: f64, vy: f64, r: f64) -> Source {
        Source::new(DVec2::new(x, y), DVec2::new(vx, vy), r).unwrap()
    }

    #[test]
    fn new_rejects_non_positive_radius() {
        for r in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Source::new(DVec2::ZERO, DVec2::ZERO, r),
                Err(MetaballError::InvalidRadius(_))
            ));
        }
    }

    #[test]
    fn accessors_report_construction_values() {
        let s = source(12.0, 34.0, -1.0, 2.0, 25.0);
        assert_eq!(s.center(), DVec2::new(12.0, 34.0));
        assert_eq!(s.velocity(), DVec2::new(-1.0, 2.0));
        assert_eq!(s.radius(), 25.0);
    }

    #[test]
    fn advance_moves_by_velocity_inside_domain() {
        let mut s = source(320.0, 320.0, 2.0, -3.0, 50.0);
        s.advance(BOUNDS);
        assert_eq!(s.center, DVec2::new(322.0, 317.0));
        assert_eq!(s.velocity, DVec2::new(2.0, -3.0));
    }

    #[test]
    fn advance_reflects_at_right_edge_after_full_move() {
        // 587 + 3 + 50 = 640 touches the border
        let mut s = source(587.0, 320.0, 3.0, 1.0, 50.0);
        s.advance(BOUNDS);
        assert_eq!(s.center.x, 590.0);
        assert_eq!(s.velocity.x, -3.0);
        assert_eq!(s.velocity.y, 1.0);
    }

    #[test]
    fn advance_reflects_at_left_edge_after_full_move() {
        let mut s = source(21.0, 320.0, -2.0, 0.0, 20.0);
        s.advance(BOUNDS);
        assert_eq!(s.center.x, 19.0);
        assert_eq!(s.velocity.x, 2.0);
    }

    #[test]
    fn advance_can_overshoot_for_one_tick() {
        let mut s = source(615.0, 320.0, 3.0, 0.0, 25.0);
        s.advance(BOUNDS);
        assert!(s.center.x + s.radius() > BOUNDS.width);
        assert_eq!(s.velocity.x, -3.0);
        s.advance(BOUNDS);
        assert_eq!(s.center.x, 615.0);
    }

    #[test]
    fn advance_reflects_axes_independently() {
        let mut s = source(30.0, 609.0, -1.0, 2.0, 30.0);
        s.advance(BOUNDS);
        assert_eq!(s.velocity, DVec2::new(1.0, -2.0));
    }

    #[test]
    fn influence_is_radius_squared_over_squared_distance() {
        let s = source(100.0, 100.0, 0.0, 0.0, 10.0);
        let v = s.influence(DVec2::new(110.0, 100.0));
        assert!((v - 1.0).abs() < 1e-12);
        let v = s.influence(DVec2::new(120.0, 100.0));
        assert!((v - 0.25).abs() < 1e-12);
    }

    #[test]
    fn influence_at_center_is_infinite() {
        let s = source(8.0, 8.0, 0.0, 0.0, 10.0);
        assert_eq!(s.influence(DVec2::new(8.0, 8.0)), f64::INFINITY);
    }

    #[test]
    fn ranges_for_default_domain() {
        let r = SourceRanges::for_domain(640.0, 640.0);
        assert_eq!(r.x, IntRange::new(160, 320));
        assert_eq!(r.y, IntRange::new(160, 320));
        assert_eq!(r.radius, IntRange::new(20, 100));
        assert_eq!(r.speed, IntRange::new(1, 3));
        assert!(r.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let mut r = SourceRanges::for_domain(640.0, 640.0);
        r.speed = IntRange::new(3, 1);
        assert!(matches!(
            r.validate(),
            Err(MetaballError::InvalidRange { ref name, .. }) if name == "speed"
        ));
    }

    #[test]
    fn validate_rejects_zero_radius() {
        let mut r = SourceRanges::for_domain(640.0, 640.0);
        r.radius = IntRange::new(0, 10);
        assert!(r.validate().is_err());
    }

    #[test]
    fn random_sources_respect_ranges() {
        let ranges = SourceRanges::for_domain(640.0, 640.0);
        let mut rng = Xorshift64::new(7);
        for _ in 0..500 {
            let s = Source::random(&mut rng, &ranges).unwrap();
            assert!((160.0..=320.0).contains(&s.center.x));
            assert!((160.0..=320.0).contains(&s.center.y));
            assert!((20.0..=100.0).contains(&s.radius()));
            assert!((1.0..=3.0).contains(&s.velocity.x));
            assert!((1.0..=3.0).contains(&s.velocity.y));
            assert_eq!(s.center.x.fract(), 0.0);
        }
    }

    #[test]
    fn random_is_reproducible_for_same_seed() {
        let ranges = SourceRanges::for_domain(640.0, 640.0);
        let mut a = Xorshift64::new(99);
        let mut b = Xorshift64::new(99);
        for _ in 0..20 {
            assert_eq!(
                Source::random(&mut a, &ranges).unwrap(),
                Source::random(&mut b, &ranges).unwrap()
            );
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn advance_always_moves_by_full_velocity(
                x in 0.0_f64..640.0,
                y in 0.0_f64..640.0,
                vx in -3.0_f64..3.0,
                vy in -3.0_f64..3.0,
                r in 1.0_f64..100.0,
            ) {
                let mut s = source(x, y, vx, vy, r);
                s.advance(BOUNDS);
                prop_assert_eq!(s.center, DVec2::new(x + vx, y + vy));
                prop_assert_eq!(s.velocity.x.abs(), vx.abs());
                prop_assert_eq!(s.velocity.y.abs(), vy.abs());
            }

            #[test]
            fn source_stays_near_domain_over_many_ticks(seed: u64) {
                let ranges = SourceRanges::for_domain(640.0, 640.0);
                let mut rng = Xorshift64::new(seed);
                let mut s = Source::random(&mut rng, &ranges).unwrap();
                let slack = s.radius() + 3.0;
                for _ in 0..2000 {
                    s.advance(BOUNDS);
                    prop_assert!(s.center.x > -slack && s.center.x < BOUNDS.width + slack);
                    prop_assert!(s.center.y > -slack && s.center.y < BOUNDS.height + slack);
                }
            }
        }
    }
}

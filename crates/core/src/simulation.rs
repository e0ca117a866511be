//! The per-tick pipeline: move sources, resample the grid, extract the contour.
//!
//! A [`Simulation`] owns its sources, one grid buffer and one segment buffer.
//! Both buffers are allocated once and overwritten every tick, so the grid
//! holds no state between ticks beyond what the sources imply.

use crate::config::SimulationConfig;
use crate::contour::extract_into;
use crate::error::MetaballError;
use crate::field::Field;
use crate::geometry::Segment;
use crate::prng::Xorshift64;
use crate::render::Frame;
use crate::sampler::fill_grid;
use crate::source::Source;
use tracing::{debug, trace};

/// Animated metaballs and their current threshold contour.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    rng: Xorshift64,
    sources: Vec<Source>,
    field: Field,
    segments: Vec<Segment>,
    tick: u64,
}

impl Simulation {
    /// Validates `config`, places `source_count` random sources drawn from
    /// `seed`, and computes the contour for tick 0.
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self, MetaballError> {
        config.validate()?;
        let (cols, rows) = config.grid_dimensions()?;
        let mut sim = Self {
            config,
            rng: Xorshift64::new(seed),
            sources: Vec::with_capacity(config.source_count),
            field: Field::new(cols, rows)?,
            segments: Vec::new(),
            tick: 0,
        };
        sim.populate()?;
        debug!(
            seed,
            cols,
            rows,
            sources = sim.sources.len(),
            "simulation created"
        );
        Ok(sim)
    }

    /// Builds a simulation around a fixed set of sources.
    ///
    /// `config.source_count` only matters for later resets.
    pub fn with_sources(
        config: SimulationConfig,
        sources: Vec<Source>,
        seed: u64,
    ) -> Result<Self, MetaballError> {
        config.validate()?;
        let (cols, rows) = config.grid_dimensions()?;
        let mut sim = Self {
            config,
            rng: Xorshift64::new(seed),
            sources,
            field: Field::new(cols, rows)?,
            segments: Vec::new(),
            tick: 0,
        };
        sim.recompute();
        Ok(sim)
    }

    /// One tick: every source moves, then the grid and contour are rebuilt.
    pub fn advance(&mut self) {
        let bounds = self.config.bounds();
        for source in &mut self.sources {
            source.advance(bounds);
        }
        self.recompute();
        self.tick += 1;
        trace!(tick = self.tick, segments = self.segments.len(), "tick");
    }

    /// Applies the per-tick reset trigger, then advances.
    pub fn advance_with_reset(&mut self, reset_requested: bool) -> Result<(), MetaballError> {
        if reset_requested {
            self.reset()?;
        }
        self.advance();
        Ok(())
    }

    /// Advances `steps` ticks, resetting before every `reset_every`-th one.
    ///
    /// A `reset_every` of 0 never resets. With `reset_every = 50` the resets
    /// land before steps 50, 100, ... (counting from 1).
    pub fn run(&mut self, steps: usize, reset_every: usize) -> Result<(), MetaballError> {
        for step in 0..steps {
            let due = reset_every > 0 && step % reset_every == reset_every - 1;
            self.advance_with_reset(due)?;
        }
        Ok(())
    }

    /// Replaces every source with a freshly randomized one and restarts at tick 0.
    ///
    /// Draws continue from the current PRNG stream, so successive resets
    /// place different sources yet stay reproducible for a given seed.
    pub fn reset(&mut self) -> Result<(), MetaballError> {
        self.populate()?;
        self.tick = 0;
        debug!(sources = self.sources.len(), "simulation reset");
        Ok(())
    }

    fn populate(&mut self) -> Result<(), MetaballError> {
        self.sources.clear();
        for _ in 0..self.config.source_count {
            let source = Source::random(&mut self.rng, &self.config.ranges)?;
            self.sources.push(source);
        }
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        fill_grid(&mut self.field, &self.sources, self.config.spacing);
        extract_into(
            &self.field,
            self.config.spacing,
            self.config.threshold,
            &mut self.segments,
        );
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// The sampled grid for the current tick.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// The contour for the current tick.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Ticks since construction or the last reset.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Everything a renderer needs for the current tick.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            bounds: self.config.bounds(),
            segments: &self.segments,
            sources: &self.sources,
        }
    }
}

#![deny(unsafe_code)]
//! Core of the metaballs contouring system.
//!
//! Moving circular [`Source`]s emit an inverse-square scalar field that is
//! sampled onto a regular [`Field`] grid; marching squares then turns the grid
//! into line [`Segment`]s along the threshold isocontour. A [`Simulation`]
//! ties the steps together per tick and hands a [`Frame`] to any
//! [`Renderer`]. Randomness goes through the seedable [`Xorshift64`], and a
//! [`Seed`] records a reproducible run.

pub mod config;
pub mod contour;
pub mod error;
pub mod field;
pub mod geometry;
pub mod params;
pub mod prng;
pub mod render;
pub mod sampler;
pub mod seed;
pub mod simulation;
pub mod source;

pub use config::SimulationConfig;
pub use contour::{extract, THRESHOLD};
pub use error::MetaballError;
pub use field::Field;
pub use geometry::{Bounds, Edge, Point, Segment};
pub use prng::Xorshift64;
pub use render::{Frame, Renderer};
pub use seed::Seed;
pub use simulation::Simulation;
pub use source::{Influence, Source, SourceRanges};

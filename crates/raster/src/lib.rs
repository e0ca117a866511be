#![deny(unsafe_code)]
//! CPU-side renderer for metaball frames.
//!
//! [`RasterCanvas`] implements [`Renderer`] by drawing each frame's contour
//! segments (and optionally the sources as guide circles) into an RGBA8
//! buffer. The `png` feature (default on) adds [`snapshot::write_png`].

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use metaballs_core::error::MetaballError;
use metaballs_core::render::{Frame, Renderer};
use tracing::trace;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }
}

/// Colors and toggles for drawing a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterStyle {
    pub background: Rgba,
    pub line: Rgba,
    pub guide: Rgba,
    /// Fill each source's circle underneath the contour.
    pub draw_guides: bool,
}

impl Default for RasterStyle {
    /// Yellow background, black contour, light grey guides.
    fn default() -> Self {
        Self {
            background: Rgba::opaque(254, 219, 0),
            line: Rgba::opaque(0, 0, 0),
            guide: Rgba::opaque(200, 200, 200),
            draw_guides: false,
        }
    }
}

/// A pixel buffer that renders every frame it is given, replacing the last.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    style: RasterStyle,
}

impl RasterCanvas {
    /// Creates a canvas of `width × height` pixels.
    ///
    /// Returns `MetaballError::InvalidDimensions` for a zero or overflowing size.
    pub fn new(width: usize, height: usize, style: RasterStyle) -> Result<Self, MetaballError> {
        let mut pixels = vec![0u8; pixel::buffer_len(width, height)?];
        pixel::clear(&mut pixels, style.background);
        Ok(Self {
            width,
            height,
            pixels,
            style,
        })
    }

    /// A canvas covering a simulation domain, one pixel per unit (rounded up).
    pub fn for_domain(width: f64, height: f64, style: RasterStyle) -> Result<Self, MetaballError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(MetaballError::InvalidDimensions);
        }
        Self::new(width.ceil() as usize, height.ceil() as usize, style)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major RGBA8 bytes of the last drawn frame.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn style(&self) -> &RasterStyle {
        &self.style
    }

    /// Color of pixel `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[i..i + 4]);
        Some(Rgba(px))
    }
}

impl Renderer for RasterCanvas {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), MetaballError> {
        pixel::draw_frame(
            &mut self.pixels,
            self.width,
            self.height,
            frame,
            &self.style,
        );
        trace!(segments = frame.segments.len(), "frame rasterized");
        Ok(())
    }
}

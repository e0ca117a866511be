//! Pure-computation drawing into an RGBA8 buffer.
//!
//! Domain coordinates map one-to-one onto pixels. Nothing here allocates
//! except [`frame_to_rgba`]; the canvas in the crate root reuses its buffer.

use glam::DVec2;
use metaballs_core::render::Frame;
use metaballs_core::MetaballError;

use crate::{RasterStyle, Rgba};

/// Byte length of a `width × height` RGBA8 buffer, rejecting empty or
/// overflowing sizes.
pub(crate) fn buffer_len(width: usize, height: usize) -> Result<usize, MetaballError> {
    if width == 0 || height == 0 {
        return Err(MetaballError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or(MetaballError::InvalidDimensions)
}

/// Plots one pixel, ignoring coordinates outside the buffer.
fn plot(pixels: &mut [u8], width: usize, height: usize, x: i64, y: i64, color: Rgba) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= width || y >= height {
        return;
    }
    let i = (y * width + x) * 4;
    pixels[i..i + 4].copy_from_slice(&color.0);
}

/// Fills the whole buffer with `color`.
pub fn clear(pixels: &mut [u8], color: Rgba) {
    pixels
        .chunks_exact_mut(4)
        .for_each(|px| px.copy_from_slice(&color.0));
}

/// Draws a line with a DDA walk, one sample per pixel along the major axis.
///
/// Non-finite endpoints draw nothing.
pub fn draw_line(
    pixels: &mut [u8],
    width: usize,
    height: usize,
    start: DVec2,
    end: DVec2,
    color: Rgba,
) {
    if !(start.is_finite() && end.is_finite()) {
        return;
    }
    let delta = end - start;
    let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0);
    // a finite but absurdly long segment would stall the walk
    if steps > (width + height) as f64 * 4.0 {
        return;
    }
    let step = delta / steps;
    for i in 0..=(steps as u64) {
        let p = start + step * i as f64;
        plot(
            pixels,
            width,
            height,
            p.x.round() as i64,
            p.y.round() as i64,
            color,
        );
    }
}

/// Fills a disc, testing pixel centers against the radius.
pub fn fill_circle(
    pixels: &mut [u8],
    width: usize,
    height: usize,
    center: DVec2,
    radius: f64,
    color: Rgba,
) {
    if !(center.is_finite() && radius.is_finite()) || radius <= 0.0 {
        return;
    }
    let x0 = (center.x - radius).floor().max(0.0) as i64;
    let y0 = (center.y - radius).floor().max(0.0) as i64;
    let x1 = (center.x + radius).ceil().min(width as f64) as i64;
    let y1 = (center.y + radius).ceil().min(height as f64) as i64;
    let r2 = radius * radius;
    for y in y0..y1 {
        for x in x0..x1 {
            let d = DVec2::new(x as f64 + 0.5, y as f64 + 0.5) - center;
            if d.length_squared() <= r2 {
                plot(pixels, width, height, x, y, color);
            }
        }
    }
}

/// Renders `frame` into `pixels` (length `width * height * 4`).
///
/// Guide circles go underneath the contour lines.
pub fn draw_frame(
    pixels: &mut [u8],
    width: usize,
    height: usize,
    frame: &Frame<'_>,
    style: &RasterStyle,
) {
    clear(pixels, style.background);
    if style.draw_guides {
        for source in frame.sources {
            fill_circle(
                pixels,
                width,
                height,
                source.center(),
                source.radius(),
                style.guide,
            );
        }
    }
    for segment in frame.segments {
        draw_line(pixels, width, height, segment.start, segment.end, style.line);
    }
}

/// Renders `frame` into a fresh RGBA8 buffer of `width * height * 4` bytes.
pub fn frame_to_rgba(
    frame: &Frame<'_>,
    width: usize,
    height: usize,
    style: &RasterStyle,
) -> Result<Vec<u8>, MetaballError> {
    let mut pixels = vec![0u8; buffer_len(width, height)?];
    draw_frame(&mut pixels, width, height, frame, style);
    Ok(pixels)
}

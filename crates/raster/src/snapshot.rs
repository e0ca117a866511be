//! PNG output of a [`RasterCanvas`].
//!
//! Feature-gated behind `png` (default on) so the pixel code can be used
//! without pulling in the `image` crate.

use metaballs_core::error::MetaballError;
use std::path::Path;

use crate::RasterCanvas;

/// Writes the canvas's last drawn frame as a PNG image.
///
/// Returns `MetaballError::InvalidDimensions` if the canvas does not fit in
/// `u32`, or `MetaballError::Io` on encode or write failure.
pub fn write_png(canvas: &RasterCanvas, path: &Path) -> Result<(), MetaballError> {
    let w = u32::try_from(canvas.width()).map_err(|_| MetaballError::InvalidDimensions)?;
    let h = u32::try_from(canvas.height()).map_err(|_| MetaballError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, canvas.pixels().to_vec())
        .ok_or_else(|| MetaballError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| MetaballError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RasterStyle;
    use metaballs_core::{Renderer, Simulation, SimulationConfig};

    #[test]
    fn write_png_round_trip() {
        let config = SimulationConfig::for_domain(64.0, 48.0);
        let sim = Simulation::new(config, 3).unwrap();
        let mut canvas = RasterCanvas::for_domain(64.0, 48.0, RasterStyle::default()).unwrap();
        canvas.draw(&sim.frame()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        write_png(&canvas, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 48);
        assert_eq!(img.as_raw().as_slice(), canvas.pixels());
    }

    #[test]
    fn write_png_to_missing_directory_is_io_error() {
        let canvas = RasterCanvas::new(4, 4, RasterStyle::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.png");
        assert!(matches!(
            write_png(&canvas, &path),
            Err(MetaballError::Io(_))
        ));
    }
}

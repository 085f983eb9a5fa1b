//! PNG output of rendered heatmaps.
//!
//! Feature-gated behind `png` (default on) so that WASM builds can depend on
//! this crate without pulling in the `image` crate.

use std::path::Path;

use crate::error::HeatmapError;
use crate::renderer::HeatmapRenderer;

/// Writes an RGBA8 buffer of `width × height` pixels as a PNG.
///
/// Returns `HeatmapError::InvalidDimensions` if the size is zero, overflows
/// `u32`, or does not match the buffer, and `HeatmapError::Io` on write failure.
pub fn write_png(
    rgba: Vec<u8>,
    width: usize,
    height: usize,
    path: &Path,
) -> Result<(), HeatmapError> {
    let invalid = || HeatmapError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    let w = u32::try_from(width).map_err(|_| invalid())?;
    let h = u32::try_from(height).map_err(|_| invalid())?;
    let img = image::RgbaImage::from_raw(w, h, rgba).ok_or_else(invalid)?;
    img.save(path)
        .map_err(|e| HeatmapError::Io(format!("{}: {e}", path.display())))
}

/// Writes the renderer's latest frame, markers included.
pub fn save_frame(renderer: &HeatmapRenderer, path: &Path) -> Result<(), HeatmapError> {
    write_png(renderer.rgba(), renderer.width(), renderer.height(), path)
}

//! Pure-computation pixel buffer conversion from [`FieldGrid`] + [`Palette`].
//!
//! This module has no feature gate so that both the `png` snapshot path and
//! the WASM `ImageData` path share the same conversion. Buffers are RGBA8,
//! with image row 0 at the top: the grid's highest row is drawn first so the
//! y axis points up, as on a chart.

use gravity_field_core::{FieldGrid, GridSpec, PointSource};

use crate::color::Srgb;
use crate::palette::Palette;

/// Largest supported number of output pixels per grid cell.
pub const MAX_SCALE: usize = 16;

/// Field values mapped to the ends of the palette.
///
/// Values below `min` take the first palette colour and values above `max`
/// the last.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRange {
    pub min: f64,
    pub max: f64,
}

impl ColorRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The fixed [0, 1] colour axis.
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Smallest to largest finite value in `grid`.
    pub fn fit(grid: &FieldGrid) -> Self {
        let (min, max) = grid
            .data()
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            Self::unit()
        } else {
            Self::new(min, max)
        }
    }

    /// Position of `value` within the range, in [0, 1]. A degenerate range
    /// maps everything to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if !(span > 0.0) || value.is_nan() {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

impl Default for ColorRange {
    fn default() -> Self {
        Self::unit()
    }
}

/// Maps grid values through a palette to an RGBA8 buffer.
///
/// Each cell becomes a `scale × scale` block, so the buffer is
/// `width * scale` by `height * scale` pixels. `scale` is clamped to
/// `1..=MAX_SCALE`.
pub fn field_to_rgba(
    grid: &FieldGrid,
    palette: &Palette,
    range: ColorRange,
    scale: usize,
) -> Vec<u8> {
    let scale = scale.clamp(1, MAX_SCALE);
    let (w, h) = (grid.width(), grid.height());
    let colors: Vec<[u8; 4]> = grid
        .data()
        .iter()
        .map(|&v| {
            let [r, g, b] = palette.sample(range.normalize(v)).to_rgb8();
            [r, g, b, 255u8]
        })
        .collect();

    let mut buf = Vec::with_capacity(w * h * scale * scale * 4);
    for row in (0..h).rev() {
        let line: Vec<u8> = colors[row * w..(row + 1) * w]
            .iter()
            .flat_map(|px| std::iter::repeat(*px).take(scale))
            .flatten()
            .collect();
        for _ in 0..scale {
            buf.extend_from_slice(&line);
        }
    }
    buf
}

/// Marker appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Disc radius in output pixels.
    pub radius: f64,
    pub color: Srgb,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 8.0,
            color: Srgb::from_rgb8(0x2c, 0xaf, 0xfe),
        }
    }
}

/// Paints a filled disc for each source onto an RGBA8 buffer produced by
/// [`field_to_rgba`] with the same `spec` and `scale`.
///
/// Sources outside the image are clipped.
pub fn draw_markers(
    buf: &mut [u8],
    spec: &GridSpec,
    scale: usize,
    sources: &[PointSource],
    style: MarkerStyle,
) {
    let scale = scale.clamp(1, MAX_SCALE);
    let img_w = spec.width * scale;
    let img_h = spec.height * scale;
    if buf.len() < img_w * img_h * 4 {
        return;
    }
    let [r, g, b] = style.color.to_rgb8();
    let radius = style.radius.max(0.0);
    let r2 = radius * radius;

    for source in sources {
        // Cell centres sit at (index + 0.5) * scale pixels.
        let cell = (source.position() - spec.origin) / spec.step;
        let cx = (cell.x + 0.5) * scale as f64;
        let cy = img_h as f64 - (cell.y + 0.5) * scale as f64;
        if !(cx.is_finite() && cy.is_finite()) {
            continue;
        }

        let x0 = (cx - radius).floor().max(0.0) as usize;
        let y0 = (cy - radius).floor().max(0.0) as usize;
        let x1 = ((cx + radius).ceil().max(0.0) as usize).min(img_w);
        let y1 = ((cy + radius).ceil().max(0.0) as usize).min(img_h);

        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    let i = (py * img_w + px) * 4;
                    buf[i..i + 4].copy_from_slice(&[r, g, b, 255]);
                }
            }
        }
    }
}

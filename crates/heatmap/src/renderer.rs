//! [`Renderer`] that rasterizes each published grid into an RGBA image.

use gravity_field_core::{FieldGrid, GridSpec, PointSource, Renderer};
use tracing::trace;

use crate::error::HeatmapError;
use crate::palette::Palette;
use crate::pixel::{draw_markers, field_to_rgba, ColorRange, MarkerStyle, MAX_SCALE};

/// How the colour range is chosen for each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeMode {
    /// A fixed colour axis.
    Fixed(ColorRange),
    /// Fitted to the smallest and largest values of each frame.
    Fit,
}

/// Heatmap image kept up to date with the session.
///
/// The field is rasterized on every publish; markers are composited on top
/// when [`HeatmapRenderer::rgba`] is called.
#[derive(Debug, Clone)]
pub struct HeatmapRenderer {
    palette: Palette,
    range: RangeMode,
    scale: usize,
    style: MarkerStyle,
    spec: Option<GridSpec>,
    base: Vec<u8>,
    markers: Vec<PointSource>,
}

impl HeatmapRenderer {
    /// Creates a renderer drawing each cell as a `scale × scale` block.
    ///
    /// Returns `HeatmapError::InvalidScale` unless `scale` is in
    /// `1..=MAX_SCALE`.
    pub fn new(palette: Palette, range: RangeMode, scale: usize) -> Result<Self, HeatmapError> {
        if !(1..=MAX_SCALE).contains(&scale) {
            return Err(HeatmapError::InvalidScale {
                scale,
                max: MAX_SCALE,
            });
        }
        Ok(Self {
            palette,
            range,
            scale,
            style: MarkerStyle::default(),
            spec: None,
            base: Vec::new(),
            markers: Vec::new(),
        })
    }

    pub fn with_marker_style(mut self, style: MarkerStyle) -> Self {
        self.style = style;
        self
    }

    /// Output image width in pixels (0 before the first publish).
    pub fn width(&self) -> usize {
        self.spec.map_or(0, |s| s.width * self.scale)
    }

    /// Output image height in pixels (0 before the first publish).
    pub fn height(&self) -> usize {
        self.spec.map_or(0, |s| s.height * self.scale)
    }

    pub fn markers(&self) -> &[PointSource] {
        &self.markers
    }

    /// The latest frame as RGBA8, markers included.
    pub fn rgba(&self) -> Vec<u8> {
        let mut buf = self.base.clone();
        if let Some(spec) = &self.spec {
            draw_markers(&mut buf, spec, self.scale, &self.markers, self.style);
        }
        buf
    }
}

impl Renderer for HeatmapRenderer {
    fn replace_field(&mut self, grid: &FieldGrid) {
        let range = match self.range {
            RangeMode::Fixed(range) => range,
            RangeMode::Fit => ColorRange::fit(grid),
        };
        self.base = field_to_rgba(grid, &self.palette, range, self.scale);
        self.spec = Some(*grid.spec());
        trace!(width = self.width(), height = self.height(), "heatmap rasterized");
    }

    fn replace_markers(&mut self, sources: &[PointSource]) {
        self.markers = sources.to_vec();
    }
}

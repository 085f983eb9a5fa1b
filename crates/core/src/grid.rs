//! Fixed-size sampling grid and the dense scalar array produced on it.
//!
//! A [`GridSpec`] fixes the grid dimensions and the affine map from cell
//! indices to logical coordinates: cell `(col, row)` sits at
//! `origin + (col, row) * step`. A [`FieldGrid`] stores one `f64` per cell in
//! row-major layout (`row * width + col`).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Largest supported grid, in cells (256 × 256).
pub const MAX_CELLS: usize = 256 * 256;

/// Dimensions and coordinate mapping of a sampling grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub width: usize,
    pub height: usize,
    pub origin: DVec2,
    pub step: DVec2,
}

impl GridSpec {
    /// Creates a grid spec, validating dimensions and step.
    ///
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero,
    /// `FieldError::GridTooLarge` above [`MAX_CELLS`], and
    /// `FieldError::InvalidStep` if a step component is not finite and
    /// positive.
    pub fn new(
        width: usize,
        height: usize,
        origin: DVec2,
        step: DVec2,
    ) -> Result<Self, FieldError> {
        let spec = Self {
            width,
            height,
            origin,
            step,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// One cell per logical unit, starting at the origin.
    pub fn unit(width: usize, height: usize) -> Result<Self, FieldError> {
        Self::new(width, height, DVec2::ZERO, DVec2::ONE)
    }

    /// Checks dimensions and step.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.width == 0 || self.height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let cells = self.width.saturating_mul(self.height);
        if cells > MAX_CELLS {
            return Err(FieldError::GridTooLarge {
                cells,
                max: MAX_CELLS,
            });
        }
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.step.x) || !ok(self.step.y) || !self.origin.is_finite() {
            return Err(FieldError::InvalidStep {
                x: self.step.x,
                y: self.step.y,
            });
        }
        Ok(())
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false for a validated spec.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Logical coordinate of cell `(col, row)`.
    pub fn coordinate(&self, col: usize, row: usize) -> DVec2 {
        self.origin + DVec2::new(col as f64, row as f64) * self.step
    }
}

/// Dense row-major scalar values over a [`GridSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGrid {
    spec: GridSpec,
    data: Vec<f64>,
}

impl FieldGrid {
    /// Creates a zero-filled grid.
    pub fn zeros(spec: GridSpec) -> Result<Self, FieldError> {
        spec.validate()?;
        Ok(Self {
            spec,
            data: vec![0.0; spec.len()],
        })
    }

    /// Creates a grid from pre-computed row-major values, validating that
    /// `data.len() == width * height`.
    pub fn from_data(spec: GridSpec, data: Vec<f64>) -> Result<Self, FieldError> {
        spec.validate()?;
        if data.len() != spec.len() {
            return Err(FieldError::DimensionMismatch {
                lhs_w: spec.width,
                lhs_h: spec.height,
                rhs_w: data.len(),
                rhs_h: 1,
            });
        }
        Ok(Self { spec, data })
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.spec.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.spec.height
    }

    /// Read-only access to the row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Value at cell `(col, row)`, or `None` out of bounds.
    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        if col >= self.spec.width || row >= self.spec.height {
            return None;
        }
        Some(self.data[row * self.spec.width + col])
    }

    /// Largest value in the grid.
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest value in the grid.
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Rows as slices, lowest row first.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks(self.spec.width)
    }

    /// Iterates over all cells yielding `(col, row, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let w = self.spec.width;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % w, i / w, v))
    }
}

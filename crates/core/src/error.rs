//! Error types for the gravity-field core.

use thiserror::Error;

/// Errors produced by grid, source set, and scene operations.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Width or height was zero when creating a grid.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A grid had more cells than the sampler supports.
    #[error("grid of {cells} cells exceeds the maximum of {max}")]
    GridTooLarge { cells: usize, max: usize },

    /// A grid step was zero, negative, or not finite.
    #[error("invalid grid step ({x}, {y}): both components must be finite and positive")]
    InvalidStep { x: f64, y: f64 },

    /// A data buffer did not match the declared grid dimensions.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// A marker index did not name a source in the set.
    #[error("source index {index} out of range for {len} sources")]
    SourceIndexOutOfRange { index: usize, len: usize },

    /// A source coordinate was NaN or infinite.
    #[error("non-finite source coordinate ({x}, {y})")]
    NonFiniteSource { x: f64, y: f64 },

    /// A preset name was not recognized.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A scene failed validation.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// A scene file could not be read or written.
    #[error("i/o error: {0}")]
    Io(String),
}

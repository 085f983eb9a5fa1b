//! Error types for heatmap rendering.

use thiserror::Error;

/// Errors produced by colour parsing, palettes, and snapshot output.
#[derive(Debug, Error)]
pub enum HeatmapError {
    /// A colour string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given stops.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A palette name was not recognized.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// Image dimensions were zero or did not fit the output format.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Pixels per cell was zero or above the supported maximum.
    #[error("invalid scale {scale}: must be between 1 and {max}")]
    InvalidScale { scale: usize, max: usize },

    /// Writing a snapshot failed.
    #[error("i/o error: {0}")]
    Io(String),
}

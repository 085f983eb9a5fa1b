#![deny(unsafe_code)]
//! Heatmap rendering for gravity-field sessions.
//!
//! This crate is the rendering side of the session boundary: it owns colour
//! mapping (`Palette`, `ColorRange`), rasterization to RGBA8, marker
//! overlays, and PNG snapshots. Both the CLI and the WASM bindings use it.

pub mod color;
pub mod error;
pub mod palette;
pub mod pixel;
pub mod renderer;

#[cfg(feature = "png")]
pub mod snapshot;

pub use color::Srgb;
pub use error::HeatmapError;
pub use palette::Palette;
pub use pixel::{ColorRange, MarkerStyle};
pub use renderer::{HeatmapRenderer, RangeMode};

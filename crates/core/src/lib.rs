#![deny(unsafe_code)]
//! Core types for the gravity-field heatmap.
//!
//! Provides the inverse-square [`Potential`] evaluator, the [`GridSpec`] /
//! [`FieldGrid`] sampling grid, the mutable [`SourceSet`], the
//! [`FieldSession`] update loop, the [`Renderer`] boundary, and the
//! serializable [`Scene`] configuration with its presets.

pub mod error;
pub mod grid;
pub mod params;
pub mod potential;
pub mod publish;
pub mod sampler;
pub mod scene;
pub mod session;
pub mod source;

pub use error::FieldError;
pub use grid::{FieldGrid, GridSpec, MAX_CELLS};
pub use potential::{potential, CoincidencePolicy, Potential};
pub use publish::{FrameBuffer, Renderer};
pub use scene::{Preset, Scene};
pub use session::FieldSession;
pub use source::{PointSource, Removal, SourceSet};

pub use glam::DVec2;

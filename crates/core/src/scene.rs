//! Serializable session configuration and the built-in presets.
//!
//! A [`Scene`] captures everything needed to start a session: the sampling
//! grid, the seed sources, the evaluator settings, and how clicks and
//! markers are handled. Scenes round-trip through JSON files.

use std::fs;
use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FieldError;
use crate::grid::GridSpec;
use crate::params::Overrides;
use crate::potential::{CoincidencePolicy, Potential};
use crate::source::{PointSource, SourceSet};

/// Named presets.
const PRESET_NAMES: &[&str] = &["markers", "saturated"];

/// Built-in session variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// 100 × 100 unit cells, coincident sources skipped, markers shown and
    /// removable.
    Markers,
    /// 256 × 256 unit cells, epsilon denominator clamped at 1.0, clicks
    /// snapped to whole cells.
    Saturated,
}

impl Preset {
    /// Looks up a preset by name.
    ///
    /// Returns `FieldError::UnknownPreset` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name {
            "markers" => Ok(Preset::Markers),
            "saturated" => Ok(Preset::Saturated),
            _ => Err(FieldError::UnknownPreset(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Markers => "markers",
            Preset::Saturated => "saturated",
        }
    }

    /// Returns a slice of all recognized preset names.
    pub fn list_names() -> &'static [&'static str] {
        PRESET_NAMES
    }

    /// The scene this preset starts from.
    pub fn scene(self) -> Scene {
        match self {
            Preset::Markers => Scene {
                grid: unit_grid(100),
                sources: seed(&[(20.0, 20.0), (25.0, 25.0)]),
                potential: Potential::new(CoincidencePolicy::Skip),
                snap: false,
                markers: true,
            },
            Preset::Saturated => Scene {
                grid: unit_grid(256),
                sources: seed(&[(25.0, 25.0), (30.0, 30.0)]),
                potential: Potential::new(CoincidencePolicy::Epsilon).with_ceiling(1.0),
                snap: true,
                markers: false,
            },
        }
    }
}

fn unit_grid(size: usize) -> GridSpec {
    GridSpec {
        width: size,
        height: size,
        origin: DVec2::ZERO,
        step: DVec2::ONE,
    }
}

fn seed(points: &[(f64, f64)]) -> SourceSet {
    SourceSet::new(points.iter().copied().map(PointSource::from)).unwrap_or_default()
}

/// Complete starting configuration for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub grid: GridSpec,
    pub sources: SourceSet,
    pub potential: Potential,
    /// Round click coordinates to whole numbers before adding a source.
    #[serde(default)]
    pub snap: bool,
    /// Publish marker positions alongside the field.
    #[serde(default)]
    pub markers: bool,
}

impl Scene {
    /// Checks the grid, the seed sources, and the ceiling.
    pub fn validate(&self) -> Result<(), FieldError> {
        self.grid.validate()?;
        if self.sources.is_empty() {
            return Err(FieldError::InvalidScene(
                "scene requires at least one source".into(),
            ));
        }
        if let Some(bad) = self.sources.iter().find(|s| !s.position().is_finite()) {
            return Err(FieldError::NonFiniteSource {
                x: bad.x(),
                y: bad.y(),
            });
        }
        if let Some(ceiling) = self.potential.ceiling {
            if !(ceiling.is_finite() && ceiling > 0.0) {
                return Err(FieldError::InvalidScene(format!(
                    "ceiling must be finite and positive, got {ceiling}"
                )));
            }
        }
        Ok(())
    }

    /// Applies a JSON object of overrides, keeping current values for keys
    /// that are missing or mistyped.
    ///
    /// Recognized keys: `width`, `height`, `step`, `origin_x`, `origin_y`,
    /// `policy` (`"skip"` / `"epsilon"`), `ceiling` (number, or `null` to
    /// remove), `snap`, `markers`, `sources` (list of `[x, y]`).
    pub fn with_overrides(mut self, params: &Value) -> Result<Self, FieldError> {
        let o = Overrides::new(params);

        self.grid.width = o.usize("width", self.grid.width);
        self.grid.height = o.usize("height", self.grid.height);
        self.grid.origin = DVec2::new(
            o.f64("origin_x", self.grid.origin.x),
            o.f64("origin_y", self.grid.origin.y),
        );
        if o.has("step") {
            let step = o.f64("step", self.grid.step.x);
            self.grid.step = DVec2::splat(step);
        }

        self.potential.policy = match o.string("policy", "").as_str() {
            "skip" => CoincidencePolicy::Skip,
            "epsilon" => CoincidencePolicy::Epsilon,
            "" => self.potential.policy,
            other => {
                return Err(FieldError::InvalidScene(format!(
                    "unknown coincidence policy '{other}'"
                )))
            }
        };
        self.potential.ceiling = o.optional_f64("ceiling", self.potential.ceiling);
        self.snap = o.bool("snap", self.snap);
        self.markers = o.bool("markers", self.markers);

        if let Some(points) = o.points("sources")? {
            self.sources = SourceSet::new(points)?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Reads and validates a scene from a JSON file.
    pub fn load(path: &Path) -> Result<Self, FieldError> {
        let text = fs::read_to_string(path)
            .map_err(|e| FieldError::Io(format!("{}: {e}", path.display())))?;
        let scene: Scene =
            serde_json::from_str(&text).map_err(|e| FieldError::InvalidScene(e.to_string()))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Writes the scene as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), FieldError> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| FieldError::InvalidScene(e.to_string()))?;
        fs::write(path, text).map_err(|e| FieldError::Io(format!("{}: {e}", path.display())))
    }
}

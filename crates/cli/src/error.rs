//! Failures surfaced by the `gravity-field` binary.
//!
//! Every failure falls into one of four classes. The class picks the
//! process exit status; clap's own usage errors exit with 2 before any of
//! this runs.
//!
//! | class          | status | raised by                                          |
//! |----------------|--------|----------------------------------------------------|
//! | field          | 10     | grid limits, non-finite sources, marker index      |
//! | io             | 11     | scene files, PNG output                            |
//! | input          | 12     | preset, palette, scale, `--params`, scene contents |
//! | serialization  | 13     | JSON encoding                                      |

use gravity_field_core::FieldError;
use gravity_field_heatmap::HeatmapError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Field(FieldError),
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Input(String),
    #[error("json: {0}")]
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Field(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

/// Scene problems are the user's input; session and grid failures stay
/// field errors.
impl From<FieldError> for CliError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Io(msg) => CliError::Io(msg),
            FieldError::UnknownPreset(_) | FieldError::InvalidScene(_) => {
                CliError::Input(e.to_string())
            }
            other => CliError::Field(other),
        }
    }
}

/// Only a failed PNG write is I/O; everything else is a bad flag value.
impl From<HeatmapError> for CliError {
    fn from(e: HeatmapError) -> Self {
        match e {
            HeatmapError::Io(msg) => CliError::Io(msg),
            other => CliError::Input(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravity_field_core::{FieldSession, FrameBuffer, Preset, Scene};
    use gravity_field_heatmap::{snapshot, HeatmapRenderer, Palette, RangeMode};

    #[test]
    fn marker_index_past_end_exits_with_field_status() {
        let mut session = FieldSession::new(Preset::Markers.scene(), FrameBuffer::new()).unwrap();
        let err = CliError::from(session.on_marker_click(9).unwrap_err());
        assert_eq!(err.exit_code(), 10);
        assert_eq!(err.to_string(), "source index 9 out of range for 2 sources");
    }

    #[test]
    fn oversized_grid_override_exits_with_field_status() {
        let scene = Preset::Saturated.scene();
        let err = scene.with_overrides(&serde_json::json!({"width": 1024})).unwrap_err();
        assert_eq!(CliError::from(err).exit_code(), 10);
    }

    #[test]
    fn missing_scene_file_exits_with_io_status() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliError::from(Scene::load(&dir.path().join("nope.json")).unwrap_err());
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("nope.json"), "{err}");
    }

    #[test]
    fn unwritable_png_exits_with_io_status() {
        let renderer = HeatmapRenderer::new(Palette::hot(), RangeMode::Fit, 1).unwrap();
        let session = FieldSession::new(Preset::Markers.scene(), renderer).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.png");
        let err = CliError::from(snapshot::save_frame(session.renderer(), &path).unwrap_err());
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn unknown_preset_and_palette_exit_with_input_status() {
        let preset = CliError::from(Preset::from_name("contour").unwrap_err());
        let palette = CliError::from(Palette::from_name("viridis").unwrap_err());
        assert_eq!(preset.exit_code(), 12);
        assert_eq!(palette.exit_code(), 12);
        assert!(palette.to_string().contains("viridis"));
    }

    #[test]
    fn json_failure_exits_with_serialization_status() {
        let err = serde_json::from_str::<serde_json::Value>("{\"sources\": [").unwrap_err();
        let cli_err = CliError::from(err);
        assert_eq!(cli_err.exit_code(), 13);
        assert!(cli_err.to_string().starts_with("json: "));
    }
}

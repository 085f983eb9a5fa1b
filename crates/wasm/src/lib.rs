#![deny(unsafe_code)]
//! WASM bindings: a [`GravityField`] session driven by canvas clicks.
//!
//! The page converts a click to field coordinates and calls
//! `on_background_click` or `on_marker_click`; each call recomputes the grid
//! before returning, after which `field()`/`rgba()` hold the new frame.

use std::fmt::Display;

use gravity_field_core::{DVec2, FieldError, FieldSession, Preset};
use gravity_field_heatmap::{ColorRange, HeatmapRenderer, Palette, RangeMode};
use wasm_bindgen::prelude::*;

fn to_js(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct GravityField {
    session: FieldSession<HeatmapRenderer>,
}

impl GravityField {
    fn try_new(preset: &str) -> Result<Self, FieldError> {
        let range = RangeMode::Fixed(ColorRange::unit());
        let renderer = HeatmapRenderer::new(Palette::magma(), range, 1)
            .map_err(|e| FieldError::InvalidScene(e.to_string()))?;
        let session = FieldSession::new(Preset::from_name(preset)?.scene(), renderer)?;
        Ok(Self { session })
    }
}

#[wasm_bindgen]
impl GravityField {
    /// Starts a session from a preset (`"markers"` or `"saturated"`).
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str) -> Result<GravityField, JsValue> {
        Self::try_new(preset).map_err(to_js)
    }

    pub fn width(&self) -> usize {
        self.session.grid().width()
    }

    pub fn height(&self) -> usize {
        self.session.grid().height()
    }

    /// Adds a source at field coordinates `(x, y)`.
    pub fn on_background_click(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.session
            .on_background_click(DVec2::new(x, y))
            .map(|_| ())
            .map_err(to_js)
    }

    /// Removes the source at `index`. Returns false if it was the last one.
    pub fn on_marker_click(&mut self, index: usize) -> Result<bool, JsValue> {
        self.session.on_marker_click(index).map_err(to_js)
    }

    /// Removes the source nearest `(x, y)` within `radius`, if any.
    pub fn on_marker_click_near(&mut self, x: f64, y: f64, radius: f64) -> Result<bool, JsValue> {
        self.session
            .on_marker_click_near(DVec2::new(x, y), radius)
            .map_err(to_js)
    }

    /// Row-major potential values, `width * height` long.
    pub fn field(&self) -> Vec<f64> {
        self.session.grid().data().to_vec()
    }

    /// Source positions flattened as `[x0, y0, x1, y1, ...]`.
    pub fn markers(&self) -> Vec<f64> {
        self.session
            .sources()
            .iter()
            .flat_map(|s| [s.x(), s.y()])
            .collect()
    }

    /// Current frame as RGBA8 for `ImageData`, y axis up.
    pub fn rgba(&self) -> Vec<u8> {
        self.session.renderer().rgba()
    }
}

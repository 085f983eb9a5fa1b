//! Colour scales for mapping normalized field values to colours.
//!
//! A [`Palette`] is a list of positioned stops over [0, 1]. Sampling finds
//! the segment containing `t` and blends its two stops in sRGB.

use crate::color::Srgb;
use crate::error::HeatmapError;

/// Named palettes.
const PALETTE_NAMES: &[&str] = &["magma", "hot", "grayscale"];

/// Positioned colour stops, sorted by position, spanning [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    stops: Vec<(f64, Srgb)>,
}

impl Palette {
    /// Creates a palette from `(position, colour)` stops.
    ///
    /// Requires at least one stop, positions in [0, 1], and positions in
    /// non-decreasing order.
    pub fn new(stops: Vec<(f64, Srgb)>) -> Result<Self, HeatmapError> {
        if stops.is_empty() {
            return Err(HeatmapError::InvalidPalette(
                "palette requires at least 1 stop".to_string(),
            ));
        }
        if let Some((pos, _)) = stops.iter().find(|(p, _)| !(0.0..=1.0).contains(p)) {
            return Err(HeatmapError::InvalidPalette(format!(
                "stop position {pos} outside [0, 1]"
            )));
        }
        if stops.windows(2).any(|w| w[1].0 < w[0].0) {
            return Err(HeatmapError::InvalidPalette(
                "stop positions must be non-decreasing".to_string(),
            ));
        }
        Ok(Self { stops })
    }

    /// Creates a palette from positioned hex stops.
    pub fn from_hex_stops(stops: &[(f64, &str)]) -> Result<Self, HeatmapError> {
        let parsed = stops
            .iter()
            .map(|&(pos, hex)| Srgb::from_hex(hex).map(|c| (pos, c)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    /// Creates a palette of evenly spaced hex colours.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, HeatmapError> {
        let last = hexes.len().saturating_sub(1).max(1) as f64;
        let stops: Vec<(f64, &str)> = hexes
            .iter()
            .enumerate()
            .map(|(i, &h)| (i as f64 / last, h))
            .collect();
        Self::from_hex_stops(&stops)
    }

    /// Looks up a built-in palette by name.
    pub fn from_name(name: &str) -> Result<Self, HeatmapError> {
        match name {
            "magma" => Ok(Self::magma()),
            "hot" => Ok(Self::hot()),
            "grayscale" => Ok(Self::grayscale()),
            _ => Err(HeatmapError::UnknownPalette(name.to_string())),
        }
    }

    /// Returns a slice of all built-in palette names.
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Samples the palette at `t`, clamped to [0, 1]. NaN samples as 0.
    ///
    /// Below the first stop the first colour is returned, above the last
    /// stop the last colour.
    pub fn sample(&self, t: f64) -> Srgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let upper = self.stops.partition_point(|&(p, _)| p <= t);
        match upper {
            0 => self.stops[0].1,
            n if n == self.stops.len() => self.stops[n - 1].1,
            n => {
                let (p0, c0) = self.stops[n - 1];
                let (p1, c1) = self.stops[n];
                c0.lerp(c1, (t - p0) / (p1 - p0)).clamped()
            }
        }
    }

    // -- Built-in palettes --

    /// Near-black through purple and orange to pale yellow.
    pub fn magma() -> Self {
        Self::builtin(&[
            (0.0, "#000004"),
            (0.1, "#140B3A"),
            (0.2, "#3B0F70"),
            (0.3, "#641A80"),
            (0.4, "#8C2981"),
            (0.5, "#B63679"),
            (0.6, "#E65163"),
            (0.7, "#FB8761"),
            (0.8, "#FEC287"),
            (0.9, "#FEEE9E"),
            (1.0, "#FCFDBF"),
        ])
    }

    /// Black through red and yellow to white.
    pub fn hot() -> Self {
        Self::builtin(&[
            (0.0, "#000000"),
            (0.3, "#e60000"),
            (0.6, "#ffd200"),
            (1.0, "#ffffff"),
        ])
    }

    /// Black to white.
    pub fn grayscale() -> Self {
        Self {
            stops: vec![(0.0, Srgb::BLACK), (1.0, Srgb::WHITE)],
        }
    }

    fn builtin(stops: &[(f64, &str)]) -> Self {
        Self::from_hex_stops(stops).unwrap_or_else(|_| Self::grayscale())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_named_palette_resolves() {
        for name in Palette::list_names() {
            let palette = Palette::from_name(name).unwrap();
            assert!(palette.len() >= 2, "{name} has too few stops");
        }
    }

    #[test]
    fn builtin_palettes_parse_without_fallback() {
        assert_eq!(Palette::magma().len(), 11);
        assert_eq!(Palette::hot().len(), 4);
    }

    #[test]
    fn unknown_name_is_error() {
        assert!(matches!(
            Palette::from_name("viridis"),
            Err(HeatmapError::UnknownPalette(_))
        ));
    }

    #[test]
    fn sample_hits_stops_exactly() {
        let magma = Palette::magma();
        assert_eq!(magma.sample(0.0).to_hex(), "#000004");
        assert_eq!(magma.sample(0.8).to_hex(), "#fec287");
        assert_eq!(magma.sample(1.0).to_hex(), "#fcfdbf");
    }

    #[test]
    fn sample_interpolates_between_stops() {
        let gray = Palette::grayscale();
        let mid = gray.sample(0.25);
        assert!((mid.r - 0.25).abs() < 1e-12);
        assert!((mid.g - 0.25).abs() < 1e-12);
    }

    #[test]
    fn sample_clamps_and_handles_nan() {
        let hot = Palette::hot();
        assert_eq!(hot.sample(-3.0), hot.sample(0.0));
        assert_eq!(hot.sample(7.0), hot.sample(1.0));
        assert_eq!(hot.sample(f64::NAN), hot.sample(0.0));
    }

    #[test]
    fn single_stop_palette_is_constant() {
        let p = Palette::new(vec![(0.5, Srgb::WHITE)]).unwrap();
        assert_eq!(p.sample(0.0), Srgb::WHITE);
        assert_eq!(p.sample(1.0), Srgb::WHITE);
    }

    #[test]
    fn from_hex_spaces_evenly() {
        let p = Palette::from_hex(&["#000000", "#808080", "#ffffff"]).unwrap();
        assert_eq!(p.sample(0.5).to_hex(), "#808080");
    }

    #[test]
    fn new_rejects_empty() {
        assert!(matches!(
            Palette::new(vec![]),
            Err(HeatmapError::InvalidPalette(_))
        ));
    }

    #[test]
    fn new_rejects_unsorted_or_out_of_range_stops() {
        assert!(Palette::new(vec![(0.6, Srgb::BLACK), (0.2, Srgb::WHITE)]).is_err());
        assert!(Palette::new(vec![(0.0, Srgb::BLACK), (1.5, Srgb::WHITE)]).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn samples_stay_in_gamut(t in prop::num::f64::ANY) {
                for name in Palette::list_names() {
                    let c = Palette::from_name(name).unwrap().sample(t);
                    for channel in [c.r, c.g, c.b] {
                        prop_assert!((0.0..=1.0).contains(&channel), "{name} at {t}: {c:?}");
                    }
                }
            }
        }
    }
}

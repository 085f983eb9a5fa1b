//! The update loop: owns the source set and the grid, and republishes the
//! full grid after every mutation.
//!
//! A [`FieldSession`] replaces ambient global state with one explicit context
//! object. The rendering collaborator drives it through two synchronous entry
//! points, [`FieldSession::on_background_click`] and
//! [`FieldSession::on_marker_click`]. Each call finishes recomputing and
//! publishing before it returns, so mutations are processed strictly in order.

use glam::DVec2;
use tracing::debug;

use crate::error::FieldError;
use crate::grid::FieldGrid;
use crate::potential::Potential;
use crate::publish::Renderer;
use crate::sampler;
use crate::scene::Scene;
use crate::source::{PointSource, Removal, SourceSet};

/// Interactive field session bound to a renderer.
pub struct FieldSession<R> {
    sources: SourceSet,
    grid: FieldGrid,
    potential: Potential,
    snap: bool,
    markers: bool,
    renderer: R,
}

impl<R: Renderer> FieldSession<R> {
    /// Validates `scene`, computes the initial grid, and publishes it.
    pub fn new(scene: Scene, renderer: R) -> Result<Self, FieldError> {
        scene.validate()?;
        let grid = sampler::sample(scene.grid, &scene.sources, &scene.potential)?;
        let mut session = Self {
            sources: scene.sources,
            grid,
            potential: scene.potential,
            snap: scene.snap,
            markers: scene.markers,
            renderer,
        };
        debug!(
            width = session.grid.width(),
            height = session.grid.height(),
            sources = session.sources.len(),
            "session started"
        );
        session.publish();
        Ok(session)
    }

    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    /// The most recently computed grid.
    pub fn grid(&self) -> &FieldGrid {
        &self.grid
    }

    pub fn potential(&self) -> &Potential {
        &self.potential
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Current state as a scene, suitable for saving and restarting.
    pub fn scene(&self) -> Scene {
        Scene {
            grid: *self.grid.spec(),
            sources: self.sources.clone(),
            potential: self.potential,
            snap: self.snap,
            markers: self.markers,
        }
    }

    /// Adds a source at `coord` and recomputes.
    ///
    /// With snapping enabled the coordinate is rounded to whole numbers
    /// first. Returns the source as stored.
    pub fn on_background_click(&mut self, coord: DVec2) -> Result<PointSource, FieldError> {
        let coord = if self.snap { coord.round() } else { coord };
        let source = PointSource(coord);
        self.sources.push(source)?;
        debug!(x = coord.x, y = coord.y, sources = self.sources.len(), "source added");
        self.recompute();
        Ok(source)
    }

    /// Removes the marker at `index` and recomputes.
    ///
    /// Returns `Ok(false)` without recomputing when only one source remains.
    pub fn on_marker_click(&mut self, index: usize) -> Result<bool, FieldError> {
        match self.sources.remove(index)? {
            Removal::Removed(source) => {
                debug!(index, x = source.x(), y = source.y(), "source removed");
                self.recompute();
                Ok(true)
            }
            Removal::Refused => {
                debug!(index, "removal refused: last remaining source");
                Ok(false)
            }
        }
    }

    /// Removes the marker nearest to `coord` within `radius`.
    ///
    /// Returns `Ok(false)` if no marker is close enough or the removal is
    /// refused.
    pub fn on_marker_click_near(&mut self, coord: DVec2, radius: f64) -> Result<bool, FieldError> {
        match self.sources.nearest(coord, radius) {
            Some(index) => self.on_marker_click(index),
            None => {
                debug!(x = coord.x, y = coord.y, radius, "no marker near click");
                Ok(false)
            }
        }
    }

    fn recompute(&mut self) {
        sampler::resample(&mut self.grid, &self.sources, &self.potential);
        self.publish();
    }

    fn publish(&mut self) {
        self.renderer.replace_field(&self.grid);
        if self.markers {
            self.renderer.replace_markers(self.sources.as_slice());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;
    use crate::potential::CoincidencePolicy;
    use crate::publish::FrameBuffer;
    use crate::scene::Preset;

    fn scene(points: &[(f64, f64)], size: usize) -> Scene {
        Scene {
            grid: GridSpec::unit(size, size).unwrap(),
            sources: SourceSet::new(points.iter().copied().map(PointSource::from)).unwrap(),
            potential: Potential::new(CoincidencePolicy::Skip),
            snap: false,
            markers: true,
        }
    }

    fn session(points: &[(f64, f64)], size: usize) -> FieldSession<FrameBuffer> {
        FieldSession::new(scene(points, size), FrameBuffer::new()).unwrap()
    }

    #[test]
    fn startup_publishes_once() {
        let s = session(&[(20.0, 20.0), (25.0, 25.0)], 100);
        assert_eq!(s.renderer().publishes(), 1);
        assert_eq!(s.renderer().field(), Some(s.grid()));
        assert_eq!(s.renderer().markers(), s.sources().as_slice());
    }

    #[test]
    fn single_seed_skip_policy_values() {
        let s = session(&[(25.0, 25.0)], 100);
        assert_eq!(s.grid().get(25, 25), Some(0.0));
        assert_eq!(s.grid().get(26, 25), Some(1.0));
    }

    #[test]
    fn two_sources_midpoint_value() {
        let s = session(&[(0.0, 0.0), (10.0, 0.0)], 16);
        let v = s.grid().get(5, 0).unwrap();
        assert!((v - 0.08).abs() < 1e-15, "expected 0.08, got {v}");
    }

    #[test]
    fn background_click_appends_and_recomputes() {
        let mut s = session(&[(20.0, 20.0), (25.0, 25.0)], 100);
        let before = s.grid().clone();

        let added = s.on_background_click(DVec2::new(50.0, 50.0)).unwrap();

        assert_eq!(added, PointSource::new(50.0, 50.0));
        assert_eq!(s.sources().len(), 3);
        assert_eq!(s.sources().last(), Some(&PointSource::new(50.0, 50.0)));
        assert_eq!(s.renderer().publishes(), 2);
        assert_eq!(s.renderer().markers().len(), 3);

        for (col, row, after) in s.grid().iter() {
            let prior = before.get(col, row).unwrap();
            if (col, row) == (50, 50) {
                assert_eq!(after, prior, "coincident cell must not change");
            } else {
                assert!(after > prior, "cell ({col}, {row}) did not increase");
            }
        }
    }

    #[test]
    fn removals_stop_at_one_source() {
        let mut s = session(&[(20.0, 20.0), (25.0, 25.0), (50.0, 50.0)], 100);
        assert!(s.on_marker_click(2).unwrap());
        assert!(s.on_marker_click(0).unwrap());
        assert_eq!(s.sources().len(), 1);
        assert_eq!(s.sources().as_slice(), &[PointSource::new(25.0, 25.0)]);

        let publishes = s.renderer().publishes();
        assert!(!s.on_marker_click(0).unwrap());
        assert_eq!(s.sources().len(), 1);
        assert_eq!(s.renderer().publishes(), publishes, "refusal must not republish");
    }

    #[test]
    fn removal_restores_previous_grid() {
        let mut s = session(&[(20.0, 20.0), (25.0, 25.0)], 64);
        let original = s.grid().clone();
        s.on_background_click(DVec2::new(40.0, 10.0)).unwrap();
        s.on_marker_click(2).unwrap();
        assert_eq!(s.grid(), &original);
    }

    #[test]
    fn marker_click_out_of_range_is_error() {
        let mut s = session(&[(1.0, 1.0), (2.0, 2.0)], 8);
        assert!(matches!(
            s.on_marker_click(5),
            Err(FieldError::SourceIndexOutOfRange { index: 5, len: 2 })
        ));
        assert_eq!(s.renderer().publishes(), 1);
    }

    #[test]
    fn marker_click_near_removes_closest() {
        let mut s = session(&[(20.0, 20.0), (25.0, 25.0)], 100);
        assert!(s.on_marker_click_near(DVec2::new(24.2, 25.5), 2.0).unwrap());
        assert_eq!(s.sources().as_slice(), &[PointSource::new(20.0, 20.0)]);
        assert!(!s.on_marker_click_near(DVec2::new(80.0, 80.0), 2.0).unwrap());
    }

    #[test]
    fn marker_click_near_with_negative_radius_keeps_sources() {
        let mut s = session(&[(20.0, 20.0), (25.0, 25.0)], 100);
        assert!(!s.on_marker_click_near(DVec2::new(20.0, 20.0), -3.0).unwrap());
        assert_eq!(s.sources().len(), 2);
        assert_eq!(s.renderer().publishes(), 1);
    }

    #[test]
    fn snapping_rounds_click() {
        let mut scene = scene(&[(25.0, 25.0)], 32);
        scene.snap = true;
        let mut s = FieldSession::new(scene, FrameBuffer::new()).unwrap();
        let added = s.on_background_click(DVec2::new(10.4, 11.6)).unwrap();
        assert_eq!(added, PointSource::new(10.0, 12.0));
    }

    #[test]
    fn markers_not_published_when_disabled() {
        let s = FieldSession::new(Preset::Saturated.scene(), FrameBuffer::new()).unwrap();
        assert!(s.renderer().markers().is_empty());
        assert!(s.grid().data().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn saturated_preset_is_hot_at_sources() {
        let s = FieldSession::new(Preset::Saturated.scene(), FrameBuffer::new()).unwrap();
        assert_eq!(s.grid().get(25, 25), Some(1.0));
        assert_eq!(s.grid().get(30, 30), Some(1.0));
    }

    #[test]
    fn new_rejects_invalid_scene() {
        let mut bad = scene(&[(1.0, 1.0)], 8);
        bad.grid.width = 0;
        assert!(FieldSession::new(bad, FrameBuffer::new()).is_err());
    }

    #[test]
    fn scene_reflects_current_sources() {
        let mut s = session(&[(1.0, 1.0)], 8);
        s.on_background_click(DVec2::new(3.0, 3.0)).unwrap();
        let snapshot = s.scene();
        assert_eq!(snapshot.sources.len(), 2);
        assert_eq!(snapshot.grid, *s.grid().spec());
    }

    #[test]
    fn works_with_boxed_renderer() {
        let renderer: Box<dyn Renderer> = Box::new(FrameBuffer::new());
        let mut s = FieldSession::new(scene(&[(1.0, 1.0)], 4), renderer).unwrap();
        s.on_background_click(DVec2::new(2.0, 2.0)).unwrap();
        assert_eq!(s.sources().len(), 2);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn published_grid_always_matches_session(
                clicks in prop::collection::vec(
                    (0.0_f64..32.0, 0.0_f64..32.0, any::<bool>(), 0_usize..8),
                    0..12,
                ),
            ) {
                let mut s = session(&[(4.0, 4.0), (20.0, 9.0)], 32);
                for (x, y, add, index) in clicks {
                    if add {
                        s.on_background_click(DVec2::new(x, y)).unwrap();
                    } else {
                        let index = index % s.sources().len();
                        s.on_marker_click(index).unwrap();
                    }
                    prop_assert!(s.sources().len() >= 1);
                    prop_assert_eq!(s.renderer().field(), Some(s.grid()));
                    prop_assert_eq!(s.renderer().markers(), s.sources().as_slice());
                    prop_assert!(s.grid().data().iter().all(|v| !v.is_nan() && *v >= 0.0));
                }
            }
        }
    }
}

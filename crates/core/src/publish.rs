//! Boundary with the rendering collaborator.
//!
//! The session hands every freshly computed grid to a [`Renderer`]. Colour
//! mapping, axes, and drawing all live on the other side of this trait.

use crate::grid::FieldGrid;
use crate::source::PointSource;

/// Receiver of published field data.
///
/// Object-safe, so sessions can drive a `Box<dyn Renderer>`.
pub trait Renderer {
    /// Replaces the displayed scalar field with `grid`.
    fn replace_field(&mut self, grid: &FieldGrid);

    /// Replaces the displayed marker positions.
    ///
    /// Only called when the session is configured to publish markers.
    fn replace_markers(&mut self, _sources: &[PointSource]) {}
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn replace_field(&mut self, grid: &FieldGrid) {
        (**self).replace_field(grid)
    }

    fn replace_markers(&mut self, sources: &[PointSource]) {
        (**self).replace_markers(sources)
    }
}

/// Renderer that keeps the most recently published frame.
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    field: Option<FieldGrid>,
    markers: Vec<PointSource>,
    publishes: usize,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest published grid, if any.
    pub fn field(&self) -> Option<&FieldGrid> {
        self.field.as_ref()
    }

    /// Latest published marker positions.
    pub fn markers(&self) -> &[PointSource] {
        &self.markers
    }

    /// Number of field publications received.
    pub fn publishes(&self) -> usize {
        self.publishes
    }
}

impl Renderer for FrameBuffer {
    fn replace_field(&mut self, grid: &FieldGrid) {
        self.field = Some(grid.clone());
        self.publishes += 1;
    }

    fn replace_markers(&mut self, sources: &[PointSource]) {
        self.markers.clear();
        self.markers.extend_from_slice(sources);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;

    #[test]
    fn frame_buffer_starts_empty() {
        let fb = FrameBuffer::new();
        assert!(fb.field().is_none());
        assert!(fb.markers().is_empty());
        assert_eq!(fb.publishes(), 0);
    }

    #[test]
    fn frame_buffer_keeps_latest_field() {
        let spec = GridSpec::unit(2, 1).unwrap();
        let mut fb = FrameBuffer::new();
        fb.replace_field(&FieldGrid::from_data(spec, vec![1.0, 2.0]).unwrap());
        fb.replace_field(&FieldGrid::from_data(spec, vec![3.0, 4.0]).unwrap());
        assert_eq!(fb.field().unwrap().data(), &[3.0, 4.0]);
        assert_eq!(fb.publishes(), 2);
    }

    #[test]
    fn frame_buffer_replaces_markers() {
        let mut fb = FrameBuffer::new();
        fb.replace_markers(&[PointSource::new(1.0, 1.0), PointSource::new(2.0, 2.0)]);
        fb.replace_markers(&[PointSource::new(5.0, 5.0)]);
        assert_eq!(fb.markers(), &[PointSource::new(5.0, 5.0)]);
    }

    #[test]
    fn renderer_is_object_safe() {
        let mut boxed: Box<dyn Renderer> = Box::new(FrameBuffer::new());
        let spec = GridSpec::unit(1, 1).unwrap();
        boxed.replace_field(&FieldGrid::zeros(spec).unwrap());
        boxed.replace_markers(&[]);
    }
}

//! Point sources and the ordered set that generates the field.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// One field-generating location in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointSource(pub DVec2);

impl PointSource {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn position(&self) -> DVec2 {
        self.0
    }
}

impl From<(f64, f64)> for PointSource {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Outcome of a removal request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Removal {
    /// The source at the requested index was removed.
    Removed(PointSource),
    /// Exactly one source remained; the set is unchanged.
    Refused,
}

/// Ordered collection of point sources.
///
/// Order does not affect field values but does identify markers for
/// removal. Once the set holds a single source, removal is refused so the
/// field never silently becomes zero everywhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceSet {
    sources: Vec<PointSource>,
}

impl SourceSet {
    /// Creates a set from seed sources.
    ///
    /// Returns `FieldError::NonFiniteSource` if any coordinate is NaN or
    /// infinite.
    pub fn new(seed: impl IntoIterator<Item = PointSource>) -> Result<Self, FieldError> {
        let sources: Vec<PointSource> = seed.into_iter().collect();
        sources.iter().try_for_each(check_finite)?;
        Ok(Self { sources })
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn as_slice(&self) -> &[PointSource] {
        &self.sources
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PointSource> {
        self.sources.iter()
    }

    pub fn last(&self) -> Option<&PointSource> {
        self.sources.last()
    }

    /// Appends a source at the end of the set.
    pub fn push(&mut self, source: PointSource) -> Result<(), FieldError> {
        check_finite(&source)?;
        self.sources.push(source);
        Ok(())
    }

    /// Removes the source at `index`, preserving the order of the rest.
    ///
    /// Returns `Removal::Refused` without touching the set when it holds a
    /// single source, and `FieldError::SourceIndexOutOfRange` for an index
    /// past the end.
    pub fn remove(&mut self, index: usize) -> Result<Removal, FieldError> {
        if index >= self.sources.len() {
            return Err(FieldError::SourceIndexOutOfRange {
                index,
                len: self.sources.len(),
            });
        }
        if self.sources.len() == 1 {
            return Ok(Removal::Refused);
        }
        Ok(Removal::Removed(self.sources.remove(index)))
    }

    /// Index of the source nearest to `coord` within `radius`.
    ///
    /// Ties resolve to the earliest source. A negative or NaN `radius`
    /// matches nothing.
    pub fn nearest(&self, coord: DVec2, radius: f64) -> Option<usize> {
        if !(radius >= 0.0) {
            return None;
        }
        let limit = radius * radius;
        self.sources
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.0.distance_squared(coord)))
            .filter(|&(_, d2)| d2 <= limit)
            .fold(None, |best: Option<(usize, f64)>, (i, d2)| match best {
                Some((_, best_d2)) if best_d2 <= d2 => best,
                _ => Some((i, d2)),
            })
            .map(|(i, _)| i)
    }
}

impl<'a> IntoIterator for &'a SourceSet {
    type Item = &'a PointSource;
    type IntoIter = std::slice::Iter<'a, PointSource>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}

fn check_finite(source: &PointSource) -> Result<(), FieldError> {
    if source.0.is_finite() {
        Ok(())
    } else {
        Err(FieldError::NonFiniteSource {
            x: source.x(),
            y: source.y(),
        })
    }
}

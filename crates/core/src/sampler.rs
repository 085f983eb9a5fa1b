//! Grid sampler: evaluates the potential at every cell of a grid.
//!
//! Recomputation is always total. Cells are independent, so the row-major
//! walk order has no effect on the values produced.

use tracing::{instrument, trace};

use crate::error::FieldError;
use crate::grid::{FieldGrid, GridSpec};
use crate::potential::Potential;
use crate::source::SourceSet;

/// Samples `potential` over every cell of `spec`.
pub fn sample(
    spec: GridSpec,
    sources: &SourceSet,
    potential: &Potential,
) -> Result<FieldGrid, FieldError> {
    let mut grid = FieldGrid::zeros(spec)?;
    resample(&mut grid, sources, potential);
    Ok(grid)
}

/// Recomputes every cell of an existing grid in place.
#[instrument(
    level = "trace",
    skip_all,
    fields(width = grid.width(), height = grid.height(), sources = sources.len())
)]
pub fn resample(grid: &mut FieldGrid, sources: &SourceSet, potential: &Potential) {
    let spec = *grid.spec();
    for (i, cell) in grid.data_mut().iter_mut().enumerate() {
        let coord = spec.coordinate(i % spec.width, i / spec.width);
        *cell = potential.evaluate(coord, sources);
    }
    trace!("grid resampled");
}

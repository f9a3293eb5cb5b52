//! Linear rescaling of grids to the [0, 1] display range.
//!
//! Filtering pushes sinogram values outside [0, 1], and reconstructions
//! built from a filtered sinogram live on an arbitrary scale. Both are
//! rescaled here before display or error tracking.

use crate::grid::Grid;

/// Rescale `grid` so its minimum maps to 0.0 and its maximum to 1.0.
///
/// A uniform grid (min == max) has no range to stretch and yields an
/// all-zero grid of the same shape.
pub fn normalize(grid: &Grid) -> Grid {
    let Some((min, max)) = grid.min_max() else {
        return grid.clone();
    };

    let range = max - min;
    if range == 0.0 || !range.is_finite() {
        return Grid::zeros(grid.width, grid.height);
    }

    let data = grid
        .data
        .iter()
        .map(|&v| ((v - min) / range).clamp(0.0, 1.0))
        .collect();
    Grid::new(grid.width, grid.height, data)
}

/// Clamp every sample into [0, 1] without rescaling.
pub fn clamp_unit(grid: &Grid) -> Grid {
    let data = grid.data.iter().map(|v| v.clamp(0.0, 1.0)).collect();
    Grid::new(grid.width, grid.height, data)
}

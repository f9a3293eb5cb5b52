//! Reconstruction error against the original image.

use crate::grid::Grid;

/// Mean squared error of each snapshot against `original`.
///
/// Both sides are clamped to [0, 1] before comparing, so snapshots that
/// overshoot the display range are not penalised beyond it.
///
/// # Panics
///
/// Panics if a snapshot's dimensions differ from `original`.
pub fn mean_squared_error(original: &Grid, snapshots: &[Grid]) -> Vec<f64> {
    snapshots
        .iter()
        .map(|snapshot| snapshot_error(original, snapshot))
        .collect()
}

/// Mean squared error of a single snapshot.
pub fn snapshot_error(original: &Grid, snapshot: &Grid) -> f64 {
    assert_eq!(
        (original.width, original.height),
        (snapshot.width, snapshot.height),
        "Snapshot dimensions differ from the original image"
    );

    if original.is_empty() {
        return 0.0;
    }

    let sum: f64 = original
        .data
        .iter()
        .zip(&snapshot.data)
        .map(|(&a, &b)| {
            let diff = a.clamp(0.0, 1.0) - b.clamp(0.0, 1.0);
            diff * diff
        })
        .sum();
    sum / original.len() as f64
}

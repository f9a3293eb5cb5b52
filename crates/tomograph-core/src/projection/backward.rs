//! Back-projection: rebuilding the image from a sinogram.
//!
//! Every sinogram reading is added to each canvas pixel its ray sampled,
//! and a parallel count grid records how many samples landed on each pixel.
//! A snapshot is the accumulator divided by the counts; pixels no ray has
//! reached stay 0.

use crate::geometry::{crop_to_original, Geometry, ScanGeometry};
use crate::grid::Grid;

/// Reconstruct the image from a sinogram.
///
/// # Arguments
///
/// * `sinogram` - One row per emitter angle, one column per detector
/// * `animate` - Keep a snapshot after every angle instead of only the last
/// * `emitter_step_rad` - Rotation between consecutive emitter positions
/// * `radius` - Radius of the emitter/detector circle
/// * `detector_count` - Number of detectors (at least 1)
/// * `detector_span_rad` - Arc covered by the detector fan
/// * `geometry` - Canvas the sinogram was taken from; snapshots are cropped
///   back to its original image window
///
/// # Returns
///
/// Snapshots in angle order: `angle_steps` of them when animating, otherwise
/// only the final one.
pub fn reconstruct(
    sinogram: &Grid,
    animate: bool,
    emitter_step_rad: f64,
    radius: f64,
    detector_count: usize,
    detector_span_rad: f64,
    geometry: &Geometry,
) -> Vec<Grid> {
    let rig = ScanGeometry::new(
        geometry.side,
        radius,
        emitter_step_rad,
        detector_count,
        detector_span_rad,
    );
    back_project(sinogram, &rig, geometry, animate)
}

/// Back-project `sinogram` with a prepared rig.
///
/// # Panics
///
/// Panics if the sinogram shape does not match the rig's angle and detector
/// counts. That means the two passes disagree on geometry.
pub fn back_project(
    sinogram: &Grid,
    rig: &ScanGeometry,
    geometry: &Geometry,
    animate: bool,
) -> Vec<Grid> {
    assert_eq!(
        sinogram.shape(),
        (rig.angle_steps(), rig.detector_count()),
        "Sinogram shape does not match scan geometry"
    );

    let side = rig.side();
    let mut accumulator = Grid::zeros(side, side);
    let mut counts = vec![0u32; side * side];

    let steps = rig.angle_steps();
    let mut snapshots = Vec::with_capacity(if animate { steps } else { 1 });

    for i in 0..steps {
        for (k, &reading) in sinogram.row(i).iter().enumerate() {
            for (x, y) in rig.ray_path(i, k) {
                let idx = y * side + x;
                accumulator.data[idx] += reading;
                counts[idx] += 1;
            }
        }

        if animate || i + 1 == steps {
            let snapshot = average(&accumulator, &counts);
            snapshots.push(crop_to_original(&snapshot, geometry));
        }
    }

    snapshots
}

/// Divide each accumulated pixel by its sample count.
fn average(accumulator: &Grid, counts: &[u32]) -> Grid {
    let data = accumulator
        .data
        .iter()
        .zip(counts)
        .map(|(&sum, &count)| if count == 0 { 0.0 } else { sum / f64::from(count) })
        .collect();
    Grid::new(accumulator.width, accumulator.height, data)
}

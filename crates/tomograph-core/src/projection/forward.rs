//! Forward projection: simulating detector readings.

use crate::geometry::ScanGeometry;
use crate::grid::Grid;

/// Simulate a full rotation of the rig around a square `image`.
///
/// # Arguments
///
/// * `image` - Square canvas with intensities in [0, 1]
/// * `emitter_step_rad` - Rotation between consecutive emitter positions
/// * `radius` - Radius of the emitter/detector circle
/// * `detector_count` - Number of detectors (at least 1)
/// * `detector_span_rad` - Arc covered by the detector fan
///
/// # Returns
///
/// A sinogram with `ceil(2π / emitter_step_rad)` rows and `detector_count`
/// columns.
pub fn project(
    image: &Grid,
    emitter_step_rad: f64,
    radius: f64,
    detector_count: usize,
    detector_span_rad: f64,
) -> Grid {
    let rig = ScanGeometry::new(
        image.width,
        radius,
        emitter_step_rad,
        detector_count,
        detector_span_rad,
    );
    forward_project(image, &rig)
}

/// Forward-project `image` with a prepared rig.
///
/// Each sinogram cell is the mean of the image samples along one ray. Rays
/// that never enter the canvas read 0.
pub fn forward_project(image: &Grid, rig: &ScanGeometry) -> Grid {
    assert_eq!(image.width, image.height, "Canvas must be square");
    assert_eq!(image.width, rig.side(), "Canvas does not match rig");

    let rows = rig.angle_steps();
    let cols = rig.detector_count();
    let mut sinogram = Grid::zeros(cols, rows);

    for i in 0..rows {
        for k in 0..cols {
            let (sum, count) = rig
                .ray_path(i, k)
                .fold((0.0, 0usize), |(sum, count), (x, y)| {
                    (sum + image.get(x, y), count + 1)
                });
            if count > 0 {
                sinogram.set(k, i, sum / count as f64);
            }
        }
    }

    sinogram
}

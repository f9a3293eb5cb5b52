//! One complete scan: load, project, filter, reconstruct, measure.
//!
//! # Stage Order
//!
//! 1. Validate the configuration
//! 2. Pad the image to a square canvas and derive the rig geometry
//! 3. Forward projection
//! 4. Ramp filter (optional)
//! 5. Back-projection, one snapshot per angle when animating
//! 6. Mean squared error of every snapshot against the input
//!
//! Every run owns its buffers; nothing is shared between runs.

use thiserror::Error;

use crate::config::{ConfigError, ScanConfig, ScanParams};
use crate::decode::{decode_grayscale, DecodeError};
use crate::error_tracker::mean_squared_error;
use crate::filter::convolve;
use crate::geometry::{pad_to_square, Geometry, ScanGeometry};
use crate::grid::Grid;
use crate::metadata::MetaData;
use crate::normalize::normalize;
use crate::projection::{back_project, forward_project};

/// Errors that stop a scan before it runs.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid scan configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not load input image: {0}")]
    Decode(#[from] DecodeError),

    /// The input image has no pixels.
    #[error("Input image is empty")]
    EmptyImage,
}

/// Everything one scan produces.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// The input image at its original dimensions.
    pub input_image: Grid,
    /// Metadata carried along from the input.
    pub metadata: MetaData,
    /// Canvas and rig geometry used for both passes.
    pub geometry: Geometry,
    /// Raw sinogram, `[angle_steps, detector_count]`, values in [0, 1].
    pub sinogram: Grid,
    /// Filtered sinogram rescaled to [0, 1], when filtering was requested.
    pub filtered_sinogram: Option<Grid>,
    /// Reconstruction snapshots in angle order, cropped to the input size.
    pub reconstructions: Vec<Grid>,
    /// Mean squared error of each snapshot, index-aligned with `reconstructions`.
    pub mse: Vec<f64>,
}

impl ScanResult {
    /// The reconstruction after all angles.
    pub fn final_reconstruction(&self) -> &Grid {
        // back_project always emits at least the final snapshot
        &self.reconstructions[self.reconstructions.len() - 1]
    }

    /// Error of the final reconstruction.
    pub fn final_error(&self) -> f64 {
        self.mse.last().copied().unwrap_or(0.0)
    }

    /// Number of emitter positions in the scan.
    pub fn angle_steps(&self) -> usize {
        self.sinogram.height
    }
}

/// Decode `bytes` and run a scan over the result.
pub fn scan_bytes(bytes: &[u8], config: &ScanConfig) -> Result<ScanResult, ScanError> {
    let params = config.validate()?;
    let loaded = decode_grayscale(bytes)?;
    run_validated(loaded.image, loaded.metadata, &params)
}

/// Run a scan over an already decoded image.
///
/// # Errors
///
/// Returns `ScanError::Config` if the configuration is out of range and
/// `ScanError::EmptyImage` if the image has no pixels.
pub fn run_scan(
    image: Grid,
    metadata: MetaData,
    config: &ScanConfig,
) -> Result<ScanResult, ScanError> {
    let params = config.validate()?;
    run_validated(image, metadata, &params)
}

fn run_validated(
    image: Grid,
    metadata: MetaData,
    params: &ScanParams,
) -> Result<ScanResult, ScanError> {
    if image.is_empty() {
        return Err(ScanError::EmptyImage);
    }

    let (canvas, geometry) = pad_to_square(&image);
    let rig = ScanGeometry::new(
        geometry.side,
        geometry.radius,
        params.emitter_step_rad,
        params.detector_count,
        params.detector_span_rad,
    );
    tracing::debug!(
        "Scanning {}x{} image on {}px canvas: {} angles x {} detectors",
        image.width,
        image.height,
        geometry.side,
        rig.angle_steps(),
        rig.detector_count()
    );

    let sinogram = forward_project(&canvas, &rig);
    tracing::debug!("Forward projection done");

    let filtered = params
        .apply_filter
        .then(|| convolve(&sinogram, params.kernel_size));
    if filtered.is_some() {
        tracing::debug!("Applied ramp filter ({} taps)", params.kernel_size);
    }

    let used = filtered.as_ref().unwrap_or(&sinogram);
    let mut reconstructions = back_project(used, &rig, &geometry, params.animate);
    if filtered.is_some() {
        // Filtered readings are on an arbitrary scale
        reconstructions = reconstructions.iter().map(normalize).collect();
    }
    tracing::debug!("Back-projection produced {} snapshot(s)", reconstructions.len());

    let mse = mean_squared_error(&image, &reconstructions);
    tracing::info!(
        "Scan complete: {} angles, {} detectors, final MSE {:.6}",
        rig.angle_steps(),
        rig.detector_count(),
        mse.last().copied().unwrap_or(0.0)
    );

    Ok(ScanResult {
        input_image: image,
        metadata,
        geometry,
        sinogram,
        filtered_sinogram: filtered.as_ref().map(normalize),
        reconstructions,
        mse,
    })
}

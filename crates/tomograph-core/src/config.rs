//! Scan configuration and validation.
//!
//! Angles are given in degrees, the way the front end collects them, and are
//! converted to radians once validation passes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::DEFAULT_KERNEL_SIZE;

/// Smallest accepted emitter step (degrees). Bounds the sinogram at 1440 rows.
pub const MIN_EMITTER_STEP_DEG: f64 = 0.25;

/// Largest accepted emitter step (degrees). Two emitter positions per turn.
pub const MAX_EMITTER_STEP_DEG: f64 = 180.0;

/// Largest accepted detector count.
pub const MAX_DETECTOR_COUNT: usize = 720;

/// Smallest accepted detector span (degrees).
pub const MIN_DETECTOR_SPAN_DEG: f64 = 0.25;

/// Largest accepted detector span (degrees).
pub const MAX_DETECTOR_SPAN_DEG: f64 = 270.0;

/// Largest accepted ramp kernel width. Taps further than the widest
/// sinogram row from the center never meet a sample.
pub const MAX_KERNEL_SIZE: usize = 2 * MAX_DETECTOR_COUNT + 1;

/// Errors for configurations rejected before a scan runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error(
        "Emitter step must be in [{min}, {max}] degrees, got {0}",
        min = MIN_EMITTER_STEP_DEG,
        max = MAX_EMITTER_STEP_DEG
    )]
    EmitterStep(f64),

    #[error("Detector count must be in 1..={max}, got {0}", max = MAX_DETECTOR_COUNT)]
    DetectorCount(usize),

    #[error(
        "Detector span must be in [{min}, {max}] degrees, got {0}",
        min = MIN_DETECTOR_SPAN_DEG,
        max = MAX_DETECTOR_SPAN_DEG
    )]
    DetectorSpan(f64),

    #[error("Filter kernel size must be in 1..={max}, got {0}", max = MAX_KERNEL_SIZE)]
    KernelSize(usize),
}

/// Parameters for one scan run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanConfig {
    /// Rotation between emitter positions, in degrees.
    pub emitter_step: f64,
    /// Number of detectors in the fan.
    pub detector_count: usize,
    /// Arc covered by the detector fan, in degrees.
    pub detector_span: f64,
    /// Convolve sinogram rows with the ramp kernel before back-projection.
    pub apply_filter: bool,
    /// Keep one reconstruction snapshot per angle instead of only the last.
    pub animate: bool,
    /// Width of the ramp kernel.
    pub kernel_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            emitter_step: 1.0,
            detector_count: 90,
            detector_span: 180.0,
            apply_filter: false,
            animate: false,
            kernel_size: DEFAULT_KERNEL_SIZE,
        }
    }
}

impl ScanConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every option and convert angles to radians.
    pub fn validate(&self) -> Result<ScanParams, ConfigError> {
        if !(MIN_EMITTER_STEP_DEG..=MAX_EMITTER_STEP_DEG).contains(&self.emitter_step) {
            return Err(ConfigError::EmitterStep(self.emitter_step));
        }
        if !(1..=MAX_DETECTOR_COUNT).contains(&self.detector_count) {
            return Err(ConfigError::DetectorCount(self.detector_count));
        }
        if !(MIN_DETECTOR_SPAN_DEG..=MAX_DETECTOR_SPAN_DEG).contains(&self.detector_span) {
            return Err(ConfigError::DetectorSpan(self.detector_span));
        }
        if !(1..=MAX_KERNEL_SIZE).contains(&self.kernel_size) {
            return Err(ConfigError::KernelSize(self.kernel_size));
        }

        Ok(ScanParams {
            emitter_step_rad: self.emitter_step.to_radians(),
            detector_count: self.detector_count,
            detector_span_rad: self.detector_span.to_radians(),
            apply_filter: self.apply_filter,
            animate: self.animate,
            kernel_size: self.kernel_size,
        })
    }
}

/// A validated configuration with angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanParams {
    pub emitter_step_rad: f64,
    pub detector_count: usize,
    pub detector_span_rad: f64,
    pub apply_filter: bool,
    pub animate: bool,
    pub kernel_size: usize,
}

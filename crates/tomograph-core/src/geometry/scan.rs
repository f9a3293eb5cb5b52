//! Emitter/detector positions and ray sampling.
//!
//! # Algorithm
//!
//! For angle index `i` the emitter sits at `θ = i · step` on the scan circle.
//! The detectors are spread over `span` radians centered on the opposite
//! point `θ + π`:
//!
//! ```text
//! φ_k = θ + π - span/2 + k · span / (count - 1)      (count > 1)
//! φ_0 = θ + π                                        (count = 1)
//! ```
//!
//! A ray is the straight segment from the emitter to one detector. It is
//! sampled at `n = ceil(SAMPLES_PER_PIXEL · max(|dx|, |dy|))` midpoints
//! `t = (j + 0.5) / n`, so consecutive samples are at most half a pixel apart
//! along the major axis and every crossed pixel is visited. Each sample maps
//! to the pixel containing it (nearest-pixel, no interpolation). Samples
//! outside the canvas are skipped.

use std::f64::consts::{PI, TAU};

/// Ray samples per pixel of travel along the segment's major axis.
pub const SAMPLES_PER_PIXEL: f64 = 2.0;

/// Tolerance absorbing rounding in `2π / step` for steps that divide a full turn.
const ANGLE_STEP_EPSILON: f64 = 1e-9;

/// Number of emitter positions in one full turn: `ceil(2π / step)`.
///
/// `emitter_step_rad` must be positive.
pub fn angle_steps(emitter_step_rad: f64) -> usize {
    debug_assert!(emitter_step_rad > 0.0, "Emitter step must be positive");
    ((TAU / emitter_step_rad) - ANGLE_STEP_EPSILON).ceil().max(1.0) as usize
}

/// A point in continuous canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Rig configuration for one scan, shared by both projection passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanGeometry {
    side: usize,
    center: f64,
    radius: f64,
    emitter_step: f64,
    detector_count: usize,
    detector_span: f64,
    angle_steps: usize,
}

impl ScanGeometry {
    /// Describe a rig around a square canvas of `side` pixels.
    ///
    /// # Arguments
    ///
    /// * `side` - Canvas side length in pixels
    /// * `radius` - Radius of the emitter/detector circle
    /// * `emitter_step_rad` - Rotation between consecutive emitter positions
    /// * `detector_count` - Number of detectors (at least 1)
    /// * `detector_span_rad` - Arc covered by the detector array
    pub fn new(
        side: usize,
        radius: f64,
        emitter_step_rad: f64,
        detector_count: usize,
        detector_span_rad: f64,
    ) -> Self {
        debug_assert!(detector_count >= 1, "At least one detector is required");
        Self {
            side,
            center: side as f64 / 2.0,
            radius,
            emitter_step: emitter_step_rad,
            detector_count,
            detector_span: detector_span_rad,
            angle_steps: angle_steps(emitter_step_rad),
        }
    }

    /// Number of emitter positions (sinogram rows).
    pub fn angle_steps(&self) -> usize {
        self.angle_steps
    }

    /// Number of detectors (sinogram columns).
    pub fn detector_count(&self) -> usize {
        self.detector_count
    }

    /// Canvas side length in pixels.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Emitter angle for angle index `i`.
    #[inline]
    pub fn angle(&self, i: usize) -> f64 {
        i as f64 * self.emitter_step
    }

    /// Emitter position for angle index `i`.
    pub fn emitter(&self, i: usize) -> Point {
        self.on_circle(self.angle(i))
    }

    /// Position of detector `k` for angle index `i`.
    pub fn detector(&self, i: usize, k: usize) -> Point {
        let opposite = self.angle(i) + PI;
        let phi = if self.detector_count == 1 {
            opposite
        } else {
            let spacing = self.detector_span / (self.detector_count - 1) as f64;
            opposite - self.detector_span / 2.0 + k as f64 * spacing
        };
        self.on_circle(phi)
    }

    /// In-bounds pixels sampled along the ray from the emitter at angle
    /// index `i` to detector `k`.
    ///
    /// A pixel appears once per sample landing in it, so pixels the ray
    /// crosses over a longer stretch carry more weight.
    pub fn ray_path(&self, i: usize, k: usize) -> RayPath {
        let start = self.emitter(i);
        let end = self.detector(i, k);
        let dx = end.x - start.x;
        let dy = end.y - start.y;

        let extent = dx.abs().max(dy.abs());
        let samples = ((SAMPLES_PER_PIXEL * extent).ceil() as usize).max(1);

        RayPath {
            start,
            delta: Point { x: dx, y: dy },
            samples,
            next: 0,
            side: self.side,
        }
    }

    #[inline]
    fn on_circle(&self, phi: f64) -> Point {
        Point {
            x: self.center + self.radius * phi.cos(),
            y: self.center + self.radius * phi.sin(),
        }
    }
}

/// Iterator over the canvas pixels `(x, y)` hit by one ray's samples.
#[derive(Debug, Clone)]
pub struct RayPath {
    start: Point,
    delta: Point,
    samples: usize,
    next: usize,
    side: usize,
}

impl RayPath {
    /// Total number of samples along the segment, in bounds or not.
    pub fn sample_count(&self) -> usize {
        self.samples
    }
}

impl Iterator for RayPath {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let side = self.side as f64;
        while self.next < self.samples {
            let t = (self.next as f64 + 0.5) / self.samples as f64;
            self.next += 1;

            let x = self.start.x + t * self.delta.x;
            let y = self.start.y + t * self.delta.y;
            if x >= 0.0 && x < side && y >= 0.0 && y < side {
                return Some((x as usize, y as usize));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.samples - self.next))
    }
}

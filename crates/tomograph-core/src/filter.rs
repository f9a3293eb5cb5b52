//! Ramp filtering of sinogram rows.
//!
//! Plain back-projection blurs the reconstruction because low spatial
//! frequencies are smeared over every ray. Convolving each sinogram row
//! with a high-pass ramp kernel before back-projection sharpens the result.
//!
//! # Kernel
//!
//! The spatial Ram-Lak kernel, truncated to `size` taps centered on zero:
//!
//! ```text
//! h[0] = 1
//! h[k] = 0              for even k ≠ 0
//! h[k] = -4 / (π² k²)   for odd k
//! ```
//!
//! Rows are convolved independently along the detector axis. Samples beyond
//! the row ends are treated as zero.

use std::f64::consts::PI;

use crate::grid::Grid;

/// Default kernel width (taps).
pub const DEFAULT_KERNEL_SIZE: usize = 11;

/// Build the ramp kernel with `size` taps.
///
/// Even sizes are rounded up to the next odd size so the kernel stays
/// symmetric around its center tap.
pub fn ramp_kernel(size: usize) -> Vec<f64> {
    let half = (size / 2) as i64;
    (-half..=half)
        .map(|k| {
            if k == 0 {
                1.0
            } else if k % 2 == 0 {
                0.0
            } else {
                -4.0 / (PI * PI * (k as f64).powi(2))
            }
        })
        .collect()
}

/// Convolve every sinogram row with the ramp kernel of width `kernel_size`.
///
/// Only the `2 · width + 1` central taps can meet a sample under zero
/// padding, so wider kernels are truncated to that before being built.
///
/// # Returns
///
/// A new grid with the same shape. Values may fall outside [0, 1]; use
/// [`normalize`](crate::normalize::normalize) before display.
pub fn convolve(sinogram: &Grid, kernel_size: usize) -> Grid {
    let kernel = ramp_kernel(kernel_size.min(2 * sinogram.width + 1));
    let mut data = Vec::with_capacity(sinogram.len());
    for row in sinogram.rows().take(sinogram.height) {
        data.extend(convolve_row(row, &kernel));
    }
    Grid::new(sinogram.width, sinogram.height, data)
}

/// Same-size 1-D convolution with zero padding at both ends.
fn convolve_row(row: &[f64], kernel: &[f64]) -> Vec<f64> {
    let half = (kernel.len() / 2) as i64;
    let len = row.len() as i64;

    (0..len)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .filter_map(|(j, &weight)| {
                    let src = i + j as i64 - half;
                    (0..len).contains(&src).then(|| weight * row[src as usize])
                })
                .sum()
        })
        .collect()
}

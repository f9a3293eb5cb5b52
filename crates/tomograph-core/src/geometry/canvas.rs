//! Square working canvas derived from the input image.
//!
//! The scanner needs a square field of view. Non-square inputs are embedded
//! centered in a zero canvas whose side is the longer image edge, and
//! reconstructions are cropped back to the original window afterwards.

use std::f64::consts::SQRT_2;

use crate::grid::Grid;

/// Position of the original image inside the square canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub x: usize,
    pub y: usize,
}

/// Canvas and rig dimensions for one scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Side length `N` of the square canvas.
    pub side: usize,
    /// Rotation center, `(N/2, N/2)`.
    pub center: (f64, f64),
    /// Radius of the emitter/detector circle, `N/√2`.
    pub radius: f64,
    /// Where the original image sits inside the canvas.
    pub offset: Offset,
    /// Width of the original image.
    pub original_width: usize,
    /// Height of the original image.
    pub original_height: usize,
}

impl Geometry {
    /// Derive the canvas geometry for an image of the given dimensions.
    pub fn for_dimensions(width: usize, height: usize) -> Self {
        let side = width.max(height);
        let half = side as f64 / 2.0;
        Self {
            side,
            center: (half, half),
            radius: side as f64 / SQRT_2,
            offset: Offset {
                x: (side - width) / 2,
                y: (side - height) / 2,
            },
            original_width: width,
            original_height: height,
        }
    }

    /// Check if the original image already was square.
    pub fn is_square(&self) -> bool {
        self.original_width == self.original_height
    }
}

/// Embed `image` centered in a square zero canvas.
///
/// # Returns
///
/// The padded canvas and the geometry describing it. A square input is
/// returned unchanged (cloned).
pub fn pad_to_square(image: &Grid) -> (Grid, Geometry) {
    let geometry = Geometry::for_dimensions(image.width, image.height);
    if geometry.is_square() {
        return (image.clone(), geometry);
    }

    let side = geometry.side;
    let mut canvas = Grid::zeros(side, side);
    for (y, row) in image.rows().enumerate() {
        let dst_start = (y + geometry.offset.y) * side + geometry.offset.x;
        canvas.data[dst_start..dst_start + row.len()].copy_from_slice(row);
    }

    (canvas, geometry)
}

/// Cut the original image window back out of a canvas-sized grid.
///
/// Grids that already match the original dimensions are returned as-is.
pub fn crop_to_original(canvas: &Grid, geometry: &Geometry) -> Grid {
    let (out_width, out_height) = (geometry.original_width, geometry.original_height);
    if canvas.width == out_width && canvas.height == out_height {
        return canvas.clone();
    }

    debug_assert_eq!(canvas.width, geometry.side, "Canvas width mismatch");
    debug_assert_eq!(canvas.height, geometry.side, "Canvas height mismatch");

    let mut data = Vec::with_capacity(out_width * out_height);

    // Copy row by row
    for y in 0..out_height {
        let src_start = (y + geometry.offset.y) * canvas.width + geometry.offset.x;
        data.extend_from_slice(&canvas.data[src_start..src_start + out_width]);
    }

    Grid::new(out_width, out_height, data)
}

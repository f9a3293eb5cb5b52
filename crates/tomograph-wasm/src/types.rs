//! WASM-compatible wrapper types for scan data.
//!
//! This module provides JavaScript-friendly types that wrap the core Tomograph
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use tomograph_core::encode::to_gray8;
use tomograph_core::Grid;
use wasm_bindgen::prelude::*;

/// A grayscale grid (image, sinogram or snapshot) for JavaScript.
///
/// # Memory Management
///
/// The samples are stored in WASM memory. `values()` and `gray8()` copy them
/// to JavaScript memory as typed arrays.
#[wasm_bindgen]
pub struct JsGrid {
    width: u32,
    height: u32,
    data: Vec<f64>,
}

#[wasm_bindgen]
impl JsGrid {
    /// Create a new JsGrid from dimensions and row-major samples.
    ///
    /// # Arguments
    /// * `width` - Grid width
    /// * `height` - Grid height
    /// * `data` - Samples in [0, 1], `width * height` of them
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, data: Vec<f64>) -> JsGrid {
        JsGrid {
            width,
            height,
            data,
        }
    }

    /// Get the grid width
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the grid height
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the samples as Float64Array.
    pub fn values(&self) -> Vec<f64> {
        self.data.clone()
    }

    /// Returns 8-bit gray pixels as Uint8Array, ready for a canvas.
    pub fn gray8(&self) -> Vec<u8> {
        to_gray8(&self.to_grid())
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsGrid {
    pub(crate) fn from_grid(grid: &Grid) -> Self {
        Self {
            width: grid.width as u32,
            height: grid.height as u32,
            data: grid.data.clone(),
        }
    }

    pub(crate) fn to_grid(&self) -> Grid {
        Grid::new(self.width as usize, self.height as usize, self.data.clone())
    }
}

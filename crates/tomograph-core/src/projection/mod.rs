//! Forward and backward projection through the simulated scanner.
//!
//! # Pipeline Order
//!
//! 1. Forward projection turns the square canvas into a sinogram
//! 2. Optional ramp filtering of the sinogram rows
//! 3. Back-projection smears the sinogram back over the canvas
//!
//! Both passes iterate the same angle sequence and trace rays through the
//! same [`ScanGeometry`](crate::geometry::ScanGeometry), so sinogram row `i`
//! always belongs to emitter angle `i · step`.

mod backward;
mod forward;

pub use backward::{back_project, reconstruct};
pub use forward::{forward_project, project};

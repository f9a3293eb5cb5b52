//! Tomograph Core - CT scanner simulation library
//!
//! This crate simulates a fan-beam computed tomography scanner over a 2-D
//! grayscale image: forward projection into a sinogram, optional ramp
//! filtering, back-projection into reconstruction snapshots, and the mean
//! squared error of every snapshot against the input.

pub mod cache;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error_tracker;
pub mod export;
pub mod filter;
pub mod geometry;
pub mod grid;
pub mod metadata;
pub mod normalize;
pub mod pipeline;
pub mod projection;

pub use cache::{CacheKey, ResultCache};
pub use config::{ConfigError, ScanConfig, ScanParams};
pub use error_tracker::mean_squared_error;
pub use export::DicomExport;
pub use filter::convolve;
pub use geometry::{Geometry, ScanGeometry};
pub use grid::Grid;
pub use metadata::{MetaData, MetaField};
pub use normalize::normalize;
pub use pipeline::{run_scan, scan_bytes, ScanError, ScanResult};
pub use projection::{project, reconstruct};

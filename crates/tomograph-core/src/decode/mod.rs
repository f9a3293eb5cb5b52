//! Image ingestion for the scanner.
//!
//! This module provides functionality for:
//! - Decoding PNG and JPEG images into grayscale intensity grids
//! - Attaching the fixed patient metadata record to the decoded image
//!
//! DICOM sources are decoded outside this crate. Their pixels and attribute
//! values enter through [`LoadedImage::new`] and
//! [`MetaData::from_pairs`](crate::metadata::MetaData::from_pairs).
//!
//! # Examples
//!
//! ```ignore
//! use tomograph_core::decode::decode_grayscale;
//!
//! let bytes = std::fs::read("phantom.png").unwrap();
//! let loaded = decode_grayscale(&bytes).unwrap();
//! println!("Decoded {}x{} image", loaded.image.width, loaded.image.height);
//! ```

mod grayscale;
mod types;

pub use grayscale::{decode_grayscale, decode_luma};
pub use types::{DecodeError, LoadedImage};

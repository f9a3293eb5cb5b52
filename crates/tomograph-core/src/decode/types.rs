//! Core types for image ingestion.

use thiserror::Error;

use crate::grid::Grid;
use crate::metadata::MetaData;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image decoded to zero pixels.
    #[error("Image has no pixels")]
    EmptyImage,
}

/// A decoded input image together with its metadata record.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Grayscale intensities in [0, 1], original (unpadded) dimensions.
    pub image: Grid,
    /// Patient and study fields, placeholders where the source had none.
    pub metadata: MetaData,
}

impl LoadedImage {
    /// Wrap an already decoded grid, e.g. pixels handed over by a DICOM reader.
    pub fn new(image: Grid, metadata: MetaData) -> Self {
        Self { image, metadata }
    }
}

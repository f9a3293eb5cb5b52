//! DICOM export payload for the final reconstruction.
//!
//! Writing the DICOM file itself is left to an external writer. This module
//! prepares everything that writer needs: dimensions, 16-bit pixel data,
//! the edited patient fields and the fixed institutional fields.

use serde::Serialize;
use thiserror::Error;

use crate::grid::Grid;
use crate::metadata::MetaData;
use crate::normalize::clamp_unit;

/// Scale applied to [0, 1] intensities before storing them as `u16`.
pub const PIXEL_SCALE: f64 = 255.0;

/// Value written to both InstitutionName and Manufacturer.
pub const INSTITUTION: &str = "Politechnika Poznanska";

/// Errors that can occur while preparing an export.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    /// The reconstruction has no pixels.
    #[error("Cannot export an empty image")]
    EmptyImage,
}

/// Attributes and pixel data for one DICOM file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DicomExport {
    pub rows: u32,
    pub columns: u32,
    /// Row-major pixel values, `rows * columns` entries.
    pub pixel_data: Vec<u16>,
    /// `(DICOM keyword, value)` pairs, using the edited metadata values.
    pub attributes: Vec<(String, String)>,
    pub institution_name: String,
    pub manufacturer: String,
}

impl DicomExport {
    /// Build the export from a reconstruction and its (possibly edited) metadata.
    ///
    /// Intensities are clamped to [0, 1] and scaled by [`PIXEL_SCALE`].
    pub fn from_reconstruction(image: &Grid, metadata: &MetaData) -> Result<Self, ExportError> {
        if image.is_empty() {
            return Err(ExportError::EmptyImage);
        }

        let pixel_data = clamp_unit(image)
            .data
            .iter()
            .map(|v| (v * PIXEL_SCALE) as u16)
            .collect();

        let attributes = metadata
            .edited_pairs()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Ok(Self {
            rows: image.height as u32,
            columns: image.width as u32,
            pixel_data,
            attributes,
            institution_name: INSTITUTION.to_string(),
            manufacturer: INSTITUTION.to_string(),
        })
    }

    /// Pixel data as little-endian bytes (the PixelData element body).
    pub fn pixel_bytes(&self) -> Vec<u8> {
        self.pixel_data
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect()
    }

    /// Look up an exported attribute by DICOM keyword.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetaField;

    #[test]
    fn test_dimensions_and_pixels() {
        let image = Grid::new(3, 2, vec![0.0, 0.5, 1.0, 1.5, -0.2, 0.25]);
        let export = DicomExport::from_reconstruction(&image, &MetaData::default()).unwrap();

        assert_eq!(export.rows, 2);
        assert_eq!(export.columns, 3);
        assert_eq!(export.pixel_data, vec![0, 127, 255, 255, 0, 63]);
    }

    #[test]
    fn test_pixel_bytes_little_endian() {
        let image = Grid::new(2, 1, vec![1.0, 0.0]);
        let export = DicomExport::from_reconstruction(&image, &MetaData::default()).unwrap();
        assert_eq!(export.pixel_bytes(), vec![0xFF, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_uses_edited_metadata() {
        let meta = MetaData::from_pairs([("PatientName", "Jan")])
            .with_edit(MetaField::PatientName, "Jan Kowalski")
            .with_edit(MetaField::StudyDate, "20210401");
        let export = DicomExport::from_reconstruction(&Grid::zeros(1, 1), &meta).unwrap();

        assert_eq!(export.attributes.len(), 6);
        assert_eq!(export.attribute("PatientName"), Some("Jan Kowalski"));
        assert_eq!(export.attribute("StudyDate"), Some("20210401"));
        assert_eq!(export.attribute("PatientSex"), Some("-"));
        assert_eq!(export.attribute("Modality"), None);
    }

    #[test]
    fn test_institutional_fields() {
        let export = DicomExport::from_reconstruction(&Grid::zeros(1, 1), &MetaData::default()).unwrap();
        assert_eq!(export.institution_name, INSTITUTION);
        assert_eq!(export.manufacturer, INSTITUTION);
    }

    #[test]
    fn test_empty_image_rejected() {
        let result = DicomExport::from_reconstruction(&Grid::zeros(0, 0), &MetaData::default());
        assert_eq!(result, Err(ExportError::EmptyImage));
    }
}

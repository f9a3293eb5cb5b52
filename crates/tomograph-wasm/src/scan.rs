//! Scan WASM bindings.
//!
//! This module exposes the scan pipeline and the result cache to JavaScript.
//!
//! # Example
//!
//! ```typescript
//! import { Scanner, ScanOptions } from '@tomograph/wasm';
//!
//! const scanner = new Scanner();
//! const options = new ScanOptions();
//! options.detector_count = 180;
//! options.apply_filter = true;
//!
//! const result = scanner.scan(new Uint8Array(await file.arrayBuffer()), options);
//! const gif = result.reconstruction_gif();
//! console.log(`Final MSE ${result.final_error}`);
//! ```

use std::sync::Arc;

use tomograph_core::decode::decode_grayscale;
use tomograph_core::encode::{
    encode_gif, sinogram_frames, EncodeError, OUTPUT_FRAME_DELAY_MS, SINOGRAM_FRAME_DELAY_MS,
};
use tomograph_core::export::{DicomExport, ExportError};
use tomograph_core::{MetaData, MetaField, ResultCache, ScanConfig, ScanError, ScanResult};
use wasm_bindgen::prelude::*;

use crate::options::ScanOptions;
use crate::types::JsGrid;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Results a [`Scanner`] keeps before evicting the oldest.
pub const SCANNER_CACHE_ENTRIES: usize = 8;

/// A scanner that remembers finished scans.
///
/// Scanning the same file with the same options twice returns the stored
/// result instead of recomputing it. At most [`SCANNER_CACHE_ENTRIES`]
/// results are kept; `clear()` drops them all at once.
#[wasm_bindgen]
pub struct Scanner {
    cache: ResultCache,
}

#[wasm_bindgen]
impl Scanner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Scanner {
        Scanner {
            cache: ResultCache::with_max_entries(SCANNER_CACHE_ENTRIES),
        }
    }

    /// Decode a PNG or JPEG file and scan it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be decoded or the options are
    /// out of range.
    pub fn scan(&mut self, bytes: &[u8], options: &ScanOptions) -> Result<JsScanResult, JsValue> {
        self.scan_config(bytes, options.inner()).map_err(to_js_error)
    }

    /// Number of stored results
    #[wasm_bindgen(getter)]
    pub fn cached_results(&self) -> usize {
        self.cache.len()
    }

    /// Drop every stored result
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    fn scan_config(&mut self, bytes: &[u8], config: &ScanConfig) -> Result<JsScanResult, ScanError> {
        config.validate()?;
        let loaded = decode_grayscale(bytes)?;
        let result = self
            .cache
            .get_or_compute(&loaded.image, &loaded.metadata, config)?;
        Ok(JsScanResult::new(result))
    }
}

/// Decode and scan a file without caching.
#[wasm_bindgen]
pub fn scan_image(bytes: &[u8], options: &ScanOptions) -> Result<JsScanResult, JsValue> {
    tomograph_core::scan_bytes(bytes, options.inner())
        .map(|result| JsScanResult::new(Arc::new(result)))
        .map_err(to_js_error)
}

/// The outputs of one scan.
///
/// The scan itself is shared with the scanner's cache. Metadata edits are
/// kept on this handle only.
#[wasm_bindgen]
pub struct JsScanResult {
    result: Arc<ScanResult>,
    metadata: MetaData,
}

#[wasm_bindgen]
impl JsScanResult {
    /// Number of emitter positions
    #[wasm_bindgen(getter)]
    pub fn angle_steps(&self) -> usize {
        self.result.angle_steps()
    }

    /// The raw sinogram
    pub fn sinogram(&self) -> JsGrid {
        JsGrid::from_grid(&self.result.sinogram)
    }

    /// The normalized filtered sinogram, when filtering was requested
    pub fn filtered_sinogram(&self) -> Option<JsGrid> {
        self.result.filtered_sinogram.as_ref().map(JsGrid::from_grid)
    }

    /// Number of reconstruction snapshots
    #[wasm_bindgen(getter)]
    pub fn snapshot_count(&self) -> usize {
        self.result.reconstructions.len()
    }

    /// Snapshot `index`, or undefined when out of range
    pub fn snapshot(&self, index: usize) -> Option<JsGrid> {
        self.result.reconstructions.get(index).map(JsGrid::from_grid)
    }

    /// The reconstruction after all angles
    pub fn final_reconstruction(&self) -> JsGrid {
        JsGrid::from_grid(self.result.final_reconstruction())
    }

    /// Mean squared error of every snapshot as Float64Array
    pub fn mse(&self) -> Vec<f64> {
        self.result.mse.clone()
    }

    /// Error of the final reconstruction
    #[wasm_bindgen(getter)]
    pub fn final_error(&self) -> f64 {
        self.result.final_error()
    }

    /// Metadata entries as `{ field, decoded, edited }` objects
    pub fn metadata(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.metadata).map_err(to_js_error)
    }

    /// Edit one metadata field by its DICOM keyword (e.g. `PatientName`).
    pub fn edit_metadata(&mut self, name: &str, value: &str) -> Result<(), JsValue> {
        if self.apply_edit(name, value) {
            Ok(())
        } else {
            Err(JsValue::from_str(&format!("Unknown metadata field: {}", name)))
        }
    }

    /// Raw sinogram build-up animation as GIF bytes
    pub fn sinogram_gif(&self) -> Result<Vec<u8>, JsValue> {
        self.sinogram_animation().map_err(to_js_error)
    }

    /// Reconstruction snapshots as GIF bytes
    pub fn reconstruction_gif(&self) -> Result<Vec<u8>, JsValue> {
        self.reconstruction_animation().map_err(to_js_error)
    }

    /// DICOM attributes for the final reconstruction, using edited metadata
    pub fn dicom_export(&self) -> Result<JsValue, JsValue> {
        let export = self.export().map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&export).map_err(to_js_error)
    }

    /// PixelData bytes (16-bit little-endian) for the final reconstruction
    pub fn dicom_pixel_bytes(&self) -> Result<Vec<u8>, JsValue> {
        self.export().map(|e| e.pixel_bytes()).map_err(to_js_error)
    }
}

impl JsScanResult {
    fn new(result: Arc<ScanResult>) -> Self {
        let metadata = result.metadata.clone();
        Self { result, metadata }
    }

    fn apply_edit(&mut self, name: &str, value: &str) -> bool {
        match MetaField::from_name(name) {
            Some(field) => {
                self.metadata = self.metadata.with_edit(field, value);
                true
            }
            None => false,
        }
    }

    fn sinogram_animation(&self) -> Result<Vec<u8>, EncodeError> {
        encode_gif(&sinogram_frames(&self.result.sinogram), SINOGRAM_FRAME_DELAY_MS)
    }

    fn reconstruction_animation(&self) -> Result<Vec<u8>, EncodeError> {
        encode_gif(&self.result.reconstructions, OUTPUT_FRAME_DELAY_MS)
    }

    fn export(&self) -> Result<DicomExport, ExportError> {
        DicomExport::from_reconstruction(self.result.final_reconstruction(), &self.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(side: u32) -> Vec<u8> {
        let img = image::GrayImage::from_fn(side, side, |x, y| {
            image::Luma([if (x + y) % 2 == 0 { 255 } else { 40 }])
        });
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn config() -> ScanConfig {
        ScanConfig {
            emitter_step: 30.0,
            detector_count: 9,
            detector_span: 120.0,
            animate: true,
            ..ScanConfig::default()
        }
    }

    #[test]
    fn test_scanner_caches_results() {
        let mut scanner = Scanner::new();
        let bytes = png_bytes(6);

        let first = scanner.scan_config(&bytes, &config()).unwrap();
        let second = scanner.scan_config(&bytes, &config()).unwrap();

        assert!(Arc::ptr_eq(&first.result, &second.result));
        assert_eq!(scanner.cached_results(), 1);

        scanner.clear();
        assert_eq!(scanner.cached_results(), 0);
    }

    #[test]
    fn test_scanner_rejects_bad_options() {
        let mut scanner = Scanner::new();
        let mut bad = config();
        bad.detector_span = 0.0;
        assert!(matches!(
            scanner.scan_config(&png_bytes(4), &bad),
            Err(ScanError::Config(_))
        ));
        assert_eq!(scanner.cached_results(), 0);
    }

    #[test]
    fn test_result_accessors() {
        let mut scanner = Scanner::new();
        let result = scanner.scan_config(&png_bytes(6), &config()).unwrap();

        assert_eq!(result.angle_steps(), 12);
        assert_eq!(result.sinogram().width(), 9);
        assert_eq!(result.sinogram().height(), 12);
        assert!(result.filtered_sinogram().is_none());
        assert_eq!(result.snapshot_count(), 12);
        assert!(result.snapshot(11).is_some());
        assert!(result.snapshot(12).is_none());
        assert_eq!(result.mse().len(), 12);
        assert_eq!(result.final_error(), result.mse()[11]);
        assert_eq!(result.final_reconstruction().width(), 6);
    }

    #[test]
    fn test_edits_stay_on_handle() {
        let mut scanner = Scanner::new();
        let bytes = png_bytes(4);
        let mut edited = scanner.scan_config(&bytes, &config()).unwrap();

        assert!(edited.apply_edit("PatientName", "Jan Kowalski"));
        assert!(!edited.apply_edit("Modality", "CT"));

        let fresh = scanner.scan_config(&bytes, &config()).unwrap();
        assert_eq!(edited.metadata.get(MetaField::PatientName).edited(), "Jan Kowalski");
        assert_eq!(fresh.metadata.get(MetaField::PatientName).edited(), "-");
    }

    #[test]
    fn test_animations_encode() {
        let mut scanner = Scanner::new();
        let result = scanner.scan_config(&png_bytes(6), &config()).unwrap();

        assert_eq!(&result.sinogram_animation().unwrap()[0..6], b"GIF89a");
        assert_eq!(&result.reconstruction_animation().unwrap()[0..6], b"GIF89a");
    }

    #[test]
    fn test_filtered_scan_animates_raw_sinogram() {
        let mut scanner = Scanner::new();
        let mut filtered = config();
        filtered.apply_filter = true;
        let result = scanner.scan_config(&png_bytes(6), &filtered).unwrap();

        let raw = &result.result.sinogram;
        assert!(result.result.filtered_sinogram.as_ref().is_some_and(|f| f != raw));

        let expected = encode_gif(&sinogram_frames(raw), SINOGRAM_FRAME_DELAY_MS).unwrap();
        assert_eq!(result.sinogram_animation().unwrap(), expected);
    }

    #[test]
    fn test_scanner_cache_is_bounded() {
        let mut scanner = Scanner::new();
        for side in 2..(2 + SCANNER_CACHE_ENTRIES as u32 + 3) {
            scanner.scan_config(&png_bytes(side), &config()).unwrap();
        }
        assert_eq!(scanner.cached_results(), SCANNER_CACHE_ENTRIES);
    }

    #[test]
    fn test_export_uses_edits() {
        let mut scanner = Scanner::new();
        let mut result = scanner.scan_config(&png_bytes(5), &config()).unwrap();
        result.apply_edit("StudyDate", "20210401");

        let export = result.export().unwrap();
        assert_eq!((export.rows, export.columns), (5, 5));
        assert_eq!(export.attribute("StudyDate"), Some("20210401"));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_scan_image_rejects_garbage() {
        let result = scan_image(&[0, 1, 2, 3], &ScanOptions::new());
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_edit_unknown_field() {
        let bytes = {
            let img = image::GrayImage::from_pixel(4, 4, image::Luma([200]));
            let mut bytes = Vec::new();
            img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
                .unwrap();
            bytes
        };
        let mut options = ScanOptions::new();
        options.set_emitter_step(45.0);
        options.set_detector_count(5);

        let mut result = scan_image(&bytes, &options).unwrap();
        assert!(result.edit_metadata("PatientSex", "F").is_ok());
        assert!(result.edit_metadata("Unknown", "x").is_err());
    }
}

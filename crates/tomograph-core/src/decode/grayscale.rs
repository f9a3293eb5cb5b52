//! PNG/JPEG decoding into a normalized grayscale grid.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::{DecodeError, LoadedImage};
use crate::grid::Grid;
use crate::metadata::MetaData;

/// Decode PNG or JPEG bytes into a grayscale grid with values in [0, 1].
///
/// Color images are converted to 8-bit luma first. Raster formats carry
/// none of the patient fields, so the metadata is all placeholders.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not PNG or JPEG.
/// Returns `DecodeError::CorruptedFile` if the image data is damaged.
/// Returns `DecodeError::EmptyImage` if the image has no pixels.
pub fn decode_grayscale(bytes: &[u8]) -> Result<LoadedImage, DecodeError> {
    let image = decode_luma(bytes)?;
    Ok(LoadedImage {
        image,
        metadata: MetaData::default(),
    })
}

/// Decode PNG or JPEG bytes into a grayscale grid, without metadata.
pub fn decode_luma(bytes: &[u8]) -> Result<Grid, DecodeError> {
    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    match reader.format() {
        Some(ImageFormat::Png) | Some(ImageFormat::Jpeg) => {}
        _ => return Err(DecodeError::InvalidFormat),
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let luma = img.into_luma8();
    let (width, height) = luma.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage);
    }

    let data = luma
        .into_raw()
        .into_iter()
        .map(|v| f64::from(v) / 255.0)
        .collect();
    Ok(Grid::new(width as usize, height as usize, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage};

    // Minimal valid JPEG bytes (1x1 pixel)
    const MINIMAL_JPEG: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xDB, 0x00, 0x43, 0x00, 0x08, 0x06, 0x06, 0x07, 0x06,
        0x05, 0x08, 0x07, 0x07, 0x07, 0x09, 0x09, 0x08, 0x0A, 0x0C, 0x14, 0x0D, 0x0C, 0x0B, 0x0B,
        0x0C, 0x19, 0x12, 0x13, 0x0F, 0x14, 0x1D, 0x1A, 0x1F, 0x1E, 0x1D, 0x1A, 0x1C, 0x1C, 0x20,
        0x24, 0x2E, 0x27, 0x20, 0x22, 0x2C, 0x23, 0x1C, 0x1C, 0x28, 0x37, 0x29, 0x2C, 0x30, 0x31,
        0x34, 0x34, 0x34, 0x1F, 0x27, 0x39, 0x3D, 0x38, 0x32, 0x3C, 0x2E, 0x33, 0x34, 0x32, 0xFF,
        0xC0, 0x00, 0x0B, 0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01, 0x11, 0x00, 0xFF, 0xC4, 0x00,
        0x1F, 0x00, 0x00, 0x01, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
        0xFF, 0xC4, 0x00, 0xB5, 0x10, 0x00, 0x02, 0x01, 0x03, 0x03, 0x02, 0x04, 0x03, 0x05, 0x05,
        0x04, 0x04, 0x00, 0x00, 0x01, 0x7D, 0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21,
        0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07, 0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08,
        0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52, 0xD1, 0xF0, 0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A,
        0x16, 0x17, 0x18, 0x19, 0x1A, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x34, 0x35, 0x36, 0x37,
        0x38, 0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x53, 0x54, 0x55, 0x56,
        0x57, 0x58, 0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x73, 0x74, 0x75,
        0x76, 0x77, 0x78, 0x79, 0x7A, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8A, 0x92, 0x93,
        0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9,
        0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6,
        0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2,
        0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7,
        0xF8, 0xF9, 0xFA, 0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00, 0xFB, 0xD5,
        0xDB, 0x20, 0xA8, 0xF1, 0x7E, 0xFF, 0xD9,
    ];

    fn encode_png(img: image::DynamicImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_decode_gray_png() {
        let gray = GrayImage::from_raw(2, 2, vec![0, 255, 51, 255]).unwrap();
        let bytes = encode_png(image::DynamicImage::ImageLuma8(gray));

        let grid = decode_luma(&bytes).unwrap();
        assert_eq!(grid.width, 2);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.data, vec![0.0, 1.0, 0.2, 1.0]);
    }

    #[test]
    fn test_decode_rgb_png_converts_to_luma() {
        let rgb = RgbImage::from_raw(3, 1, vec![255, 255, 255, 0, 0, 0, 128, 128, 128]).unwrap();
        let bytes = encode_png(image::DynamicImage::ImageRgb8(rgb));

        let grid = decode_luma(&bytes).unwrap();
        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 1);
        assert!((grid.data[0] - 1.0).abs() < 1e-9);
        assert!(grid.data[1].abs() < 1e-9);
        assert!((grid.data[2] - 128.0 / 255.0).abs() < 0.01);
    }

    #[test]
    fn test_decode_non_square_png() {
        let gray = GrayImage::from_raw(5, 3, vec![10; 15]).unwrap();
        let bytes = encode_png(image::DynamicImage::ImageLuma8(gray));

        let grid = decode_luma(&bytes).unwrap();
        assert_eq!((grid.width, grid.height), (5, 3));
    }

    #[test]
    fn test_decode_valid_jpeg() {
        let grid = decode_luma(MINIMAL_JPEG).unwrap();
        assert_eq!(grid.width, 1);
        assert_eq!(grid.height, 1);
        assert!((0.0..=1.0).contains(&grid.data[0]));
    }

    #[test]
    fn test_decode_grayscale_has_placeholder_metadata() {
        let loaded = decode_grayscale(MINIMAL_JPEG).unwrap();
        assert_eq!(loaded.metadata, MetaData::default());
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_luma(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_luma(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        // JPEG header but truncated
        let result = decode_luma(&MINIMAL_JPEG[0..20]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_rejects_gif() {
        let gif_header = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";
        let result = decode_luma(gif_header);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }
}

//! GIF encoding of grayscale frame sequences.

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};
use thiserror::Error;

use crate::grid::Grid;

/// Per-frame delay for the sinogram build-up animation.
pub const SINOGRAM_FRAME_DELAY_MS: u32 = 15;

/// Per-frame delay for the reconstruction animation.
pub const OUTPUT_FRAME_DELAY_MS: u32 = 30;

/// Errors that can occur during GIF encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// No frames were supplied
    #[error("Cannot encode an animation without frames")]
    NoFrames,

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: usize, height: usize },

    /// A frame differs in size from the first frame
    #[error("Frame {index} is {width}x{height}, expected {expected_width}x{expected_height}")]
    FrameSizeMismatch {
        index: usize,
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },

    /// GIF encoding failed
    #[error("GIF encoding failed: {0}")]
    EncodingFailed(String),
}

/// Convert a [0, 1] grid to 8-bit gray, clamping out-of-range values.
pub fn to_gray8(grid: &Grid) -> Vec<u8> {
    grid.data
        .iter()
        .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect()
}

/// Frames revealing the sinogram one angle at a time.
///
/// The first frame is blank and the last shows the full sinogram, so the
/// sequence has `height + 1` frames.
pub fn sinogram_frames(sinogram: &Grid) -> Vec<Grid> {
    (0..=sinogram.height)
        .map(|rows| sinogram.reveal_rows(rows))
        .collect()
}

/// Encode `frames` as an infinitely looping GIF.
///
/// # Arguments
///
/// * `frames` - Grayscale frames, all the same size
/// * `delay_ms` - Display time of each frame in milliseconds
///
/// # Returns
///
/// GIF-encoded bytes on success, or an error if the frames are unusable.
pub fn encode_gif(frames: &[Grid], delay_ms: u32) -> Result<Vec<u8>, EncodeError> {
    let first = frames.first().ok_or(EncodeError::NoFrames)?;
    let (width, height) = (first.width, first.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    if let Some((index, frame)) = frames
        .iter()
        .enumerate()
        .find(|(_, f)| (f.width, f.height) != (width, height))
    {
        return Err(EncodeError::FrameSizeMismatch {
            index,
            width: frame.width,
            height: frame.height,
            expected_width: width,
            expected_height: height,
        });
    }

    let delay = Delay::from_numer_denom_ms(delay_ms, 1);
    let mut buffer = Vec::new();
    {
        // The trailer is written when the encoder is dropped
        let mut encoder = GifEncoder::new(&mut buffer);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        encoder
            .encode_frames(frames.iter().map(|grid| Frame::from_parts(to_rgba(grid), 0, 0, delay)))
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    }

    tracing::debug!(
        "Encoded {} frame(s) at {}x{} into {} byte GIF",
        frames.len(),
        width,
        height,
        buffer.len()
    );
    Ok(buffer)
}

fn to_rgba(grid: &Grid) -> RgbaImage {
    let gray = to_gray8(grid);
    RgbaImage::from_fn(grid.width as u32, grid.height as u32, |x, y| {
        let v = gray[y as usize * grid.width + x as usize];
        Rgba([v, v, v, 255])
    })
}

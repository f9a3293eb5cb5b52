//! Animated output for scan results.
//!
//! The sinogram is rendered as a build-up animation (one more row per
//! frame) and the reconstruction snapshots as a sequence, both as looping
//! GIFs. Frames are grayscale grids with values in [0, 1].
//!
//! # Examples
//!
//! ```ignore
//! use tomograph_core::encode::{encode_gif, sinogram_frames, SINOGRAM_FRAME_DELAY_MS};
//!
//! let frames = sinogram_frames(&result.sinogram);
//! let gif = encode_gif(&frames, SINOGRAM_FRAME_DELAY_MS)?;
//! ```

mod gif;

pub use gif::{
    encode_gif, sinogram_frames, to_gray8, EncodeError, OUTPUT_FRAME_DELAY_MS,
    SINOGRAM_FRAME_DELAY_MS,
};

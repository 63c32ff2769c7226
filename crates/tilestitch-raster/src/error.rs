//! Error types for the raster crate.

use thiserror::Error;

/// Errors that can occur while compositing tiles onto the canvas.
#[derive(Debug, Error)]
pub enum RasterError {
    /// A decoded tile is not the configured tile size.
    #[error("Got {width}x{height} tile, not {expected}")]
    TileSizeMismatch {
        /// Decoded tile width.
        width: u32,
        /// Decoded tile height.
        height: u32,
        /// Configured tile size.
        expected: u32,
    },

    /// The tile has a channel count other than 1, 3 or 4.
    #[error("Unsupported channel depth {0} (expected 1, 3 or 4)")]
    UnsupportedChannelDepth(u8),

    /// Pixel buffer length disagrees with the image dimensions.
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferLength {
        /// Bytes required by width x height x channels.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
}

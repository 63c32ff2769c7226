//! Error types for the geometry crate.

use thiserror::Error;

/// Errors raised while resolving the requested area into a raster layout.
///
/// Every variant is a configuration problem: nothing has been fetched yet
/// when one of these is returned.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Zoom level below zero.
    #[error("Zoom {0} less than 0")]
    InvalidZoom(i32),

    /// Zoom level too deep for the 32-bit fixed-point tile grid.
    #[error("Zoom {zoom} exceeds the maximum supported zoom {max}")]
    ZoomTooDeep {
        /// Requested zoom level.
        zoom: i32,
        /// Deepest supported zoom level.
        max: u8,
    },

    /// Centered-mode width or height is not positive.
    #[error("Width/height must be greater than 0: {width} {height}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: i64,
        /// Requested height in pixels.
        height: i64,
    },

    /// Tile size of zero pixels.
    #[error("Tile size must be greater than 0")]
    InvalidTileSize,

    /// The resolved area produces a raster with no pixels.
    #[error("Raster size {width}x{height} is empty")]
    EmptyRaster {
        /// Computed raster width.
        width: u64,
        /// Computed raster height.
        height: u64,
    },

    /// The resolved area produces a raster above the memory guard.
    #[error("Raster size {width}x{height} is too big (limit is {limit} pixels)")]
    RasterTooLarge {
        /// Computed raster width.
        width: u64,
        /// Computed raster height.
        height: u64,
        /// Maximum number of pixels allowed.
        limit: u64,
    },
}

//! Error types for the I/O crate.

use thiserror::Error;

/// Errors that can occur while fetching, decoding or writing rasters.
#[derive(Debug, Error)]
pub enum StitchIoError {
    /// I/O error writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request error when fetching tiles.
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Tile server answered with a non-success status.
    #[error("Can't retrieve {url}: HTTP {status}")]
    FetchFailed {
        /// Requested URL.
        url: String,
        /// HTTP status returned.
        status: u16,
    },

    /// Fetched bytes are neither PNG nor JPEG.
    #[error("Don't recognize file format of {0}")]
    UnknownFormat(String),

    /// PNG/JPEG decoding or PNG encoding error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// TIFF encoding error.
    #[error("TIFF encode error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// Decoded tile could not be wrapped.
    #[error(transparent)]
    Raster(#[from] tilestitch_raster::RasterError),

    /// A `{c}` token in a URL template that is not z, x, y or s.
    #[error("Unknown format token {{{0}}} in URL template")]
    UnknownTemplateToken(char),

    /// Output format name not recognized.
    #[error("Unknown output format '{0}' (expected png or geotiff)")]
    UnknownOutputFormat(String),

    /// GeoTIFF needs a seekable file.
    #[error("Can't write TIFF to stdout")]
    GeoTiffToStdout,
}

//! Decoding fetched tile bytes.
//!
//! The format is chosen from the leading magic bytes only, never from the
//! URL or a content type.

use crate::{Result, StitchIoError};
use image::{ColorType, DynamicImage, ImageFormat};
use tilestitch_raster::TileImage;

const PNG_MAGIC: &[u8] = b"\x89PNG";
const JPEG_MAGIC: &[u8] = b"\xFF\xD8";

/// Tile encodings the stitcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileFormat {
    /// Portable Network Graphics.
    Png,
    /// JPEG/JFIF.
    Jpeg,
}

impl TileFormat {
    /// Identify the format from the magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PNG_MAGIC) {
            Some(Self::Png)
        } else if bytes.starts_with(JPEG_MAGIC) {
            Some(Self::Jpeg)
        } else {
            None
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Decode a fetched tile into 8-bit gray, RGB or RGBA samples.
///
/// 16-bit samples are reduced to 8 bits, and gray+alpha or palette images
/// are expanded to RGBA so every tile has 1, 3 or 4 channels.
pub fn decode_tile(bytes: &[u8], source: &str) -> Result<TileImage> {
    let format = TileFormat::sniff(bytes)
        .ok_or_else(|| StitchIoError::UnknownFormat(source.to_string()))?;
    let image = image::load_from_memory_with_format(bytes, format.image_format())?;
    Ok(into_tile_image(image)?)
}

fn into_tile_image(image: DynamicImage) -> tilestitch_raster::Result<TileImage> {
    let (width, height) = (image.width(), image.height());
    match image.color() {
        ColorType::L8 | ColorType::L16 => {
            TileImage::new(width, height, 1, image.into_luma8().into_raw())
        }
        ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => {
            TileImage::new(width, height, 3, image.into_rgb8().into_raw())
        }
        _ => TileImage::new(width, height, 4, image.into_rgba8().into_raw()),
    }
}

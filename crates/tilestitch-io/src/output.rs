//! Raster output: PNG, GeoTIFF and world files.

use crate::geotiff::write_geotiff;
use crate::{Result, StitchIoError};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tilestitch_geo::Georeference;
use tilestitch_raster::Canvas;
use tracing::info;

/// Encoding of the stitched raster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// RGBA PNG, to a file or stdout.
    #[default]
    Png,
    /// LZW-compressed RGBA GeoTIFF in EPSG:3857. File output only.
    GeoTiff,
}

impl OutputFormat {
    /// Extension of the world file that accompanies this format.
    pub fn world_file_extension(self) -> &'static str {
        match self {
            Self::Png => "pnw",
            Self::GeoTiff => "tfw",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "png"),
            Self::GeoTiff => write!(f, "geotiff"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = StitchIoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "png" => Ok(Self::Png),
            "geotiff" => Ok(Self::GeoTiff),
            other => Err(StitchIoError::UnknownOutputFormat(other.to_string())),
        }
    }
}

/// Encode `canvas` as an 8-bit RGBA PNG.
pub fn write_png<W: Write>(canvas: &Canvas, writer: W) -> Result<()> {
    PngEncoder::new(writer).write_image(
        canvas.as_bytes(),
        canvas.width(),
        canvas.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(())
}

/// Write the raster in `format` to `path`, or to stdout when `path` is
/// `None`. GeoTIFF can only go to a file.
pub fn write_raster(
    canvas: &Canvas,
    georef: &Georeference,
    format: OutputFormat,
    path: Option<&Path>,
) -> Result<()> {
    match (format, path) {
        (OutputFormat::Png, Some(path)) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_png(canvas, &mut writer)?;
            writer.flush()?;
            info!("Wrote PNG {}", path.display());
        }
        (OutputFormat::Png, None) => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_png(canvas, &mut writer)?;
            writer.flush()?;
        }
        (OutputFormat::GeoTiff, Some(path)) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_geotiff(canvas, georef, &mut writer)?;
            writer.flush()?;
            info!("Wrote GeoTIFF {}", path.display());
        }
        (OutputFormat::GeoTiff, None) => return Err(StitchIoError::GeoTiffToStdout),
    }
    Ok(())
}

/// Path of the world file for a raster written to `raster_path`: the
/// raster's extension is replaced (or added) with `.pnw` or `.tfw`.
pub fn world_file_path(raster_path: &Path, format: OutputFormat) -> PathBuf {
    raster_path.with_extension(format.world_file_extension())
}

/// Render the six world-file lines, each right-aligned in 24 columns with
/// 10 decimal places.
pub fn format_world_file(georef: &Georeference) -> String {
    georef
        .world_file_coefficients()
        .iter()
        .map(|value| format!("{value:24.10}\n"))
        .collect()
}

/// Write the world file next to `raster_path` and return its path.
pub fn write_world_file(raster_path: &Path, format: OutputFormat, georef: &Georeference) -> Result<PathBuf> {
    let path = world_file_path(raster_path, format);
    std::fs::write(&path, format_world_file(georef))?;
    info!("Wrote world file {}", path.display());
    Ok(path)
}

//! GeoTIFF output.
//!
//! Writes the canvas as an LZW-compressed RGBA TIFF in Pseudo-Mercator
//! (EPSG:3857), georeferenced with a single tie point at the top-left
//! corner plus the pixel scale.

use crate::Result;
use std::io::{Seek, Write};
use tiff::encoder::colortype::RGBA8;
use tiff::encoder::compression::Lzw;
use tiff::encoder::{DirectoryEncoder, TiffEncoder, TiffKind};
use tiff::tags::Tag;
use tiff::TiffResult;
use tilestitch_geo::Georeference;
use tilestitch_raster::Canvas;

// GeoTIFF tag IDs (not in the standard tiff crate)
const GEOTIFF_MODELPIXELSCALE: u16 = 33550;
const GEOTIFF_MODELTIEPOINT: u16 = 33922;
const GEOTIFF_GEOKEYDIRECTORY: u16 = 34735;
const GEOTIFF_GEOASCIIPARAMS: u16 = 34737;

// GeoKey IDs
const GT_MODEL_TYPE_GEO_KEY: u16 = 1024;
const GT_RASTER_TYPE_GEO_KEY: u16 = 1025;
const GT_CITATION_GEO_KEY: u16 = 1026;
const GEOG_CITATION_GEO_KEY: u16 = 2049;
const GEOG_LINEAR_UNITS_GEO_KEY: u16 = 2052;
const GEOG_ANGULAR_UNITS_GEO_KEY: u16 = 2054;
const PROJECTED_CS_TYPE_GEO_KEY: u16 = 3072;

// GeoKey values
const MODEL_TYPE_PROJECTED: u16 = 1;
const RASTER_PIXEL_IS_AREA: u16 = 1;
const LINEAR_METER: u16 = 9001;
const ANGULAR_DEGREE: u16 = 9102;
const EPSG_PSEUDO_MERCATOR: u16 = 3857;

const PROJECTED_CITATION: &str = "WGS 84 / Pseudo-Mercator";
const GEOGRAPHIC_CITATION: &str = "WGS 84";

const ROWS_PER_STRIP: u32 = 20;

/// Write `canvas` as a GeoTIFF.
pub fn write_geotiff<W: Write + Seek>(canvas: &Canvas, georef: &Georeference, writer: W) -> Result<()> {
    let mut encoder = TiffEncoder::new(writer)?;
    let mut image =
        encoder.new_image_with_compression::<RGBA8, _>(canvas.width(), canvas.height(), Lzw::default())?;
    image.rows_per_strip(ROWS_PER_STRIP)?;
    write_geotiff_tags(image.encoder(), georef)?;
    image.write_data(canvas.as_bytes())?;
    Ok(())
}

fn write_geotiff_tags<W: Write + Seek, K: TiffKind>(
    dir: &mut DirectoryEncoder<'_, W, K>,
    georef: &Georeference,
) -> TiffResult<()> {
    dir.write_tag(Tag::Unknown(GEOTIFF_MODELPIXELSCALE), &georef.pixel_scale()[..])?;
    dir.write_tag(Tag::Unknown(GEOTIFF_MODELTIEPOINT), &georef.tie_point()[..])?;

    let (keys, ascii) = geokey_directory();
    dir.write_tag(Tag::Unknown(GEOTIFF_GEOKEYDIRECTORY), keys.as_slice())?;
    dir.write_tag(Tag::Unknown(GEOTIFF_GEOASCIIPARAMS), ascii.as_str())?;
    Ok(())
}

/// Build the GeoKeyDirectory and its GeoAsciiParams.
///
/// Directory layout: `[version, revision, minor, count]` followed by
/// `[key, location, count, value_or_offset]` per key, sorted by key ID.
/// ASCII values live in GeoAsciiParams, each terminated by `|`.
fn geokey_directory() -> (Vec<u16>, String) {
    let ascii = format!("{PROJECTED_CITATION}|{GEOGRAPHIC_CITATION}|");
    let projected_len = PROJECTED_CITATION.len() as u16 + 1;
    let geographic_len = GEOGRAPHIC_CITATION.len() as u16 + 1;

    let entries: [[u16; 4]; 7] = [
        [GT_MODEL_TYPE_GEO_KEY, 0, 1, MODEL_TYPE_PROJECTED],
        [GT_RASTER_TYPE_GEO_KEY, 0, 1, RASTER_PIXEL_IS_AREA],
        [GT_CITATION_GEO_KEY, GEOTIFF_GEOASCIIPARAMS, projected_len, 0],
        [GEOG_CITATION_GEO_KEY, GEOTIFF_GEOASCIIPARAMS, geographic_len, projected_len],
        [GEOG_LINEAR_UNITS_GEO_KEY, 0, 1, LINEAR_METER],
        [GEOG_ANGULAR_UNITS_GEO_KEY, 0, 1, ANGULAR_DEGREE],
        [PROJECTED_CS_TYPE_GEO_KEY, 0, 1, EPSG_PSEUDO_MERCATOR],
    ];

    let mut keys = vec![1, 1, 0, entries.len() as u16];
    for entry in entries {
        keys.extend_from_slice(&entry);
    }
    (keys, ascii)
}

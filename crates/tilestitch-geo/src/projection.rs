//! Web Mercator projection math.
//!
//! Three coordinate spaces are used throughout the stitcher:
//! - geographic degrees (WGS 84 latitude/longitude)
//! - fractional tile-grid coordinates at a given zoom (slippy map convention,
//!   `x` grows eastward and `y` grows southward)
//! - Pseudo-Mercator projected meters (EPSG:3857)
//!
//! Latitudes are not clamped. Inputs beyond ±85.0511° (`atan(sinh(π))`) fall
//! outside the square Mercator world and produce grid values outside
//! `[0, 2^zoom)`; at ±90° the formulas diverge.

use crate::{GeoError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Half the equatorial circumference of the WGS 84 sphere, `π * 6378137`.
pub const ORIGIN_SHIFT: f64 = 20037508.342789244;

/// Zoom level of the fixed-point grid used for sub-tile alignment.
///
/// At this zoom every tile-grid unit fits in a `u32`, which leaves 8 bits of
/// pixel precision below a zoom-24 tile.
pub const PRECISION_ZOOM: u8 = 32;

/// Number of bits addressing a pixel inside a 256-pixel tile.
pub const PIXEL_BITS: u8 = 8;

/// Deepest zoom that still has pixel precision in the fixed-point grid.
pub const MAX_ZOOM: u8 = PRECISION_ZOOM - PIXEL_BITS;

/// Validate a user-supplied zoom level.
pub fn check_zoom(zoom: i32) -> Result<u8> {
    if zoom < 0 {
        return Err(GeoError::InvalidZoom(zoom));
    }
    if zoom > MAX_ZOOM as i32 {
        return Err(GeoError::ZoomTooDeep {
            zoom,
            max: MAX_ZOOM,
        });
    }
    Ok(zoom as u8)
}

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Project to Pseudo-Mercator meters.
    pub fn to_meters(self) -> (f64, f64) {
        lat_lon_to_meters(self.lat, self.lon)
    }
}

/// Convert latitude/longitude to fractional tile-grid coordinates.
///
/// Uses the OpenStreetMap slippy map formula:
/// - x = 2^z * (lon + 180) / 360
/// - y = 2^z * (1 - ln(tan(lat) + sec(lat)) / π) / 2
pub fn lat_lon_to_tile_grid(lat: f64, lon: f64, zoom: u8) -> (f64, f64) {
    let n = 2f64.powi(zoom as i32);
    let lat_rad = lat.to_radians();

    let x = n * ((lon + 180.0) / 360.0);
    let y = n * (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;

    (x, y)
}

/// Convert fractional tile-grid coordinates back to latitude/longitude.
pub fn tile_grid_to_lat_lon(x: f64, y: f64, zoom: u8) -> (f64, f64) {
    let n = 2f64.powi(zoom as i32);

    let lon = 360.0 * x / n - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees();

    (lat, lon)
}

/// Project latitude/longitude to Pseudo-Mercator (EPSG:3857) meters.
pub fn lat_lon_to_meters(lat: f64, lon: f64) -> (f64, f64) {
    let x = lon * ORIGIN_SHIFT / 180.0;
    let y = ((90.0 + lat) * PI / 360.0).tan().ln() / (PI / 180.0);
    (x, y * ORIGIN_SHIFT / 180.0)
}

/// A position on the fixed-point tile grid at [`PRECISION_ZOOM`].
///
/// Shifting right by `32 - z` yields the tile index at zoom `z`; shifting by
/// `24 - z` yields the absolute pixel index of a 256-pixel tile pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPoint {
    /// Column on the zoom-32 grid.
    pub x: u32,
    /// Row on the zoom-32 grid.
    pub y: u32,
}

impl GridPoint {
    /// Locate a geographic point on the fixed-point grid.
    ///
    /// Values outside the grid saturate to `0` or `u32::MAX`.
    pub fn from_geo(point: GeoPoint) -> Self {
        let (x, y) = lat_lon_to_tile_grid(point.lat, point.lon, PRECISION_ZOOM);
        Self {
            x: x as u32,
            y: y as u32,
        }
    }

    /// Convert back to a geographic point.
    pub fn to_geo(self) -> GeoPoint {
        let (lat, lon) = tile_grid_to_lat_lon(self.x as f64, self.y as f64, PRECISION_ZOOM);
        GeoPoint { lat, lon }
    }

    /// Tile index containing this point at `zoom`.
    ///
    /// # Panics
    ///
    /// Panics if `zoom` exceeds [`PRECISION_ZOOM`].
    pub fn tile(self, zoom: u8) -> (u32, u32) {
        assert!(zoom <= PRECISION_ZOOM, "zoom {} is finer than the grid", zoom);
        let shift = (PRECISION_ZOOM - zoom) as u32;
        (shr(self.x, shift), shr(self.y, shift))
    }

    /// Absolute pixel index of this point at `zoom`, for 256-pixel tiles.
    ///
    /// # Panics
    ///
    /// Panics if `zoom` exceeds [`MAX_ZOOM`]; use [`check_zoom`] on untrusted input.
    pub fn pixel(self, zoom: u8) -> (u32, u32) {
        assert!(zoom <= MAX_ZOOM, "zoom {} is finer than the pixel grid", zoom);
        let shift = (MAX_ZOOM - zoom) as u32;
        (shr(self.x, shift), shr(self.y, shift))
    }
}

fn shr(value: u32, shift: u32) -> u32 {
    ((value as u64) >> shift) as u32
}

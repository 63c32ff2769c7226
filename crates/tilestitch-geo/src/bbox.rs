//! Bounding-box resolution and tile ranges.
//!
//! The requested area is given either as two opposite corners or as a center
//! point with a raster size in pixels. Both are resolved into an [`Extent`]:
//! the normalized geographic box plus its top-left and bottom-right corners
//! on the fixed-point tile grid. The grid corners are what the raster layout
//! is computed from, so centered requests keep their exact pixel size.

use crate::georef::ProjectedBounds;
use crate::projection::{tile_grid_to_lat_lon, GeoPoint, GridPoint, MAX_ZOOM};
use crate::{GeoError, Result};
use serde::{Deserialize, Serialize};

/// A geographic bounding box, normalized so that `min <= max` on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum latitude (south edge).
    pub min_lat: f64,
    /// Minimum longitude (west edge).
    pub min_lon: f64,
    /// Maximum latitude (north edge).
    pub max_lat: f64,
    /// Maximum longitude (east edge).
    pub max_lon: f64,
}

impl BoundingBox {
    /// Build a box from two opposite corners in any order.
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            min_lat: a.lat.min(b.lat),
            min_lon: a.lon.min(b.lon),
            max_lat: a.lat.max(b.lat),
            max_lon: a.lon.max(b.lon),
        }
    }

    /// North-west corner.
    pub fn top_left(&self) -> GeoPoint {
        GeoPoint::new(self.max_lat, self.min_lon)
    }

    /// South-east corner.
    pub fn bottom_right(&self) -> GeoPoint {
        GeoPoint::new(self.min_lat, self.max_lon)
    }

    /// Check if a coordinate is within the box.
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lon >= self.min_lon
            && point.lon <= self.max_lon
    }

    /// Project the box corners to Pseudo-Mercator meters.
    pub fn projected(&self) -> ProjectedBounds {
        let (min_x, min_y) = GeoPoint::new(self.min_lat, self.min_lon).to_meters();
        let (max_x, max_y) = GeoPoint::new(self.max_lat, self.max_lon).to_meters();
        ProjectedBounds {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

/// OSM-style tile coordinates (z, x, y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Zoom level.
    pub z: u8,
    /// X coordinate (column, 0 at 180°W, increases eastward).
    pub x: u32,
    /// Y coordinate (row, 0 at ~85.05°N, increases southward).
    pub y: u32,
}

impl TileCoord {
    /// Create a new tile coordinate.
    pub fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Tile containing a geographic point.
    pub fn from_geo(point: GeoPoint, z: u8) -> Self {
        let (x, y) = GridPoint::from_geo(point).tile(z);
        Self { z, x, y }
    }

    /// Get the geographic bounds of this tile.
    pub fn bounds(&self) -> BoundingBox {
        let (max_lat, min_lon) = tile_grid_to_lat_lon(self.x as f64, self.y as f64, self.z);
        let (min_lat, max_lon) =
            tile_grid_to_lat_lon((self.x + 1) as f64, (self.y + 1) as f64, self.z);
        BoundingBox {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }
}

/// Inclusive rectangle of tile indices at one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    /// Zoom level of the indices.
    pub zoom: u8,
    /// Westmost column.
    pub x1: u32,
    /// Northmost row.
    pub y1: u32,
    /// Eastmost column.
    pub x2: u32,
    /// Southmost row.
    pub y2: u32,
}

impl TileRange {
    /// Number of tile columns.
    pub fn columns(&self) -> u32 {
        span(self.x1, self.x2)
    }

    /// Number of tile rows.
    pub fn rows(&self) -> u32 {
        span(self.y1, self.y2)
    }

    /// Total number of tiles in the range.
    pub fn len(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// True when either corner lies past the other.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the tiles, column by column and north to south within a column.
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> + '_ {
        (self.x1..=self.x2)
            .flat_map(move |x| (self.y1..=self.y2).map(move |y| TileCoord::new(self.zoom, x, y)))
    }
}

fn span(first: u32, last: u32) -> u32 {
    if last < first {
        0
    } else {
        (last - first).saturating_add(1)
    }
}

/// A resolved request area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Geographic bounds of the area.
    pub bounds: BoundingBox,
    /// North-west corner on the fixed-point grid.
    pub top_left: GridPoint,
    /// South-east corner on the fixed-point grid.
    pub bottom_right: GridPoint,
}

impl Extent {
    /// Resolve an area given by two opposite corners.
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        let bounds = BoundingBox::from_corners(a, b);
        Self {
            bounds,
            top_left: GridPoint::from_geo(bounds.top_left()),
            bottom_right: GridPoint::from_geo(bounds.bottom_right()),
        }
    }

    /// Resolve an area of `width` x `height` pixels at `zoom` around `center`.
    ///
    /// The center is expanded by half the pixel size in each direction on the
    /// fixed-point grid, so the resulting raster is exactly the requested size
    /// (rounded down to an even number of pixels).
    pub fn centered(center: GeoPoint, width: i64, height: i64, zoom: u8) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(GeoError::InvalidDimensions { width, height });
        }
        let pixel_shift = MAX_ZOOM
            .checked_sub(zoom)
            .ok_or(GeoError::ZoomTooDeep {
                zoom: zoom as i32,
                max: MAX_ZOOM,
            })? as u32;

        let grid = GridPoint::from_geo(center);
        let half_w = ((width as i128) << pixel_shift) / 2;
        let half_h = ((height as i128) << pixel_shift) / 2;

        let clamp = |v: i128| v.clamp(0, u32::MAX as i128) as u32;
        let top_left = GridPoint {
            x: clamp(grid.x as i128 - half_w),
            y: clamp(grid.y as i128 - half_h),
        };
        let bottom_right = GridPoint {
            x: clamp(grid.x as i128 + half_w),
            y: clamp(grid.y as i128 + half_h),
        };

        let bounds = BoundingBox::from_corners(top_left.to_geo(), bottom_right.to_geo());
        Ok(Self {
            bounds,
            top_left,
            bottom_right,
        })
    }

    /// Tiles covering the extent at `zoom`.
    ///
    /// The north edge (maximum latitude) maps to the smaller tile row.
    pub fn tile_range(&self, zoom: u8) -> TileRange {
        let (x1, y1) = self.top_left.tile(zoom);
        let (x2, y2) = self.bottom_right.tile(zoom);
        TileRange {
            zoom,
            x1,
            y1,
            x2,
            y2,
        }
    }
}

//! # tilestitch-geo
//!
//! Geometry for stitching slippy-map tiles into one georeferenced raster.
//!
//! ## Overview
//!
//! Tiles follow the OpenStreetMap Slippy Map convention under Web Mercator
//! (EPSG:3857):
//! - `z` is the zoom level (0-24 here)
//! - `x` is the column (0 to 2^z - 1, from west to east)
//! - `y` is the row (0 to 2^z - 1, from north to south)
//!
//! Points are first placed on a fixed-point grid at zoom 32 and then shifted
//! down to the requested zoom. The low 8 bits below the tile index give the
//! pixel inside a 256-pixel tile, which is how the requested area is aligned
//! to sub-tile precision on the output canvas.
//!
//! ## Example
//!
//! ```
//! use tilestitch_geo::{Extent, GeoPoint, Georeference, RasterLayout};
//!
//! let extent = Extent::from_corners(GeoPoint::new(47.5, -122.5), GeoPoint::new(47.7, -122.2));
//! let layout = RasterLayout::new(&extent, 12, 256)?;
//! let georef = Georeference::new(&extent.bounds.projected(), layout.width, layout.height);
//!
//! println!("{} tiles, {}x{} pixels", layout.tiles.len(), layout.width, layout.height);
//! println!("pixel size {} m", georef.pixel_size_x);
//! # Ok::<(), tilestitch_geo::GeoError>(())
//! ```

mod bbox;
mod error;
mod georef;
mod layout;
mod projection;

pub use bbox::{BoundingBox, Extent, TileCoord, TileRange};
pub use error::GeoError;
pub use georef::{Georeference, ProjectedBounds};
pub use layout::{Placement, RasterLayout, DEFAULT_TILE_SIZE, MAX_RASTER_PIXELS};
pub use projection::{
    check_zoom, lat_lon_to_meters, lat_lon_to_tile_grid, tile_grid_to_lat_lon, GeoPoint,
    GridPoint, MAX_ZOOM, ORIGIN_SHIFT, PRECISION_ZOOM,
};

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeoError>;

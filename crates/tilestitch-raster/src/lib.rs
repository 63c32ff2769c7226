//! # tilestitch-raster
//!
//! The in-memory side of tile stitching: an RGBA [`Canvas`] that decoded
//! tiles are composited onto, and an optional pass that turns packed
//! elevation tiles into a normalized grayscale height map.
//!
//! ## Example
//!
//! ```
//! use tilestitch_geo::Placement;
//! use tilestitch_raster::{normalize_elevation, Canvas, TileImage};
//!
//! let mut canvas = Canvas::new(4, 2);
//! let red = TileImage::filled(2, 2, &[255, 0, 0])?;
//! let placement = Placement { column: 0, row: 0, tile_size: 2, offset_x: 0, offset_y: 0 };
//! canvas.place_tile(&red, &placement)?;
//! assert_eq!(canvas.pixel(0, 0), [255, 0, 0, 255]);
//!
//! let stats = normalize_elevation(&mut canvas);
//! println!("elevation range {} to {}", stats.min_meters(), stats.max_meters());
//! # Ok::<(), tilestitch_raster::RasterError>(())
//! ```

mod canvas;
mod composite;
mod elevation;
mod error;
mod tile_image;

pub use canvas::{Canvas, ALPHA, CANVAS_CHANNELS};
pub use elevation::{
    normalize_elevation, packed_elevation, terrarium_meters, ElevationStats,
    MAX_PACKED_ELEVATION,
};
pub use error::RasterError;
pub use tile_image::{ChannelDepth, TileImage};

/// Result type for raster operations.
pub type Result<T> = std::result::Result<T, RasterError>;

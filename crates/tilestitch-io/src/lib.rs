//! # tilestitch-io
//!
//! Everything that touches the outside world while stitching a mosaic:
//!
//! - Resolving preset names and expanding `{z}/{x}/{y}/{s}` URL templates
//! - Fetching tile bytes over HTTP (behind the [`TileFetcher`] trait)
//! - Decoding PNG and JPEG tiles, chosen by magic bytes
//! - Writing PNG, GeoTIFF and world files
//!
//! ## Example
//!
//! ```no_run
//! use tilestitch_geo::TileCoord;
//! use tilestitch_io::{decode_tile, HttpFetcher, TileFetcher, UrlTemplate};
//!
//! let fetcher = HttpFetcher::new()?;
//! let template = UrlTemplate::new("osm");
//! let url = template.expand(TileCoord::new(12, 655, 1583))?;
//! let tile = decode_tile(&fetcher.fetch(&url)?, &url)?;
//! println!("{}x{} tile", tile.width(), tile.height());
//! # Ok::<(), tilestitch_io::StitchIoError>(())
//! ```

mod decode;
mod error;
mod fetch;
mod geotiff;
mod output;
mod preset;
mod template;

pub use decode::{decode_tile, TileFormat};
pub use error::StitchIoError;
pub use fetch::{HttpFetcher, TileFetcher, USER_AGENT};
pub use geotiff::write_geotiff;
pub use output::{
    format_world_file, world_file_path, write_png, write_raster, write_world_file, OutputFormat,
};
pub use preset::{find_preset, resolve_source, Preset, PRESETS};
pub use template::UrlTemplate;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, StitchIoError>;

//! Raster layout: canvas size, tile range and sub-tile alignment.

use crate::bbox::{Extent, TileCoord, TileRange};
use crate::projection::check_zoom;
use crate::{GeoError, Result};
use tracing::debug;

/// Largest raster the stitcher will allocate, in pixels.
pub const MAX_RASTER_PIXELS: u64 = 10_000 * 10_000;

/// Default edge length of a slippy tile in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Pixels per tile in the fixed-point pixel grid.
const GRID_TILE_PIXELS: u128 = 256;

/// Where the tiles of an extent land on the output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterLayout {
    /// Zoom level of the tiles.
    pub zoom: u8,
    /// Edge length of each tile in pixels.
    pub tile_size: u32,
    /// Tiles covering the extent.
    pub tiles: TileRange,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Pixels of the first tile column left of the canvas edge.
    pub offset_x: u32,
    /// Pixels of the first tile row above the canvas edge.
    pub offset_y: u32,
}

/// Position of one tile relative to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Column index of the tile within the tile range.
    pub column: u32,
    /// Row index of the tile within the tile range.
    pub row: u32,
    /// Edge length of the tile in pixels.
    pub tile_size: u32,
    /// Horizontal sub-tile offset of the range.
    pub offset_x: u32,
    /// Vertical sub-tile offset of the range.
    pub offset_y: u32,
}

impl Placement {
    /// Canvas coordinate of the tile's top-left pixel. May be negative.
    pub fn origin(&self) -> (i64, i64) {
        (
            self.column as i64 * self.tile_size as i64 - self.offset_x as i64,
            self.row as i64 * self.tile_size as i64 - self.offset_y as i64,
        )
    }
}

impl RasterLayout {
    /// Lay out `extent` at `zoom` using tiles of `tile_size` pixels.
    ///
    /// Pixel positions are taken from the 256-pixel grid and scaled to the
    /// tile size, so servers with 512-pixel tiles produce a raster twice as
    /// large for the same zoom.
    pub fn new(extent: &Extent, zoom: u8, tile_size: u32) -> Result<Self> {
        check_zoom(zoom as i32)?;
        if tile_size == 0 {
            return Err(GeoError::InvalidTileSize);
        }

        let tiles = extent.tile_range(zoom);
        let (px1, py1) = extent.top_left.pixel(zoom);
        let (px2, py2) = extent.bottom_right.pixel(zoom);

        // Both factors fit in 32 bits, so the quotient fits in 56
        let scale = |pixels: u32| (pixels as u128 * tile_size as u128 / GRID_TILE_PIXELS) as u64;
        let grid_offset = |pixels: u32| pixels % GRID_TILE_PIXELS as u32;
        let offset_x = scale(grid_offset(px1));
        let offset_y = scale(grid_offset(py1));
        let width = scale(px2.saturating_sub(px1));
        let height = scale(py2.saturating_sub(py1));

        if width == 0 || height == 0 {
            return Err(GeoError::EmptyRaster { width, height });
        }
        if width
            .checked_mul(height)
            .map_or(true, |pixels| pixels > MAX_RASTER_PIXELS)
        {
            return Err(GeoError::RasterTooLarge {
                width,
                height,
                limit: MAX_RASTER_PIXELS,
            });
        }

        debug!(
            "Layout at zoom {}: {} tiles, {}x{} pixels, offset ({}, {})",
            zoom,
            tiles.len(),
            width,
            height,
            offset_x,
            offset_y
        );

        Ok(Self {
            zoom,
            tile_size,
            tiles,
            width: width as u32,
            height: height as u32,
            offset_x: offset_x as u32,
            offset_y: offset_y as u32,
        })
    }

    /// Placement of `tile` on the canvas. `tile` must lie within the range.
    pub fn placement(&self, tile: TileCoord) -> Placement {
        Placement {
            column: tile.x - self.tiles.x1,
            row: tile.y - self.tiles.y1,
            tile_size: self.tile_size,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
        }
    }
}

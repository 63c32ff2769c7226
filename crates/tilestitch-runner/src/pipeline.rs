//! The stitching pipeline.
//!
//! Resolve the area, lay out the canvas, then fetch, decode and composite
//! every tile of every source. Tiles are visited column by column, top to
//! bottom within a column, and each tile's sources in the order given. Any
//! failure aborts the run before anything is written.

use crate::config::StitchConfig;
use crate::{Result, RunnerError};
use tilestitch_geo::{Extent, Georeference, RasterLayout};
use tilestitch_io::{
    decode_tile, write_raster, write_world_file, OutputFormat, StitchIoError, TileFetcher,
    UrlTemplate,
};
use tilestitch_raster::{normalize_elevation, Canvas, ElevationStats};
use tracing::{debug, info, warn};

/// A finished, georeferenced raster.
#[derive(Debug, Clone)]
pub struct StitchOutput {
    /// Resolved request area.
    pub extent: Extent,
    /// Tile range and canvas geometry.
    pub layout: RasterLayout,
    /// Composited pixels.
    pub canvas: Canvas,
    /// Pixel scale and tie point.
    pub georef: Georeference,
    /// Statistics gathered before elevation normalization, when enabled.
    pub elevation: Option<ElevationStats>,
}

/// Runs the pipeline against a tile fetcher.
pub struct Stitcher<F> {
    fetcher: F,
}

impl<F: TileFetcher> Stitcher<F> {
    /// Create a stitcher that pulls tiles from `fetcher`.
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Borrow the underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Build the raster described by `config`.
    pub fn run(&self, config: &StitchConfig) -> Result<StitchOutput> {
        let zoom = config.validate()?;
        let extent = config.area.resolve(zoom)?;
        let bounds = &extent.bounds;
        let projected = bounds.projected();

        info!(
            "Geodetic bounds (EPSG:4326): {},{} to {},{}",
            bounds.min_lat, bounds.min_lon, bounds.max_lat, bounds.max_lon
        );
        info!(
            "Projected bounds (EPSG:3857): {},{} to {},{}",
            projected.min_y, projected.min_x, projected.max_y, projected.max_x
        );
        info!("Zoom level: {}", zoom);

        let layout = RasterLayout::new(&extent, zoom, config.tile_size)?;
        let tiles = &layout.tiles;
        info!("Upper left tile: x:{} y:{}", tiles.x1, tiles.y1);
        info!("Lower right tile: x:{} y:{}", tiles.x2, tiles.y2);
        info!("Raster size: {}x{}", layout.width, layout.height);

        let georef = Georeference::new(&projected, layout.width, layout.height);
        info!(
            "Pixel size: x:{} y:{}",
            georef.pixel_size_x, georef.pixel_size_y
        );

        let templates: Vec<UrlTemplate> = config.sources.iter().map(|s| UrlTemplate::new(s)).collect();
        let mut canvas = Canvas::new(layout.width, layout.height);

        for tile in tiles.iter() {
            let placement = layout.placement(tile);
            for template in &templates {
                let url = template.expand(tile)?;
                debug!("{}", url);
                let bytes = self.fetcher.fetch(&url)?;
                let image = decode_tile(&bytes, &url)?;
                canvas.place_tile(&image, &placement)?;
            }
        }

        let elevation = config.elevation.then(|| {
            let stats = normalize_elevation(&mut canvas);
            log_elevation(&stats);
            stats
        });

        Ok(StitchOutput {
            extent,
            layout,
            canvas,
            georef,
            elevation,
        })
    }
}

fn log_elevation(stats: &ElevationStats) {
    info!(
        "Elevation range: [{:.4}; {:.4}] --> {:.4}",
        stats.min_meters(),
        stats.max_meters(),
        stats.span_meters()
    );
    info!("Average elevation: {:.4}", stats.average_meters());
    info!("Midpoint in [0; 1] range: {:.4}", stats.midpoint());
}

/// Fail early when the output has nowhere sensible to go.
///
/// PNG may stream to stdout, but not to an interactive terminal. GeoTIFF
/// always needs a file.
pub fn check_destination(config: &StitchConfig, stdout_is_terminal: bool) -> Result<()> {
    if config.output.is_some() {
        return Ok(());
    }
    match config.format {
        OutputFormat::GeoTiff => Err(StitchIoError::GeoTiffToStdout.into()),
        OutputFormat::Png if stdout_is_terminal => Err(RunnerError::TerminalOutput),
        OutputFormat::Png => Ok(()),
    }
}

/// Write the raster and, when requested, its world file.
pub fn write_outputs(output: &StitchOutput, config: &StitchConfig) -> Result<()> {
    let path = config.output.as_deref();
    if path.is_none() {
        info!("Output {}: stdout", config.format);
    }
    write_raster(&output.canvas, &output.georef, config.format, path)?;

    if config.world_file {
        match path {
            Some(path) => {
                write_world_file(path, config.format, &output.georef)?;
            }
            None => warn!("Can't write a world file when writing to stdout"),
        }
    }
    Ok(())
}

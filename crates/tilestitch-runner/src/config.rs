//! Run configuration.
//!
//! A [`StitchConfig`] fully describes one run. It is built from the command
//! line or loaded from YAML:
//!
//! ```yaml
//! area:
//!   mode: corners
//!   min_lat: 37.70
//!   min_lon: -122.52
//!   max_lat: 37.82
//!   max_lon: -122.35
//! zoom: 13
//! sources:
//!   - osm
//! output: sf.png
//! world_file: true
//! ```

use crate::{Result, RunnerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tilestitch_geo::{check_zoom, Extent, GeoPoint, DEFAULT_TILE_SIZE};
use tilestitch_io::OutputFormat;

/// The area to stitch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Area {
    /// Two opposite corners, in any order.
    Corners {
        min_lat: f64,
        min_lon: f64,
        max_lat: f64,
        max_lon: f64,
    },
    /// A center point and a raster size in pixels at the requested zoom.
    Centered {
        lat: f64,
        lon: f64,
        width: i64,
        height: i64,
    },
}

impl Area {
    /// Resolve to a normalized extent at `zoom`.
    pub fn resolve(&self, zoom: u8) -> Result<Extent> {
        let extent = match *self {
            Area::Corners {
                min_lat,
                min_lon,
                max_lat,
                max_lon,
            } => Extent::from_corners(GeoPoint::new(min_lat, min_lon), GeoPoint::new(max_lat, max_lon)),
            Area::Centered {
                lat,
                lon,
                width,
                height,
            } => Extent::centered(GeoPoint::new(lat, lon), width, height, zoom)?,
        };
        Ok(extent)
    }
}

fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

/// Everything needed for one stitching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StitchConfig {
    /// Area to cover.
    pub area: Area,
    /// Tile zoom level.
    pub zoom: i32,
    /// Edge length of the server's tiles in pixels.
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    /// Preset names or URL templates, composited in order.
    pub sources: Vec<String>,
    /// Output path. PNG goes to stdout when absent.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Output encoding.
    #[serde(default)]
    pub format: OutputFormat,
    /// Treat tiles as packed elevation and normalize to grayscale.
    #[serde(default)]
    pub elevation: bool,
    /// Also write a world file next to the output.
    #[serde(default)]
    pub world_file: bool,
}

impl StitchConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| RunnerError::ConfigFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Check everything that does not need the resolved geometry.
    ///
    /// Returns the validated zoom level.
    pub fn validate(&self) -> Result<u8> {
        let zoom = check_zoom(self.zoom)?;
        if self.tile_size == 0 {
            return Err(tilestitch_geo::GeoError::InvalidTileSize.into());
        }
        if self.sources.is_empty() {
            return Err(RunnerError::NoSources);
        }
        if let Area::Centered { width, height, .. } = self.area {
            if width <= 0 || height <= 0 {
                return Err(tilestitch_geo::GeoError::InvalidDimensions { width, height }.into());
            }
        }
        Ok(zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilestitch_geo::GeoError;

    fn corners() -> StitchConfig {
        StitchConfig {
            area: Area::Corners {
                min_lat: 0.0,
                min_lon: 0.0,
                max_lat: 0.01,
                max_lon: 0.01,
            },
            zoom: 14,
            tile_size: 256,
            sources: vec!["osm".to_string()],
            output: None,
            format: OutputFormat::Png,
            elevation: false,
            world_file: false,
        }
    }

    #[test]
    fn test_yaml_defaults() {
        let yaml = r#"
area:
  mode: centered
  lat: 47.6
  lon: -122.3
  width: 800
  height: 600
zoom: 12
sources: [osm, "https://example.com/{z}/{x}/{y}.png"]
"#;
        let config = StitchConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.tile_size, 256);
        assert_eq!(config.format, OutputFormat::Png);
        assert_eq!(config.sources.len(), 2);
        assert!(config.output.is_none());
        assert!(!config.elevation);
        assert!(matches!(config.area, Area::Centered { width: 800, height: 600, .. }));
        assert_eq!(config.validate().unwrap(), 12);
    }

    #[test]
    fn test_yaml_geotiff() {
        let yaml = r#"
area: { mode: corners, min_lat: 1.0, min_lon: 2.0, max_lat: 3.0, max_lon: 4.0 }
zoom: 5
tile_size: 512
sources: ["aws:terrarium"]
output: dem.tif
format: geotiff
elevation: true
world_file: true
"#;
        let config = StitchConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.format, OutputFormat::GeoTiff);
        assert_eq!(config.tile_size, 512);
        assert_eq!(config.output, Some(PathBuf::from("dem.tif")));
        assert!(config.elevation && config.world_file);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = corners();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(StitchConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_validate_errors() {
        let mut config = corners();
        config.zoom = -1;
        assert!(matches!(config.validate(), Err(RunnerError::Geo(GeoError::InvalidZoom(-1)))));

        let mut config = corners();
        config.zoom = 25;
        assert!(matches!(config.validate(), Err(RunnerError::Geo(GeoError::ZoomTooDeep { .. }))));

        let mut config = corners();
        config.tile_size = 0;
        assert!(matches!(config.validate(), Err(RunnerError::Geo(GeoError::InvalidTileSize))));

        let mut config = corners();
        config.sources.clear();
        assert!(matches!(config.validate(), Err(RunnerError::NoSources)));

        let mut config = corners();
        config.area = Area::Centered {
            lat: 0.0,
            lon: 0.0,
            width: 0,
            height: 10,
        };
        assert!(matches!(
            config.validate(),
            Err(RunnerError::Geo(GeoError::InvalidDimensions { width: 0, height: 10 }))
        ));
    }

    #[test]
    fn test_corners_normalized() {
        let area = Area::Corners {
            min_lat: 10.0,
            min_lon: 20.0,
            max_lat: -10.0,
            max_lon: -20.0,
        };
        let extent = area.resolve(4).unwrap();
        assert!(extent.bounds.min_lat <= extent.bounds.max_lat);
        assert!(extent.bounds.min_lon <= extent.bounds.max_lon);
    }

    #[test]
    fn test_missing_file() {
        let err = StitchConfig::from_yaml_file(Path::new("/nonexistent/tilestitch.yaml")).unwrap_err();
        assert!(matches!(err, RunnerError::ConfigFile { .. }));
    }
}

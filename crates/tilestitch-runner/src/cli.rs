//! Command-line interface.
//!
//! ```text
//! tilestitch [-o out] [-f png|geotiff] [-t size] [-e] [-w] minlat minlon maxlat maxlon zoom url...
//! tilestitch [-o out] [-f png|geotiff] [-t size] [-e] [-w] -c lat lon width height zoom url...
//! tilestitch --config run.yaml
//! ```

use crate::config::{Area, StitchConfig};
use crate::{Result, RunnerError};
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;
use tilestitch_io::{OutputFormat, PRESETS};

/// Stitch slippy-map tiles into a single georeferenced PNG or GeoTIFF.
#[derive(Parser, Debug)]
#[command(name = "tilestitch", version, after_help = preset_help())]
pub struct Cli {
    /// Output file; PNG is written to stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_name = "png|geotiff", value_parser = parse_format)]
    pub format: Option<OutputFormat>,

    /// Tile size in pixels [default: 256]
    #[arg(short, long, value_name = "PIXELS")]
    pub tile_size: Option<u32>,

    /// Treat tiles as Terrarium elevation and render a normalized height map
    #[arg(short, long)]
    pub elevation: bool,

    /// Write a world file (.pnw / .tfw) next to the output
    #[arg(short, long)]
    pub world_file: bool,

    /// Positional arguments are `lat lon width height` around a center
    #[arg(short, long)]
    pub centered: bool,

    /// Load the run from a YAML file instead of positional arguments
    #[arg(long, value_name = "FILE", conflicts_with_all = ["centered", "args"])]
    pub config: Option<PathBuf>,

    /// List the tile-server presets and exit
    #[arg(long, exclusive = true)]
    pub list_presets: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// `minlat minlon maxlat maxlon zoom url...` (or `lat lon width height zoom url...` with -c)
    #[arg(
        value_name = "ARGS",
        num_args = 6..,
        allow_negative_numbers = true,
        required_unless_present_any = ["config", "list_presets"]
    )]
    pub args: Vec<String>,
}

fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse().map_err(|e: tilestitch_io::StitchIoError| e.to_string())
}

fn preset_help() -> String {
    let mut help = String::from("Presets usable in place of a URL:\n");
    for preset in PRESETS {
        help.push_str(&format!("  {:<20} {}\n", preset.name, preset.description));
    }
    help
}

/// Render the preset table for `--list-presets`.
pub fn preset_listing() -> String {
    PRESETS
        .iter()
        .map(|preset| format!("{:<20} {}\n{:<20} {}\n", preset.name, preset.description, "", preset.template))
        .collect()
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| RunnerError::Config(format!("invalid {name} '{value}'")))
}

impl Cli {
    /// Build the run configuration from the command line.
    ///
    /// With `--config`, the file provides the run and `-o`, `-f` and `-t`
    /// override it. `-e` and `-w` can only switch a feature on.
    pub fn to_config(&self) -> Result<StitchConfig> {
        let mut config = match &self.config {
            Some(path) => StitchConfig::from_yaml_file(path)?,
            None => self.positional_config()?,
        };

        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(tile_size) = self.tile_size {
            config.tile_size = tile_size;
        }
        config.elevation |= self.elevation;
        config.world_file |= self.world_file;
        Ok(config)
    }

    fn positional_config(&self) -> Result<StitchConfig> {
        let [a, b, c, d, zoom, sources @ ..] = self.args.as_slice() else {
            return Err(RunnerError::Config(
                "expected four coordinates, a zoom level and at least one URL".to_string(),
            ));
        };
        if sources.is_empty() {
            return Err(RunnerError::NoSources);
        }

        let area = if self.centered {
            Area::Centered {
                lat: parse_number("latitude", a)?,
                lon: parse_number("longitude", b)?,
                width: parse_number("width", c)?,
                height: parse_number("height", d)?,
            }
        } else {
            Area::Corners {
                min_lat: parse_number("latitude", a)?,
                min_lon: parse_number("longitude", b)?,
                max_lat: parse_number("latitude", c)?,
                max_lon: parse_number("longitude", d)?,
            }
        };

        Ok(StitchConfig {
            area,
            zoom: parse_number("zoom", zoom)?,
            tile_size: tilestitch_geo::DEFAULT_TILE_SIZE,
            sources: sources.to_vec(),
            output: None,
            format: OutputFormat::default(),
            elevation: false,
            world_file: false,
        })
    }

    /// Default tracing filter for the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tilestitch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_corner_args() {
        let cli = parse(&["-o", "sf.png", "-w", "37.82", "-122.35", "37.70", "-122.52", "13", "osm"]);
        let config = cli.to_config().unwrap();

        assert_eq!(config.zoom, 13);
        assert_eq!(config.sources, vec!["osm"]);
        assert_eq!(config.output, Some(PathBuf::from("sf.png")));
        assert!(config.world_file);
        assert_eq!(config.tile_size, 256);
        assert_eq!(
            config.area,
            Area::Corners {
                min_lat: 37.82,
                min_lon: -122.35,
                max_lat: 37.70,
                max_lon: -122.52,
            }
        );
    }

    #[test]
    fn test_centered_args() {
        let cli = parse(&[
            "-c", "-e", "-f", "geotiff", "-t", "512", "-o", "dem.tif", "47.6", "-122.3", "800", "600", "12",
            "aws:terrarium", "osm",
        ]);
        let config = cli.to_config().unwrap();

        assert_eq!(config.format, OutputFormat::GeoTiff);
        assert_eq!(config.tile_size, 512);
        assert!(config.elevation);
        assert_eq!(config.sources, vec!["aws:terrarium", "osm"]);
        assert_eq!(
            config.area,
            Area::Centered {
                lat: 47.6,
                lon: -122.3,
                width: 800,
                height: 600,
            }
        );
    }

    fn write_config(name: &str, yaml: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tilestitch-cli-{}-{}.yaml", std::process::id(), name));
        std::fs::write(&path, yaml).unwrap();
        path
    }

    const CONFIG_YAML: &str = r#"
area: { mode: corners, min_lat: 1.0, min_lon: 2.0, max_lat: 3.0, max_lon: 4.0 }
zoom: 9
tile_size: 256
sources: [osm]
output: base.png
format: png
elevation: true
"#;

    #[test]
    fn test_config_file_overrides() {
        let path = write_config("overrides", CONFIG_YAML);
        let file = path.to_str().unwrap();

        let config = parse(&["--config", file, "-o", "x.tif", "-f", "geotiff", "-t", "512"])
            .to_config()
            .unwrap();
        assert_eq!(config.output, Some(PathBuf::from("x.tif")));
        assert_eq!(config.format, OutputFormat::GeoTiff);
        assert_eq!(config.tile_size, 512);
        assert_eq!(config.zoom, 9);
        assert_eq!(config.sources, vec!["osm"]);
        // Switches absent from the command line keep the file's value
        assert!(config.elevation);
        assert!(!config.world_file);

        let config = parse(&["--config", file]).to_config().unwrap();
        assert_eq!(config.output, Some(PathBuf::from("base.png")));
        assert_eq!(config.format, OutputFormat::Png);
        assert_eq!(config.tile_size, 256);
        assert!(config.elevation);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_config_file_switches_turn_on() {
        let yaml = CONFIG_YAML.replace("elevation: true", "elevation: false");
        let path = write_config("switches", &yaml);
        let file = path.to_str().unwrap();

        let config = parse(&["--config", file]).to_config().unwrap();
        assert!(!config.elevation);
        assert!(!config.world_file);

        let config = parse(&["--config", file, "-e", "-w"]).to_config().unwrap();
        assert!(config.elevation);
        assert!(config.world_file);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_config_file_missing() {
        let cli = parse(&["--config", "/nonexistent/tilestitch.yaml"]);
        assert!(matches!(cli.to_config(), Err(RunnerError::ConfigFile { .. })));
    }

    #[test]
    fn test_config_excludes_positional_area() {
        let with_args = Cli::try_parse_from(["tilestitch", "--config", "f.yaml", "0", "0", "1", "1", "3", "osm"]);
        assert!(with_args.is_err());

        let with_centered = Cli::try_parse_from(["tilestitch", "--config", "f.yaml", "-c"]);
        assert!(with_centered.is_err());
    }

    #[test]
    fn test_too_few_args() {
        let result = Cli::try_parse_from(["tilestitch", "1", "2", "3", "4", "5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_number() {
        let cli = parse(&["north", "0", "1", "1", "3", "osm"]);
        assert!(matches!(cli.to_config(), Err(RunnerError::Config(msg)) if msg.contains("north")));
    }

    #[test]
    fn test_bad_format() {
        let result = Cli::try_parse_from(["tilestitch", "-f", "jpeg", "0", "0", "1", "1", "3", "osm"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_presets_alone() {
        let cli = parse(&["--list-presets"]);
        assert!(cli.list_presets);
        assert!(cli.args.is_empty());
        assert!(preset_listing().contains("stamen:watercolor"));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(parse(&["--list-presets"]).log_level(), "info");
        assert_eq!(parse(&["-vv", "0", "0", "1", "1", "3", "osm"]).log_level(), "trace");
        assert_eq!(parse(&["-q", "0", "0", "1", "1", "3", "osm"]).log_level(), "warn");
    }
}

//! Error types for the runner.

use thiserror::Error;

/// Errors that can abort a stitching run.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Invalid bounds, zoom, dimensions or raster size.
    #[error(transparent)]
    Geo(#[from] tilestitch_geo::GeoError),

    /// A tile could not be composited.
    #[error(transparent)]
    Raster(#[from] tilestitch_raster::RasterError),

    /// Fetch, decode or write failure.
    #[error(transparent)]
    Io(#[from] tilestitch_io::StitchIoError),

    /// Configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    ConfigFile {
        /// Path of the config file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid command line or configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No tile source was given.
    #[error("No tile source given")]
    NoSources,

    /// PNG would be written to an interactive terminal.
    #[error("Didn't specify -o and standard output is a terminal")]
    TerminalOutput,
}

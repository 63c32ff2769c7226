//! # tilestitch-runner
//!
//! Drives a stitching run: builds a [`StitchConfig`] from the command line
//! or a YAML file, runs the fetch/decode/composite [`Stitcher`] pipeline and
//! hands the finished raster to the writers.
//!
//! ## Example
//!
//! ```no_run
//! use tilestitch_io::HttpFetcher;
//! use tilestitch_runner::{write_outputs, StitchConfig, Stitcher};
//!
//! let config = StitchConfig::from_yaml_file("run.yaml".as_ref())?;
//! let stitcher = Stitcher::new(HttpFetcher::new()?);
//! let output = stitcher.run(&config)?;
//! write_outputs(&output, &config)?;
//! # Ok::<(), tilestitch_runner::RunnerError>(())
//! ```

mod cli;
mod config;
mod error;
mod pipeline;

pub use cli::{preset_listing, Cli};
pub use config::{Area, StitchConfig};
pub use error::RunnerError;
pub use pipeline::{check_destination, write_outputs, StitchOutput, Stitcher};

/// Result type for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;

//! `tilestitch` command-line entry point.

use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use tilestitch_io::HttpFetcher;
use tilestitch_runner::{check_destination, preset_listing, write_outputs, Cli, Stitcher};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    if cli.list_presets {
        print!("{}", preset_listing());
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> tilestitch_runner::Result<()> {
    let config = cli.to_config()?;
    check_destination(&config, std::io::stdout().is_terminal())?;

    let stitcher = Stitcher::new(HttpFetcher::new()?);
    let output = stitcher.run(&config)?;
    write_outputs(&output, &config)
}

/// Log to stderr so PNG output can go to stdout. `RUST_LOG` takes
/// precedence over the verbosity flags.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

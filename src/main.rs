//! Convert a directory of SVG icons into an SVG font and back.

use anyhow::Result;
use glyphsmith::core::{self, ConfigFile};
use glyphsmith::logging;
use tracing::warn;

/// Set up logging and run the command given on the command line.
fn run_app(cli_args: core::cli::CliArgs) -> Result<()> {
    // The settings pick the log level, so problems are reported once logging is up
    let (config, config_error) = match ConfigFile::read_from(&ConfigFile::config_path()) {
        Ok(config) => (config, None),
        Err(e) => (None, Some(e)),
    };
    let level = cli_args
        .log_level
        .clone()
        .or_else(|| config.as_ref().and_then(|config| config.log_level.clone()));
    let _guard = logging::init(level.as_deref(), cli_args.log_file)?;
    if let Some(e) = config_error {
        warn!("Ignoring settings file: {e:#}");
    }
    core::run_app(cli_args, config)
}

fn main() {
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = run_app(cli_args) {
        core::platform::handle_error(error);
    }
}

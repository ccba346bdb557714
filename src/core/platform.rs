//! Process-level error handling and argument parsing.

/// Report a failed run and exit with code 1.
///
/// Prints the error followed by its chain of causes, so a broken icon is
/// reported together with the file it came from.
pub fn handle_error(error: anyhow::Error) -> ! {
    eprintln!();
    eprintln!("Error: {error}");
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}

/// Parse and validate the command line arguments.
///
/// Invalid paths are reported through [`handle_error`] before any work starts.
pub fn get_cli_args() -> crate::core::cli::CliArgs {
    use clap::Parser;
    let cli_args = crate::core::cli::CliArgs::parse();
    if let Err(message) = cli_args.validate() {
        handle_error(anyhow::anyhow!(message));
    }
    cli_args
}

//! Core application functionality
//!
//! This module contains the command line side of the tool:
//! - CLI parsing and validation
//! - Settings file handling
//! - Error types shared with the library
//! - Command dispatch

pub mod cli;
pub mod config_file;
pub mod errors;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use errors::{Error, Result};
pub use runner::run_app;

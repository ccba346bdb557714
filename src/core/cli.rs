//! Command line interface for glyphsmith
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs. Many CLI options are documented with
//! examples to help users understand the expected format.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::font_source::MetricOverrides;

/// glyphsmith CLI arguments
///
/// Examples:
///   glyphsmith create-font icons/ font.svg            # Build a font from a directory
///   glyphsmith create-font icons/ font.svg --rename-files
///   glyphsmith create-files font.svg icons/           # Write one SVG per glyph
///   glyphsmith create-css font.svg icons.css          # Icon class stylesheet
///   glyphsmith create-info font.svg index.html        # HTML preview page
///   glyphsmith --new-config                           # Write ~/.config/glyphsmith/settings.json
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "glyphsmith",
    version,
    about = "Convert SVG icons to an SVG font and back",
    long_about = "glyphsmith builds an SVG font from a directory of SVG icons, assigning code points from file names or the Private Use Area, and turns SVG fonts back into icon files, stylesheets and HTML previews."
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    /// Log filter, e.g. "debug" or "glyphsmith=trace"
    ///
    /// RUST_LOG takes precedence when set.
    #[clap(
        long = "log-level",
        global = true,
        help = "Log filter (overridden by RUST_LOG)"
    )]
    pub log_level: Option<String>,

    /// Write logs to ~/.config/glyphsmith/logs instead of stderr
    #[clap(
        long = "log-file",
        global = true,
        help = "Write logs to the glyphsmith logs directory"
    )]
    pub log_file: bool,

    /// Initialize user configuration directory with settings
    ///
    /// This creates the ~/.config/glyphsmith directory with:
    /// - settings.json: default font metrics and log level
    /// - logs/: destination of --log-file
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with settings",
        long_help = "Initialize the ~/.config/glyphsmith directory with a settings.json file holding default font metrics, and a logs directory used by --log-file."
    )]
    pub new_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create an SVG font from a directory of SVG icons
    ///
    /// Icons named `<name>-x<hex>.svg` keep their code point; all others get
    /// the next free code point starting at U+E000.
    CreateFont {
        /// Directory containing the SVG icons
        directory: PathBuf,
        /// SVG font file to write
        output_file: PathBuf,
        /// Rename icons without a code point to `<name>-x<hex>.svg`
        #[clap(long = "rename-files")]
        rename_files: bool,
        #[clap(flatten)]
        metrics: MetricArgs,
    },

    /// Create one SVG file per glyph of an SVG font
    CreateFiles {
        /// SVG font to read
        font_file: PathBuf,
        /// Directory to write the icon files into
        output_directory: PathBuf,
    },

    /// Create a stylesheet with one `icon-<name>` class per glyph
    CreateCss {
        /// SVG font to read
        font_file: PathBuf,
        /// CSS file to write
        output_file: PathBuf,
    },

    /// Create an HTML page previewing every glyph
    CreateInfo {
        /// SVG font to read
        font_file: PathBuf,
        /// HTML file to write
        output_file: PathBuf,
        /// Only write an HTML list of the glyphs
        #[clap(short = 'l', long = "as-list")]
        as_list: bool,
    },
}

/// Font metric flags of `create-font`
#[derive(Args, Debug, Clone, Default)]
pub struct MetricArgs {
    /// Font id, also used as the CSS font family
    #[clap(long = "font-id")]
    pub font_id: Option<String>,
    #[clap(long = "units-per-em", allow_negative_numbers = true)]
    pub units_per_em: Option<f64>,
    #[clap(long = "ascent", allow_negative_numbers = true)]
    pub ascent: Option<f64>,
    /// Distance of the baseline above the bottom of the em box, usually negative
    #[clap(long = "descent", allow_negative_numbers = true)]
    pub descent: Option<f64>,
    #[clap(long = "x-height", allow_negative_numbers = true)]
    pub x_height: Option<f64>,
    #[clap(long = "cap-height", allow_negative_numbers = true)]
    pub cap_height: Option<f64>,
    /// Default advance width
    #[clap(long = "horiz-adv-x", allow_negative_numbers = true)]
    pub horiz_adv_x: Option<f64>,
}

impl MetricArgs {
    pub fn to_overrides(&self) -> MetricOverrides {
        MetricOverrides {
            id: self.font_id.clone(),
            units_per_em: self.units_per_em,
            horiz_adv_x: self.horiz_adv_x,
            ascent: self.ascent,
            descent: self.descent,
            x_height: self.x_height,
            cap_height: self.cap_height,
        }
    }
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that all paths exist and are valid before any work starts,
    /// providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            None if self.new_config => Ok(()),
            None => Err("No command given.\nRun with --help to list the commands.".to_string()),
            Some(Command::CreateFont {
                directory, metrics, ..
            }) => {
                require_directory(directory, "Icon directory")?;
                if let Some(units_per_em) = metrics.units_per_em {
                    if units_per_em <= 0.0 {
                        return Err(format!(
                            "Invalid --units-per-em: {units_per_em}\nUnits per em must be positive."
                        ));
                    }
                }
                Ok(())
            }
            Some(Command::CreateFiles {
                font_file,
                output_directory,
            }) => {
                require_file(font_file)?;
                require_directory(output_directory, "Output directory")
            }
            Some(Command::CreateCss { font_file, .. })
            | Some(Command::CreateInfo { font_file, .. }) => require_file(font_file),
        }
    }
}

fn require_file(path: &Path) -> Result<(), String> {
    if !path.is_file() {
        return Err(format!(
            "Font file does not exist: {}\nMake sure the path is correct and the file exists.",
            path.display()
        ));
    }
    Ok(())
}

fn require_directory(path: &Path, what: &str) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!(
            "{what} is not a directory: {}\nMake sure the path is correct and the directory exists.",
            path.display()
        ));
    }
    Ok(())
}

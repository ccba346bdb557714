//! Application runner logic
//!
//! Dispatches each subcommand to the icon font engine and prints progress
//! the way the command line user expects it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::cli::{CliArgs, Command};
use crate::core::config_file::ConfigFile;
use crate::font_source::{GlyphStore, MetricOverrides};
use crate::icon_font::{info, GenerateOptions, IconFontEngine};

/// Run the command given on the command line.
/// Handles special CLI flags and delegates to the matching command.
pub fn run_app(cli_args: CliArgs, config: Option<ConfigFile>) -> Result<()> {
    if cli_args.new_config {
        ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory")?;
    }

    let Some(command) = cli_args.command else {
        return Ok(());
    };
    let settings = config.map(|config| config.font).unwrap_or_default();

    match command {
        Command::CreateFont {
            directory,
            output_file,
            rename_files,
            metrics,
        } => {
            let options = GenerateOptions {
                metrics: settings.merged_with(&metrics.to_overrides()),
                rename_files,
            };
            create_font(&directory, &output_file, &options)
        }
        Command::CreateFiles {
            font_file,
            output_directory,
        } => {
            let engine = load_font(&font_file)?;
            println!("writing files to {} ...", output_directory.display());
            let written = engine.save_glyphs_to_dir(&output_directory)?;
            println!("created {} files successfully", written.len());
            Ok(())
        }
        Command::CreateCss {
            font_file,
            output_file,
        } => {
            let engine = load_font(&font_file)?;
            println!("writing CSS to {} ...", output_file.display());
            write_output(&output_file, &engine.css())?;
            println!("created {} successfully", output_file.display());
            Ok(())
        }
        Command::CreateInfo {
            font_file,
            output_file,
            as_list,
        } => {
            let engine = load_font(&font_file)?;
            let names = engine.glyph_names();
            let html = if as_list {
                info::list(&names)
            } else {
                let font_name = font_file
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                info::page(engine.font().metrics(), &names, &font_name)
            };
            println!("writing HTML to {} ...", output_file.display());
            write_output(&output_file, &html)?;
            println!("created {} successfully", output_file.display());
            Ok(())
        }
    }
}

fn create_font(directory: &Path, output_file: &Path, options: &GenerateOptions) -> Result<()> {
    println!("reading files from {} ...", directory.display());
    let engine = IconFontEngine::from_directory(directory, options)
        .with_context(|| format!("Failed to create a font from {}", directory.display()))?;
    for (codepoint, source) in engine.mapping().iter() {
        debug!("U+{:04X} {}", codepoint as u32, source.file_name());
    }

    println!("writing font to {} ...", output_file.display());
    let xml = engine.font().to_xml()?;
    write_output(output_file, &xml)?;
    println!("created {} successfully", output_file.display());
    Ok(())
}

fn load_font(font_file: &Path) -> Result<IconFontEngine> {
    println!("reading font from {} ...", font_file.display());
    let svg = fs::read_to_string(font_file)
        .with_context(|| format!("Failed to read {}", font_file.display()))?;
    let font = GlyphStore::parse(&svg, &MetricOverrides::default())
        .with_context(|| format!("Failed to load font {}", font_file.display()))?;
    Ok(IconFontEngine::from_font(font))
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

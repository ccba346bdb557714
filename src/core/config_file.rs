//! User configuration file handling
//!
//! Manages settings from ~/.config/glyphsmith/settings.json

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::font_source::MetricOverrides;

/// User configuration from ~/.config/glyphsmith/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    /// Font metrics used when building a font, any subset may be given
    pub font: MetricOverrides,
    /// Log filter used when neither RUST_LOG nor --log-level is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl ConfigFile {
    /// Get the path to the glyphsmith config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("glyphsmith")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Get the path to the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Read configuration from `path`, `Ok(None)` when the file is missing
    pub fn read_from(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!("Loaded user settings from {:?}", path);
        Ok(Some(config))
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Settings written by `--new-config`: every metric spelled out
    pub fn example() -> Self {
        let defaults = crate::font_source::FontMetrics::default();
        Self {
            font: MetricOverrides {
                id: Some(defaults.id),
                units_per_em: Some(defaults.units_per_em),
                horiz_adv_x: Some(defaults.horiz_adv_x),
                ascent: Some(defaults.ascent),
                descent: Some(defaults.descent),
                x_height: Some(defaults.x_height),
                cap_height: Some(defaults.cap_height),
            },
            log_level: Some("warn".to_string()),
        }
    }

    /// Initialize the complete user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/glyphsmith directory with its logs/ directory
    /// 2. A settings.json file with default values, unless one exists
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        let config_dir = Self::config_dir();
        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = Self::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = Self::config_path();
        if !settings_path.exists() {
            Self::example().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("  - Edit font defaults at: {:?}", settings_path);
        println!("  - Log files are written to: {:?}", logs_dir);

        Ok(())
    }
}

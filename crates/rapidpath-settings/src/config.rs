//! Configuration Management Module
//!
//! Provides the application configuration with file I/O:
//! - Optimizer settings (tour kind, refinement, size limit)
//! - Reader settings (modal rapids, height axis)
//!
//! Configuration is stored as TOML or JSON, chosen by file extension.
//! The default location is `<config dir>/rapidpath/config.toml`.

use std::path::{Path, PathBuf};

use rapidpath_optimizer::OptimizerSettings;
use rapidpath_reader::ReaderSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// Directory under the platform config directory
pub const CONFIG_DIR_NAME: &str = "rapidpath";

/// File name of the default configuration
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// On-disk configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    ///
    /// # Errors
    /// Returns [`SettingsError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) => Err(SettingsError::UnsupportedFormat(ext.to_string())),
            None => Err(SettingsError::UnsupportedFormat(format!(
                "{} has no extension (expected .toml or .json)",
                path.display()
            ))),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Travel path optimizer settings
    pub optimizer: OptimizerSettings,
    /// Program reader settings
    pub reader: ReaderSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push(CONFIG_DIR_NAME);
        path.push(CONFIG_FILE_NAME);
        Some(path)
    }

    /// Load the default config file, or defaults when it does not exist
    pub fn load_or_default() -> SettingsResult<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from_file(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.optimizer.max_points == 0 {
            return Err(SettingsError::invalid(
                "optimizer.max_points",
                "must be at least 1",
            ));
        }

        if self.optimizer.refine && self.optimizer.max_refine_passes == 0 {
            return Err(SettingsError::invalid(
                "optimizer.max_refine_passes",
                "must be at least 1 when refinement is enabled",
            ));
        }

        let axis = self.reader.height_axis.to_ascii_uppercase();
        if !axis.is_ascii_alphabetic() {
            return Err(SettingsError::invalid(
                "reader.height_axis",
                format!("'{}' is not an address letter", self.reader.height_axis),
            ));
        }

        if matches!(axis, 'X' | 'Y' | 'G') {
            return Err(SettingsError::invalid(
                "reader.height_axis",
                format!("'{}' is reserved for motion words", axis),
            ));
        }

        Ok(())
    }
}

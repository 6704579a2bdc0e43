//! RapidPath Settings Crate
//!
//! Loads, validates and saves the optimizer and reader configuration.

pub mod config;
pub mod error;

pub use config::{Config, ConfigFormat, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use error::{SettingsError, SettingsResult};
pub use rapidpath_optimizer::{OptimizerSettings, TourKind};
pub use rapidpath_reader::ReaderSettings;

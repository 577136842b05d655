//! Cover configuration, read from `config/sluice_config.json5`.

use std::{fs, io, path::Path, sync::LazyLock};

use serde::Deserialize;
use thiserror::Error;

use crate::cover::FluidFilterMode;
use crate::filter::MAX_SIMPLE_FILTER_SIZE;

/// The configuration file shipped with the server.
pub const DEFAULT_CONFIG: &str = include_str!("../../package-content/sluice_config.json5");

/// Where [`SLUICE_CONFIG`] is loaded from.
pub const CONFIG_PATH: &str = "config/sluice_config.json5";

/// The global configuration. Falls back to defaults if the file cannot be used.
pub static SLUICE_CONFIG: LazyLock<SluiceConfig> = LazyLock::new(|| {
    SluiceConfig::load_or_default(Path::new(CONFIG_PATH)).unwrap_or_else(|err| {
        log::error!("Failed to load {CONFIG_PATH}, using defaults: {err}");
        SluiceConfig::default()
    })
});

/// Errors raised while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("could not read config: {0}")]
    Io(#[from] io::Error),
    /// The file is not valid JSON5 or does not fit the schema.
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json5::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Settings for fluid filter covers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SluiceConfig {
    /// Mode a newly attached cover starts in.
    pub default_filter_mode: FluidFilterMode,
    /// Number of slots in a simple fluid filter.
    pub simple_filter_size: usize,
    /// Whether rejected transfers are logged.
    pub log_filter_decisions: bool,
}

impl Default for SluiceConfig {
    fn default() -> Self {
        Self {
            default_filter_mode: FluidFilterMode::FilterFill,
            simple_filter_size: 9,
            log_filter_decisions: false,
        }
    }
}

impl SluiceConfig {
    /// Parses and validates a JSON5 document.
    pub fn from_json5(source: &str) -> Result<Self, ConfigError> {
        let config: SluiceConfig = serde_json5::from_str(source)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Loads the file at `path`, or returns the defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let source = fs::read_to_string(path)?;
        Self::from_json5(&source)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(1..=MAX_SIMPLE_FILTER_SIZE).contains(&self.simple_filter_size) {
            return Err("Simple filter size must be in range 1..36");
        }
        Ok(())
    }
}

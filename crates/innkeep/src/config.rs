//! Service configuration, loaded from TOML.
//!
//! ```toml
//! storage_dir = "/var/lib/innkeep"
//! storage_key = "hotelAppData"
//! seed_sample_data = true
//! command_buffer = 64
//!
//! [sample]
//! floors = 4
//! rooms_per_floor = 8
//! linens_per_kind = 20
//! ```
//!
//! Every field is optional; missing ones take their default.

use std::fs;
use std::path::{Path, PathBuf};

use innkeep_model::STORAGE_KEY;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config validation failed: {message}")]
    Validation { message: String },
}

/// Settings for the hotel service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelConfig {
    /// Directory holding `<storage_key>.json`.
    pub storage_dir: PathBuf,
    /// Key (file stem) of the persisted document.
    pub storage_key: String,
    /// Generate sample data when no document is stored yet.
    pub seed_sample_data: bool,
    pub sample: SampleConfig,
    /// Capacity of the hotel actor's command channel.
    pub command_buffer: usize,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            storage_key: STORAGE_KEY.to_string(),
            seed_sample_data: true,
            sample: SampleConfig::default(),
            command_buffer: 64,
        }
    }
}

/// Size of the generated sample hotel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    pub floors: u32,
    pub rooms_per_floor: u32,
    pub linens_per_kind: u32,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            floors: 4,
            rooms_per_floor: 8,
            linens_per_kind: 20,
        }
    }
}

/// `<data dir>/innkeep`, or `./innkeep` if the platform has no data dir.
fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("innkeep")
}

impl HotelConfig {
    /// The default config file: `<config dir>/innkeep/config.toml`.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("innkeep")
            .join("config.toml")
    }

    /// Loads the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads `path`, or returns defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Checks:
    /// - the storage key is a valid key
    /// - the command buffer is not zero
    /// - sample sizes are between 1 and 99, so room numbers stay unique
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !innkeep_storage::is_valid_key(&self.storage_key) {
            return Err(ConfigError::Validation {
                message: format!(
                    "storage_key {:?} may only contain letters, digits, '-' and '_'",
                    self.storage_key
                ),
            });
        }
        if self.command_buffer == 0 {
            return Err(ConfigError::Validation {
                message: "command_buffer must be at least 1".to_string(),
            });
        }
        for (name, value) in [
            ("sample.floors", self.sample.floors),
            ("sample.rooms_per_floor", self.sample.rooms_per_floor),
        ] {
            if !(1..=99).contains(&value) {
                return Err(ConfigError::Validation {
                    message: format!("{name} must be between 1 and 99, got {value}"),
                });
            }
        }
        Ok(())
    }
}

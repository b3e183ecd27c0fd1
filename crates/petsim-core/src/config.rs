//! Runtime configuration - decay cadence, storage location, seeding.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! Welfare numbers (bounds, decay steps, thresholds) are not configurable;
//! they live in `petsim_logic::constants`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use petsim_logic::constants::DECAY_INTERVAL_SECS;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Where pets and inventories live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// hecs world in memory, optionally snapshotted with bincode.
    #[default]
    Memory,
    /// `pets.json` and `inventory-<actor>.json` under `data_dir`.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seconds between decay ticks.
    pub decay_interval_secs: u64,
    pub storage: StorageBackend,
    /// Directory for flat-file storage.
    pub data_dir: PathBuf,
    /// Seed the starting roster when storage holds no pets.
    pub seed_on_start: bool,
    /// Catalog JSON; the built-in catalog is used when absent.
    pub catalog_path: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            decay_interval_secs: DECAY_INTERVAL_SECS,
            storage: StorageBackend::Memory,
            data_dir: PathBuf::from("data"),
            seed_on_start: true,
            catalog_path: None,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decay_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "decay_interval_secs must be greater than 0".into(),
            ));
        }
        if self.storage == StorageBackend::Json && self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "data_dir is required for json storage".into(),
            ));
        }
        Ok(())
    }

    pub fn decay_interval(&self) -> Duration {
        Duration::from_secs(self.decay_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = SimConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.decay_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_override() {
        let config =
            SimConfig::from_json_str(r#"{ "decay_interval_secs": 5, "storage": "json" }"#).unwrap();
        assert_eq!(config.decay_interval_secs, 5);
        assert_eq!(config.storage, StorageBackend::Json);
        assert!(config.seed_on_start);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = SimConfig::from_json_str(r#"{ "decay_interval_secs": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_json_rejected() {
        assert!(matches!(
            SimConfig::from_json_str("not json"),
            Err(ConfigError::Json(_))
        ));
    }
}

//! Client configuration: target network, generation hash, and defaults used
//! when building transactions.

use crate::constants::{NetworkType, HASH_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("generation hash must be {} hex characters", HASH_SIZE * 2)]
    InvalidGenerationHash,
}

fn default_deadline_hours() -> u64 {
    2
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientConfig {
    pub network_type: NetworkType,
    /// Hash of the network's first block, mixed into every signature.
    pub generation_hash: String,
    #[serde(default = "default_deadline_hours")]
    pub default_deadline_hours: u64,
    #[serde(default)]
    pub default_max_fee: u64,
}

impl ClientConfig {
    pub fn new(network_type: NetworkType, generation_hash: &str) -> Result<Self, ConfigError> {
        let config = Self {
            network_type,
            generation_hash: generation_hash.to_string(),
            default_deadline_hours: default_deadline_hours(),
            default_max_fee: 0,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generation_hash_bytes().map(|_| ())
    }

    pub fn generation_hash_bytes(&self) -> Result<[u8; HASH_SIZE], ConfigError> {
        let raw = hex::decode(&self.generation_hash).map_err(|_| ConfigError::InvalidGenerationHash)?;
        raw.as_slice().try_into().map_err(|_| ConfigError::InvalidGenerationHash)
    }
}

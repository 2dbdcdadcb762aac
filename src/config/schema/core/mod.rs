mod env_overrides;
mod loader;

use super::{GatewayConfig, GestureConfig, ObservabilityConfig, RealtimeConfig, StoreConfig};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Data directory holding the database - computed from home, not serialized
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub gesture: GestureConfig,

    #[serde(default)]
    pub realtime: RealtimeConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gesture.validate()?;
        if self.realtime.channel_capacity == 0 {
            return Err(ConfigError::Validation(
                "realtime.channel_capacity must be greater than zero".into(),
            ));
        }
        match self.store.backend.as_str() {
            "sqlite" | "memory" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "store.backend must be \"sqlite\" or \"memory\", got \"{other}\""
            ))),
        }
    }

    /// Absolute location of the SQLite database for this config.
    pub fn database_path(&self) -> PathBuf {
        self.store.resolve_path(&self.data_dir)
    }
}

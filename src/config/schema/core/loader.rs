use super::Config;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl Config {
    /// Load `~/.dishswipe/config.toml`, writing a default one on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let dishswipe_dir = home.join(".dishswipe");
        Self::load_or_init_in(&dishswipe_dir)
            .with_context(|| format!("Failed to load config from {}", dishswipe_dir.display()))
    }

    /// Same as [`Config::load_or_init`] rooted at an explicit directory.
    pub fn load_or_init_in(dishswipe_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dishswipe_dir.join("config.toml");
        let data_dir = dishswipe_dir.join("data");

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)?;
        }

        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            let mut config: Config = toml::from_str(&contents).map_err(|error| {
                ConfigError::Load(format!("{}: {error}", config_path.display()))
            })?;
            config.config_path.clone_from(&config_path);
            config.data_dir = data_dir;
            config
        } else {
            let config = Self {
                config_path: config_path.clone(),
                data_dir,
                ..Self::default()
            };
            config.save()?;
            tracing::info!(path = %config_path.display(), "config.created");
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let toml_str =
            toml::to_string_pretty(self).map_err(|error| ConfigError::Save(error.to_string()))?;
        fs::write(&self.config_path, toml_str)?;
        Ok(())
    }
}

//! Configuration management for Amber

pub mod schema;

pub use schema::{Config, DefaultsConfig, RepositoryConfig};

use crate::error::{AmberError, AmberResult};
use crate::repository::Repository;
use schema::ConfigLayer;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("amber")
            .join("config.toml")
    }

    /// Load the user configuration, falling back to defaults if missing
    pub async fn load(&self) -> AmberResult<Config> {
        self.load_merged(None).await
    }

    /// Load the user configuration with a repository file layered on top.
    ///
    /// Keys set in the repository file win. Either file may be missing.
    pub async fn load_merged(&self, repository_config: Option<&Path>) -> AmberResult<Config> {
        let mut config = Config::default();

        for path in std::iter::once(self.config_path.as_path()).chain(repository_config) {
            match Self::read_layer(path).await? {
                Some(layer) => {
                    debug!("Applying config from {}", path.display());
                    layer.apply(&mut config);
                }
                None => debug!("Config file not found: {}", path.display()),
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load the configuration in effect for `repository`
    pub async fn load_for_repository(&self, repository: &Repository) -> AmberResult<Config> {
        self.load_merged(Some(&repository.config_path())).await
    }

    async fn read_layer(path: &Path) -> AmberResult<Option<ConfigLayer>> {
        if !fs::try_exists(path)
            .await
            .map_err(|e| AmberError::io(format!("checking {}", path.display()), e))?
        {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AmberError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content)
            .map(Some)
            .map_err(|e| AmberError::ConfigInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> AmberResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            AmberError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> AmberResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AmberError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

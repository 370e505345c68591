//! Configuration port interface

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for configuration storage
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load configuration. A missing file yields an empty config.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist configuration, creating parent directories as needed.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the configuration file
    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write the defaults to a new file. Fails if the file already exists.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Load configuration, treating any failure as an empty config
    async fn load_or_empty(&self) -> AppConfig {
        match self.load().await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path().display(), "ignoring unreadable config");
                AppConfig::empty()
            }
        }
    }
}

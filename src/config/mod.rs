//! Configuration management

pub mod schema;

pub use schema::{Config, DefaultsConfig, DisplayConfig, OutputFormat};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::AppError;

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
            .join("recipe-cost")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults if the file does not exist
    pub fn load(&self) -> Result<Config, AppError> {
        if !self.config_path.exists() {
            debug!(
                "Config file {} not found, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(&self, path: &Path) -> Result<Config, AppError> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::io(format!("reading config from {}", path.display()), e))?;

        let config = toml::from_str(&content).map_err(|e| AppError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Render a configuration as TOML
    pub fn to_toml(config: &Config) -> Result<String, AppError> {
        Ok(toml::to_string_pretty(config)?)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceType;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("missing.toml"));

        let config = manager.load().unwrap();
        assert_eq!(config.display.decimals, 2);
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[defaults]\nprice_type = \"unit\"\n").unwrap();

        let config = ConfigManager::with_path(path).load().unwrap();
        assert_eq!(config.defaults.price_type, PriceType::PerUnit);
    }

    #[test]
    fn test_malformed_file_is_config_invalid() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[display\ndecimals = two").unwrap();

        let result = ConfigManager::with_path(path.clone()).load();
        assert!(matches!(result, Err(AppError::ConfigInvalid { path: p, .. }) if p == path));
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        let path = ConfigManager::default_config_path();
        assert!(path.ends_with("recipe-cost/config.toml"));
    }
}

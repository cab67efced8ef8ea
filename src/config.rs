/// Configuration module for ScamGuard
///
/// This module defines the configuration structures used by the engine and the CLI:
/// general settings, pattern registry location and local source directory.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::analys::risk_analyzer::{FilePatternStore, InMemoryPatternStore, PatternRegistry};
use crate::errors::GuardError;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Scam pattern registry
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Contract scanner
    #[serde(default)]
    pub scanner: ScannerConfig,
}

impl GuardConfig {
    /// Check values that serde cannot reject on its own
    pub fn validate(&self) -> crate::errors::Result<()> {
        if self.general.enable_metrics && self.general.metrics_port == 0 {
            return Err(GuardError::ConfigError(
                "general.metrics_port must be set when metrics are enabled".to_string(),
            ));
        }
        if matches!(&self.registry.patterns_file, Some(path) if path.trim().is_empty()) {
            return Err(GuardError::ConfigError(
                "registry.patterns_file must not be empty".to_string(),
            ));
        }
        if self.scanner.source_dir.trim().is_empty() {
            return Err(GuardError::ConfigError(
                "scanner.source_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Instance name
    pub name: String,

    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,

    /// Enable metrics collection
    pub enable_metrics: bool,

    /// Prometheus exporter port
    pub metrics_port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            name: "DiamondChain ScamGuard".to_string(),
            log_level: "info".to_string(),
            enable_metrics: false,
            metrics_port: 9100,
        }
    }
}

/// Pattern registry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// YAML/JSON file with scam patterns; `None` keeps patterns in memory
    pub patterns_file: Option<String>,

    /// Use the four built-in patterns when no file is configured
    pub seed_defaults: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            patterns_file: None,
            seed_defaults: true,
        }
    }
}

impl RegistryConfig {
    /// Load a registry snapshot. A broken store yields an empty registry.
    pub async fn load_registry(&self) -> PatternRegistry {
        match &self.patterns_file {
            Some(path) => PatternRegistry::load(&FilePatternStore::new(path)).await,
            None if self.seed_defaults => {
                PatternRegistry::load(&InMemoryPatternStore::with_defaults()).await
            }
            None => PatternRegistry::empty(),
        }
    }
}

/// Contract scanner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Directory holding `<address>.sol` and `<address>.json` files
    pub source_dir: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            source_dir: "contracts".to_string(),
        }
    }
}

/// Configuration manager
pub struct ConfigManager {
    /// Current configuration
    config: RwLock<GuardConfig>,

    /// Path to configuration file
    pub config_path: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new(config_path: &str) -> Self {
        Self {
            config: RwLock::new(GuardConfig::default()),
            config_path: config_path.to_string(),
        }
    }

    /// Load configuration from file
    pub async fn load(&self) -> Result<()> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            info!("Configuration file not found, using default configuration");
            return Ok(());
        }

        let config_content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read configuration file: {}", self.config_path))?;

        let config: GuardConfig = serde_yaml::from_str(&config_content)
            .context("Failed to parse configuration file")?;
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", self.config_path))?;

        *self.config.write().await = config;
        info!("Configuration loaded from {}", self.config_path);

        Ok(())
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_yaml = {
            let config = self.config.read().await;
            serde_yaml::to_string(&*config).context("Failed to serialize configuration")?
        };

        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        tokio::fs::write(path, config_yaml).await.with_context(|| {
            format!("Failed to write configuration to file: {}", self.config_path)
        })?;

        info!("Configuration saved to {}", self.config_path);
        Ok(())
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> GuardConfig {
        self.config.read().await.clone()
    }

    /// Update the configuration
    pub async fn update_config(&self, config: GuardConfig) -> Result<()> {
        config.validate().context("Refusing to save invalid configuration")?;
        *self.config.write().await = config;
        self.save().await?;
        Ok(())
    }
}

/// Default configuration written by `scamguard init`
pub fn initialize_default_config() -> GuardConfig {
    let mut config = GuardConfig::default();
    config.registry.patterns_file = Some("config/patterns.yaml".to_string());
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = GuardConfig::default();
        assert_eq!(config.general.name, "DiamondChain ScamGuard");
        assert!(config.registry.seed_defaults);
        assert!(config.registry.patterns_file.is_none());
        assert_eq!(config.scanner.source_dir, "contracts");
    }

    #[test]
    fn test_initialize_default_config() {
        let config = initialize_default_config();
        assert_eq!(config.registry.patterns_file.as_deref(), Some("config/patterns.yaml"));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: GuardConfig =
            serde_yaml::from_str("scanner:\n  source_dir: /tmp/sources\n").unwrap();
        assert_eq!(config.scanner.source_dir, "/tmp/sources");
        assert_eq!(config.general, GeneralConfig::default());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("guard.yaml");
        let path = path.to_string_lossy().to_string();

        let manager = ConfigManager::new(&path);
        let mut config = initialize_default_config();
        config.general.log_level = "debug".to_string();
        manager.update_config(config.clone()).await.unwrap();

        let reloaded = ConfigManager::new(&path);
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.get_config().await, config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(initialize_default_config().validate().is_ok());

        let mut config = GuardConfig::default();
        config.scanner.source_dir = "  ".to_string();
        assert!(matches!(config.validate(), Err(GuardError::ConfigError(_))));

        let mut config = GuardConfig::default();
        config.general.enable_metrics = true;
        config.general.metrics_port = 0;
        assert!(matches!(config.validate(), Err(GuardError::ConfigError(_))));

        let mut config = GuardConfig::default();
        config.registry.patterns_file = Some(String::new());
        assert!(matches!(config.validate(), Err(GuardError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("guard.yaml");
        std::fs::write(&path, "scanner:\n  source_dir: \"\"\n").unwrap();

        let manager = ConfigManager::new(&path.to_string_lossy());
        let err = manager.load().await.unwrap_err();
        assert!(format!("{:#}", err).contains("scanner.source_dir"));
        assert_eq!(manager.get_config().await, GuardConfig::default());
    }

    #[tokio::test]
    async fn test_missing_file_keeps_defaults() {
        let manager = ConfigManager::new("/nonexistent/scamguard.yaml");
        manager.load().await.unwrap();
        assert_eq!(manager.get_config().await, GuardConfig::default());
    }

    #[tokio::test]
    async fn test_registry_loading() {
        assert_eq!(RegistryConfig::default().load_registry().await.len(), 4);

        let empty = RegistryConfig { patterns_file: None, seed_defaults: false };
        assert!(empty.load_registry().await.is_empty());

        let broken = RegistryConfig {
            patterns_file: Some("/nonexistent/patterns.yaml".to_string()),
            seed_defaults: true,
        };
        assert!(broken.load_registry().await.is_empty());
    }
}

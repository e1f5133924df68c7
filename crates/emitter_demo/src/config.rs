//! Configuration management for the emitter demo.
//!
//! This module handles loading and validation of the demo configuration from
//! TOML files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

fn default_event_name() -> String {
    "emitter.example".to_string()
}

/// Application configuration loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration settings
    pub logging: LoggingSettings,
    /// Demonstration settings
    #[serde(default)]
    pub demo: DemoSettings,
}

/// Logging system configuration.
///
/// Controls log output format and level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

/// What the demo runs when started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoSettings {
    /// Event name used by the built-in demonstration
    #[serde(default = "default_event_name")]
    pub event_name: String,
    /// Command script to run instead of the built-in demonstration
    #[serde(default)]
    pub script: Option<String>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            event_name: default_event_name(),
            script: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingSettings {
                level: "info".to_string(),
                json_format: false,
            },
            demo: DemoSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, writes the default configuration to `path`
    /// and returns it.
    pub async fn load_from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content).await?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Validates the configuration.
    ///
    /// Returns an error string describing the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        if !emitter::is_valid_event_name(&self.demo.event_name) {
            return Err("Demo event name cannot be empty".to_string());
        }

        if matches!(self.demo.script.as_deref(), Some("")) {
            return Err("Demo script path cannot be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
        assert_eq!(config.demo.event_name, "emitter.example");
        assert!(config.demo.script.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "debug".to_string();
        config.demo.event_name = String::new();
        assert!(config.validate().is_err());

        config.demo.event_name = "ok".to_string();
        config.demo.script = Some(String::new());
        assert!(config.validate().is_err());

        config.demo.script = Some("commands.toml".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let toml_content = r#"
[logging]
level = "warn"
"#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.json_format);
        assert_eq!(config.demo.event_name, "emitter.example");
        assert!(config.demo.script.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AppConfig::default();
        config.demo.script = Some("scripts/demo.json".to_string());

        let toml_content = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_content).unwrap();

        assert_eq!(parsed.demo.script, config.demo.script);
        assert_eq!(parsed.logging.level, config.logging.level);
    }

    #[tokio::test]
    async fn test_load_from_nonexistent_file_creates_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("emitter.toml");

        let config = AppConfig::load_from_file(&path).await.unwrap();
        assert_eq!(config.demo.event_name, "emitter.example");
        assert!(path.exists());

        let reloaded = AppConfig::load_from_file(&path).await.unwrap();
        assert_eq!(reloaded.logging.level, "info");
    }

    #[tokio::test]
    async fn test_load_from_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        tokio::fs::write(
            &path,
            "[logging]\nlevel = \"debug\"\njson_format = true\n\n[demo]\nevent_name = \"custom.event\"\n",
        )
        .await
        .unwrap();

        let config = AppConfig::load_from_file(&path).await.unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
        assert_eq!(config.demo.event_name, "custom.event");
    }

    #[tokio::test]
    async fn test_load_invalid_toml_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        tokio::fs::write(&path, "[logging\nlevel = ").await.unwrap();

        assert!(AppConfig::load_from_file(&path).await.is_err());
    }
}

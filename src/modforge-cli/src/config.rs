//! Configuration management for modforge CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Defaults applied when a generate/catalog flag is not given on the
/// command line
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub reference_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub lang: Option<String>,
    /// Resource namespace for output paths and localization keys
    pub namespace: Option<String>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("modforge");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Data directory: flag, then config, then `data/`
    pub fn data_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        resolve_dir(flag, self.data_dir.as_deref(), "data")
    }

    /// Reference directory: flag, then config, then `reference/`
    pub fn reference_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        resolve_dir(flag, self.reference_dir.as_deref(), "reference")
    }

    /// Output directory: flag, then config, then `out/`
    pub fn output_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        resolve_dir(flag, self.output_dir.as_deref(), "out")
    }

    /// Language code: flag, then config, then `en_us`
    pub fn lang(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.lang.clone())
            .unwrap_or_else(|| "en_us".to_string())
    }

    /// Resource namespace, `tetra` unless configured otherwise
    pub fn namespace(&self) -> String {
        self.namespace
            .clone()
            .unwrap_or_else(|| "tetra".to_string())
    }
}

fn resolve_dir(flag: Option<PathBuf>, configured: Option<&Path>, default: &str) -> PathBuf {
    flag.or_else(|| configured.map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_exists() {
        let result = Config::config_path();
        assert!(result.is_ok());
    }

    #[test]
    fn test_flag_beats_config_beats_default() {
        let config = Config {
            data_dir: Some(PathBuf::from("/configured")),
            ..Config::default()
        };

        assert_eq!(
            config.data_dir(Some(PathBuf::from("/flag"))),
            PathBuf::from("/flag")
        );
        assert_eq!(config.data_dir(None), PathBuf::from("/configured"));

        let empty = Config::default();
        assert_eq!(empty.data_dir(None), PathBuf::from("data"));
        assert_eq!(empty.output_dir(None), PathBuf::from("out"));
        assert_eq!(empty.lang(None), "en_us");
        assert_eq!(empty.namespace(), "tetra");
    }
}

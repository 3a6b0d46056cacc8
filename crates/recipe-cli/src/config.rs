//! Application configuration.
//!
//! Reads the `[store]` and `[log]` sections of `config/default.toml`.
//! A missing file or section falls back to defaults. The data directory can
//! be overridden by `RECIPES_DATA_DIR`, and that in turn by `--data-dir`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use recipe_store::StoreConfig;
use serde::Deserialize;

/// Environment variable overriding `store.data_dir`.
pub const DATA_DIR_ENV: &str = "RECIPES_DATA_DIR";

/// Settings loaded from the configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub log: LogConfig,
}

/// The `[log]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `path`, or defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content)
                .with_context(|| format!("invalid config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply the environment value and then the flag; the flag wins.
    pub fn override_data_dir(&mut self, env_value: Option<String>, flag: Option<PathBuf>) {
        if let Some(dir) = env_value.filter(|v| !v.is_empty()) {
            self.store.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = flag {
            self.store.data_dir = dir;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn reads_store_and_log_sections() {
        let config = AppConfig::parse(
            r#"
            [store]
            data_dir = "/var/lib/recipes"

            [log]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.store.data_dir, PathBuf::from("/var/lib/recipes"));
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(AppConfig::parse("[store\ndata_dir = 1").is_err());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn flag_beats_environment() {
        let mut config = AppConfig::default();
        config.override_data_dir(Some("/from/env".into()), None);
        assert_eq!(config.store.data_dir, PathBuf::from("/from/env"));

        config.override_data_dir(Some("/from/env".into()), Some(PathBuf::from("/from/flag")));
        assert_eq!(config.store.data_dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn empty_environment_value_is_ignored() {
        let mut config = AppConfig::default();
        config.override_data_dir(Some(String::new()), None);
        assert_eq!(config.store, StoreConfig::default());
    }
}

//! Where the recipe database lives on disk.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::StoreResult;
use crate::schema::DB_NAME;

/// Store settings, usually read from the `[store]` section of a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the database file. Created on demand.
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Full path of the database file. The file name is fixed.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(format!("{DB_NAME}.sqlite3"))
    }

    /// Create the data directory if it does not exist yet.
    pub fn ensure_data_dir(&self) -> StoreResult<&Path> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)?;
            info!(path = %self.data_dir.display(), "created data directory");
        }
        Ok(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_file_name_is_fixed() {
        let config = StoreConfig::new("/tmp/somewhere");
        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/somewhere/recipeDB.sqlite3")
        );
    }

    #[test]
    fn default_data_dir() {
        assert_eq!(StoreConfig::default().data_dir, PathBuf::from("data"));
    }

    #[test]
    fn ensure_data_dir_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("a").join("b"));

        config.ensure_data_dir().unwrap();
        assert!(config.data_dir.is_dir());
        // Second call is a no-op.
        config.ensure_data_dir().unwrap();
    }
}

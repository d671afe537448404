use crate::error::{Result, StoreError};
use crate::image::{FsImageStore, DEFAULT_IMAGES_DIR};
use crate::store::fs::{FileItemStore, DEFAULT_ITEMS_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "itemstore.json";

/// Configuration for the item store, stored in `itemstore.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Backing file for the item collection
    #[serde(default = "default_items_path")]
    pub items_path: PathBuf,

    /// Directory images are written to
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,

    /// Write through a temporary file and rename instead of truncating in place
    #[serde(default)]
    pub atomic_writes: bool,
}

fn default_items_path() -> PathBuf {
    PathBuf::from(DEFAULT_ITEMS_FILE)
}

fn default_images_dir() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGES_DIR)
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            items_path: default_items_path(),
            images_dir: default_images_dir(),
            atomic_writes: false,
        }
    }
}

impl StoreConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: StoreConfig = serde_json::from_str(&content).map_err(StoreError::Config)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StoreError::Config)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn file_store(&self) -> FileItemStore {
        FileItemStore::new(&self.items_path).with_atomic_writes(self.atomic_writes)
    }

    pub fn image_store(&self) -> FsImageStore {
        FsImageStore::new(&self.images_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.items_path, PathBuf::from("items.json"));
        assert_eq!(config.images_dir, PathBuf::from("images"));
        assert!(!config.atomic_writes);
    }

    #[test]
    fn test_load_missing_config() {
        let tmp = TempDir::new().unwrap();
        let config = StoreConfig::load(tmp.path().join("nowhere")).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("conf");

        let config = StoreConfig {
            items_path: PathBuf::from("db/items.json"),
            atomic_writes: true,
            ..StoreConfig::default()
        };
        config.save(&dir).unwrap();

        let loaded = StoreConfig::load(&dir).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"{ "items_path": "catalog.json" }"#,
        )
        .unwrap();

        let config = StoreConfig::load(tmp.path()).unwrap();
        assert_eq!(config.items_path, PathBuf::from("catalog.json"));
        assert_eq!(config.images_dir, PathBuf::from("images"));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "items_path = 1").unwrap();

        let err = StoreConfig::load(tmp.path()).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_builds_configured_adapters() {
        let config = StoreConfig {
            items_path: PathBuf::from("x.json"),
            images_dir: PathBuf::from("pics"),
            atomic_writes: true,
        };
        let store = config.file_store();
        assert_eq!(store.path(), Path::new("x.json"));
        assert!(store.atomic_writes());
        assert_eq!(config.image_store().dir(), Path::new("pics"));
    }
}

//! Configuration management

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Durable directory documents are copied into
    pub documents_dir: PathBuf,

    /// Root of the bundled asset tree
    pub assets_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding the four pre-generated JSON tables
    pub config_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: StorageConfig {
                documents_dir: PathBuf::from("./data/documents"),
                assets_dir: PathBuf::from("./assets/papers"),
            },
            catalog: CatalogConfig {
                config_dir: PathBuf::from("./assets/config"),
            },
        }
    }
}

impl Config {
    /// Build configuration from the environment, falling back per field
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            storage: StorageConfig {
                documents_dir: env::var("PAPERS_DOCUMENTS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.documents_dir),
                assets_dir: env::var("PAPERS_ASSETS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.assets_dir),
            },
            catalog: CatalogConfig {
                config_dir: env::var("PAPERS_CONFIG_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.catalog.config_dir),
            },
        }
    }
}

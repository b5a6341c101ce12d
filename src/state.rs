//! Application state
//!
//! Wires the catalog, resolver and materializer together for the binary and
//! for embedders. Cheap to clone and share.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogError};
use crate::config::Config;
use crate::materializer::{LocalAssetStore, Materializer};
use crate::resolver::Resolver;
use crate::session::ViewerSession;

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to load catalog: {0}")]
    CatalogLoad(#[from] CatalogError),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    resolver: Resolver,
    materializer: Materializer,
}

impl AppState {
    /// Load the catalog from disk and wire up the core services
    pub fn new(config: Config) -> Result<Self, StateError> {
        let catalog = Catalog::load(&config.catalog.config_dir)?;
        Ok(Self::with_catalog(config, catalog))
    }

    /// Build state around an already constructed catalog
    pub fn with_catalog(config: Config, catalog: Catalog) -> Self {
        let resolver = Resolver::new(Arc::new(catalog));
        let assets = Arc::new(LocalAssetStore::new(&config.storage.assets_dir));
        let materializer = Materializer::new(assets, config.storage.documents_dir.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                resolver,
                materializer,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the resolver
    pub fn resolver(&self) -> &Resolver {
        &self.inner.resolver
    }

    /// Get the materializer
    pub fn materializer(&self) -> &Materializer {
        &self.inner.materializer
    }

    /// Start a viewer session for one screen
    pub fn new_session(&self) -> ViewerSession {
        ViewerSession::new(
            self.inner.resolver.clone(),
            self.inner.materializer.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogConfig, StorageConfig};
    use crate::session::{PaperKey, SessionStatus};
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        _assets: TempDir,
        _documents: TempDir,
        _config_dir: TempDir,
        state: AppState,
    }

    /// Write the four catalog tables plus one bundled asset, then load the
    /// state the way the binary does.
    fn fixture() -> Fixture {
        let assets = tempfile::tempdir().unwrap();
        let documents = tempfile::tempdir().unwrap();
        let config_dir = tempfile::tempdir().unwrap();

        std::fs::write(assets.path().join("gs1.pdf"), b"pdf bytes").unwrap();

        std::fs::write(config_dir.path().join("years.json"), r#"["2023"]"#).unwrap();
        std::fs::write(
            config_dir.path().join("paper_types.json"),
            r#"{"2023": ["mains"]}"#,
        )
        .unwrap();
        std::fs::write(
            config_dir.path().join("categories.json"),
            r#"{"2023/mains": [{"id": "gs1", "name": "General Studies Paper I"}]}"#,
        )
        .unwrap();
        std::fs::write(
            config_dir.path().join("papers.json"),
            r#"[{
                "id": "2023-mains-gs1-1",
                "year": "2023",
                "type": "mains",
                "categoryId": "gs1",
                "title": "General Studies Paper I",
                "originalFileName": "General Studies Paper I.pdf",
                "fileName": "gs1.pdf",
                "path": "gs1.pdf"
            }]"#,
        )
        .unwrap();

        let config = Config {
            storage: StorageConfig {
                documents_dir: documents.path().to_path_buf(),
                assets_dir: assets.path().to_path_buf(),
            },
            catalog: CatalogConfig {
                config_dir: config_dir.path().to_path_buf(),
            },
        };
        let state = AppState::new(config).unwrap();

        Fixture {
            _assets: assets,
            _documents: documents,
            _config_dir: config_dir,
            state,
        }
    }

    #[tokio::test]
    async fn test_full_flow_resolves_and_materializes() {
        let f = fixture();

        let documents = f.state.resolver().documents_for("2023", "mains", "gs1");
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].category_id, "gs1");

        let session = f.state.new_session();
        let status = session.open(&PaperKey::new("2023", "mains", "gs1")).await;
        assert_eq!(status, SessionStatus::Ready);

        let source = session.source().await.unwrap();
        let path = source.local_path().unwrap().to_path_buf();
        assert!(path.ends_with("gs1.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"pdf bytes");

        // A second session shares the durable namespace and reuses the copy.
        std::fs::write(&path, b"sentinel").unwrap();
        let second = f.state.new_session();
        second.open(&PaperKey::new("2023", "mains", "gs1")).await;
        assert_eq!(std::fs::read(&path).unwrap(), b"sentinel");
    }

    #[tokio::test]
    async fn test_unknown_year_renders_no_content_not_error() {
        let f = fixture();
        assert!(f.state.resolver().types_for_year("1999").is_empty());

        let session = f.state.new_session();
        let status = session.open(&PaperKey::new("1999", "mains", "gs1")).await;
        assert_eq!(status, SessionStatus::Empty);
        assert!(session.error().await.is_none());
    }

    #[test]
    fn test_missing_catalog_dir_is_a_load_error() {
        let config = Config {
            storage: StorageConfig {
                documents_dir: PathBuf::from("/nonexistent/documents"),
                assets_dir: PathBuf::from("/nonexistent/assets"),
            },
            catalog: CatalogConfig {
                config_dir: PathBuf::from("/nonexistent/config"),
            },
        };
        assert!(matches!(
            AppState::new(config),
            Err(StateError::CatalogLoad(_))
        ));
    }
}

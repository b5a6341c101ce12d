//! Asset resolution seam
//!
//! Bundled assets may need a platform staging step before they are readable
//! (unpack from the application package, a one-time download into the asset
//! cache). The trait keeps that step out of the materializer; the shipped
//! implementation serves assets straight from a directory tree.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

/// Resolves a bundled-asset reference to a readable path
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Resolve `reference` to a path that can be opened for reading
    ///
    /// The returned path must exist when the call succeeds.
    async fn resolve(&self, reference: &str) -> io::Result<PathBuf>;
}

/// Assets unpacked under a root directory
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    root: PathBuf,
}

impl LocalAssetStore {
    /// Serve assets from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn resolve(&self, reference: &str) -> io::Result<PathBuf> {
        let path = self.root.join(reference);
        tokio::fs::metadata(&path).await?;
        Ok(path)
    }
}

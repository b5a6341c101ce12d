//! Document materialization
//!
//! Turns a [`DocumentRecord`] into a consumable [`MaterializedSource`].
//! Remote records pass through untouched; asset-backed records are copied
//! into durable storage at most once per file name. The destination
//! namespace is shared process-wide, so the exists-check and the copy run as
//! one critical section per destination path, and the copy lands via a
//! unique temp file plus atomic rename: a concurrent reader never observes
//! a partial write.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

use crate::catalog::{DocumentRecord, SourceLocator};

use super::assets::AssetStore;
use super::error::MaterializeError;
use super::types::MaterializedSource;

/// Stages documents into durable storage
///
/// Cheap to clone; all clones share one destination namespace and one
/// per-path lock registry.
#[derive(Clone)]
pub struct Materializer {
    inner: Arc<MaterializerInner>,
}

struct MaterializerInner {
    /// Platform seam for bundled assets
    assets: Arc<dyn AssetStore>,

    /// Durable destination directory, shared across sessions
    documents_dir: PathBuf,

    /// One async lock per destination path
    path_locks: parking_lot::Mutex<HashMap<PathBuf, Arc<AsyncMutex<()>>>>,
}

impl Materializer {
    /// Create a materializer writing into `documents_dir`
    pub fn new(assets: Arc<dyn AssetStore>, documents_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(MaterializerInner {
                assets,
                documents_dir: documents_dir.into(),
                path_locks: parking_lot::Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Destination path a record materializes to
    ///
    /// Derived from the record's renderer-safe file name only, so repeated
    /// materialization of the same document is idempotent.
    pub fn destination_for(&self, record: &DocumentRecord) -> PathBuf {
        self.inner.documents_dir.join(&record.file_name)
    }

    /// Produce a consumable source for `record`
    pub async fn materialize(
        &self,
        record: &DocumentRecord,
    ) -> Result<MaterializedSource, MaterializeError> {
        match &record.source {
            SourceLocator::Remote(url) => {
                tracing::debug!(
                    document_id = %record.id,
                    url = %url,
                    "Remote document, renderer streams and caches"
                );
                Ok(MaterializedSource::Remote {
                    url: url.clone(),
                    cache: true,
                })
            }
            SourceLocator::Asset(reference) => {
                let path = self.stage_asset(record, reference).await?;
                Ok(MaterializedSource::Local { path })
            }
        }
    }

    /// Copy an asset-backed record into durable storage, at most once
    async fn stage_asset(
        &self,
        record: &DocumentRecord,
        reference: &str,
    ) -> Result<PathBuf, MaterializeError> {
        let resolved = self.inner.assets.resolve(reference).await.map_err(|source| {
            MaterializeError::AssetUnavailable {
                document_id: record.id.clone(),
                reference: reference.to_string(),
                source,
            }
        })?;

        let dest = self.destination_for(record);

        // Exists-check and copy form one critical section per destination.
        let lock = self.lock_for(&dest);
        let _guard = lock.lock().await;

        match tokio::fs::try_exists(&dest).await {
            Ok(true) => {
                tracing::debug!(
                    document_id = %record.id,
                    dest = %dest.display(),
                    "Already materialized, skipping copy"
                );
                return Ok(dest);
            }
            Ok(false) => {}
            Err(source) => {
                return Err(MaterializeError::CopyFailed {
                    document_id: record.id.clone(),
                    dest,
                    source,
                });
            }
        }

        copy_atomic(&resolved, &dest)
            .await
            .map_err(|source| MaterializeError::CopyFailed {
                document_id: record.id.clone(),
                dest: dest.clone(),
                source,
            })?;

        tracing::info!(
            document_id = %record.id,
            from = %resolved.display(),
            dest = %dest.display(),
            "Materialized document into durable storage"
        );
        Ok(dest)
    }

    /// Get or create the lock guarding one destination path
    fn lock_for(&self, dest: &Path) -> Arc<AsyncMutex<()>> {
        let mut locks = self.inner.path_locks.lock();
        locks.entry(dest.to_path_buf()).or_default().clone()
    }
}

/// Copy via a unique temp file in the destination directory, then rename
async fn copy_atomic(from: &Path, dest: &Path) -> std::io::Result<()> {
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let file_name = dest
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = dest.with_file_name(format!("{}.{}.part", file_name, Uuid::new_v4().simple()));

    if let Err(err) = tokio::fs::copy(from, &tmp).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(err);
    }
    if let Err(err) = tokio::fs::rename(&tmp, dest).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(err);
    }
    Ok(())
}

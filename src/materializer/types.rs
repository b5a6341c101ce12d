//! Materialization types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A consumable location for a selected document
///
/// `Local` paths point into durable storage and exist at the moment the
/// value is returned. `Remote` sources are streamed by the renderer; `cache`
/// asks the renderer to keep its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MaterializedSource {
    Local { path: PathBuf },
    Remote { url: String, cache: bool },
}

impl MaterializedSource {
    /// Whether this source is a durable local file
    pub fn is_local(&self) -> bool {
        matches!(self, MaterializedSource::Local { .. })
    }

    /// The local path, if any
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            MaterializedSource::Local { path } => Some(path),
            MaterializedSource::Remote { .. } => None,
        }
    }
}

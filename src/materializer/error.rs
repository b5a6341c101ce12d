//! Materialization error types

use std::path::PathBuf;

use thiserror::Error;

/// Why a document could not be materialized
///
/// Every variant names the offending document so the viewer can mark just
/// that record as currently unviewable.
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// The bundled asset behind the record could not be resolved
    #[error("asset {reference} for document {document_id} is unavailable: {source}")]
    AssetUnavailable {
        document_id: String,
        reference: String,
        #[source]
        source: std::io::Error,
    },

    /// Copying into durable storage failed
    #[error("failed to copy document {document_id} to {dest}: {source}")]
    CopyFailed {
        document_id: String,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MaterializeError {
    /// Id of the document that could not be materialized
    pub fn document_id(&self) -> &str {
        match self {
            Self::AssetUnavailable { document_id, .. }
            | Self::CopyFailed { document_id, .. } => document_id,
        }
    }
}

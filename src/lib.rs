//! Papershelf core
//!
//! Document resolution and local materialization for a catalog of exam
//! papers browsed as year → exam type → category → document.
//!
//! # Modules
//!
//! - `catalog`: immutable catalog loaded from pre-generated JSON tables
//! - `resolver`: pure hierarchy lookups; absence is empty, never an error
//! - `materializer`: turns a record into a local path or remote locator,
//!   copying bundled assets into durable storage at most once
//! - `session`: the per-screen viewer lifecycle, from resolving siblings to
//!   handing the renderer a ready source
//! - `config`: environment-driven configuration
//! - `state`: wires the services together for the binary and for embedders

pub mod catalog;
pub mod config;
pub mod materializer;
pub mod resolver;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, CatalogTables, DocumentRecord, SourceLocator};
pub use materializer::{
    AssetStore, LocalAssetStore, MaterializeError, MaterializedSource, Materializer,
};
pub use resolver::Resolver;
pub use session::{
    NavigationRequest, PaperKey, RendererEvent, SessionStatus, ViewerSession,
};
pub use state::{AppState, StateError};

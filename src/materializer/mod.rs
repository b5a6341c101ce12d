//! Document materialization
//!
//! Given one resolved document record, produce a consumable location: a
//! durable local path for asset-backed records (copied at most once), or a
//! remote locator the renderer streams itself.

mod assets;
mod error;
mod store;
mod types;

pub use assets::{AssetStore, LocalAssetStore};
pub use error::MaterializeError;
pub use store::Materializer;
pub use types::MaterializedSource;

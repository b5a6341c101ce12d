//! Viewer sessions
//!
//! The per-screen lifecycle around one hierarchical key: resolve the sibling
//! documents, await materialization of the selection, surface failures as a
//! displayable state, and switch between siblings without flashing a blank
//! viewer.

mod types;
mod viewer;

pub use types::{NavigationRequest, PaperKey, RendererEvent, SessionStatus};
pub use viewer::ViewerSession;

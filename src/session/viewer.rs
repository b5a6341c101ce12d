//! Viewer session state machine
//!
//! One parametrized state machine drives every hierarchy screen: resolve the
//! sibling list, keep the renderer fed with a ready source, surface failures
//! as a displayable state. A session is owned by exactly one screen and
//! discarded on navigation away.
//!
//! Ordering guarantee: every materialization is tagged with the selection
//! generation it was issued for; a completion whose generation is no longer
//! current is discarded, so the last selection always wins even when an
//! earlier materialization resolves later.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::catalog::DocumentRecord;
use crate::materializer::{MaterializedSource, Materializer};
use crate::resolver::Resolver;

use super::types::{PaperKey, RendererEvent, SessionStatus};

/// A viewer session bound to one screen
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct ViewerSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    /// Session id, used in log fields
    id: Uuid,

    resolver: Resolver,
    materializer: Materializer,

    /// Mutable screen state
    state: RwLock<SessionState>,

    /// Monotonic selection counter; completions tagged with an older value
    /// are discarded
    generation: AtomicU64,
}

#[derive(Debug, Default)]
struct SessionState {
    status: SessionStatus,
    siblings: Vec<DocumentRecord>,
    selected: Option<DocumentRecord>,
    source: Option<MaterializedSource>,
    page_count: Option<u32>,
    current_page: Option<u32>,
    error: Option<String>,
}

impl ViewerSession {
    /// Create an idle session
    pub fn new(resolver: Resolver, materializer: Materializer) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                id: Uuid::new_v4(),
                resolver,
                materializer,
                state: RwLock::new(SessionState::default()),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Session id, for log correlation
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Current lifecycle status
    pub async fn status(&self) -> SessionStatus {
        self.inner.state.read().await.status
    }

    /// Currently selected document
    pub async fn selected(&self) -> Option<DocumentRecord> {
        self.inner.state.read().await.selected.clone()
    }

    /// Sibling documents resolved for the open key
    pub async fn siblings(&self) -> Vec<DocumentRecord> {
        self.inner.state.read().await.siblings.clone()
    }

    /// Source to hand to the renderer, if ready
    pub async fn source(&self) -> Option<MaterializedSource> {
        self.inner.state.read().await.source.clone()
    }

    /// Last failure message, if any
    pub async fn error(&self) -> Option<String> {
        self.inner.state.read().await.error.clone()
    }

    /// Page count reported by the renderer
    pub async fn page_count(&self) -> Option<u32> {
        self.inner.state.read().await.page_count
    }

    /// Current page reported by the renderer
    pub async fn current_page(&self) -> Option<u32> {
        self.inner.state.read().await.current_page
    }

    /// Enter the session with a hierarchical key
    ///
    /// Resolves the sibling list, auto-selects the first record (or the
    /// explicit document the key names) and awaits its materialization. An
    /// empty resolution ends in [`SessionStatus::Empty`], never an error.
    pub async fn open(&self, key: &PaperKey) -> SessionStatus {
        {
            let mut state = self.inner.state.write().await;
            *state = SessionState::default();
            state.status = SessionStatus::Resolving;
        }

        let documents =
            self.inner
                .resolver
                .documents_for(&key.year, &key.exam_type, &key.category);
        if documents.is_empty() {
            tracing::debug!(
                session_id = %self.inner.id,
                year = %key.year,
                exam_type = %key.exam_type,
                category = %key.category,
                "No documents for key"
            );
            let mut state = self.inner.state.write().await;
            state.status = SessionStatus::Empty;
            return state.status;
        }

        let selected = match &key.document {
            Some(id) => match documents.iter().find(|d| &d.id == id) {
                Some(document) => document.clone(),
                None => {
                    tracing::warn!(
                        session_id = %self.inner.id,
                        document_id = %id,
                        "Requested document not in resolved set, falling back to first"
                    );
                    documents[0].clone()
                }
            },
            None => documents[0].clone(),
        };

        let generation = {
            let mut state = self.inner.state.write().await;
            state.siblings = documents;
            state.selected = Some(selected.clone());
            state.status = SessionStatus::AwaitingMaterialization;
            self.next_generation()
        };

        self.materialize_as(selected, generation).await
    }

    /// Switch to a sibling document by id
    ///
    /// From `Ready` the previous output stays up until the new result lands;
    /// otherwise this behaves like a fresh materialization. Unknown ids are
    /// ignored with a warning.
    pub async fn select(&self, document_id: &str) -> SessionStatus {
        let (document, generation) = {
            let mut state = self.inner.state.write().await;
            let Some(document) = state
                .siblings
                .iter()
                .find(|d| d.id == document_id)
                .cloned()
            else {
                tracing::warn!(
                    session_id = %self.inner.id,
                    document_id = %document_id,
                    "Ignoring selection of unknown document"
                );
                return state.status;
            };

            state.selected = Some(document.clone());
            state.error = None;
            state.page_count = None;
            state.current_page = None;
            if state.status == SessionStatus::Ready {
                // Keep the previous output up to avoid flashing a blank
                // viewer while the sibling materializes.
                state.status = SessionStatus::SwitchingSelection;
            } else {
                state.source = None;
                state.status = SessionStatus::AwaitingMaterialization;
            }
            (document, self.next_generation())
        };

        self.materialize_as(document, generation).await
    }

    /// Feed back an event from the external renderer
    pub async fn renderer_event(&self, event: RendererEvent) -> SessionStatus {
        let mut state = self.inner.state.write().await;
        match event {
            RendererEvent::Loaded { pages } => {
                state.page_count = Some(pages);
                state.current_page.get_or_insert(1);
            }
            RendererEvent::PageChanged { page, pages } => {
                state.current_page = Some(page);
                state.page_count = Some(pages);
            }
            RendererEvent::LoadFailed { message } => {
                tracing::warn!(
                    session_id = %self.inner.id,
                    error = %message,
                    "Renderer failed to load source"
                );
                state.error = Some(message);
                state.source = None;
                state.status = SessionStatus::Failed;
            }
        }
        state.status
    }

    /// Navigation away; the session is discarded, not reused
    pub async fn close(&self) {
        // Invalidate any in-flight materialization before clearing state.
        self.next_generation();
        let mut state = self.inner.state.write().await;
        *state = SessionState::default();
    }

    fn next_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Materialize `document`, honoring "last selection wins"
    async fn materialize_as(
        &self,
        document: DocumentRecord,
        generation: u64,
    ) -> SessionStatus {
        let result = self.inner.materializer.materialize(&document).await;

        let mut state = self.inner.state.write().await;
        if self.inner.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(
                session_id = %self.inner.id,
                document_id = %document.id,
                "Discarding stale materialization result"
            );
            return state.status;
        }

        match result {
            Ok(source) => {
                tracing::debug!(
                    session_id = %self.inner.id,
                    document_id = %document.id,
                    "Source ready"
                );
                state.source = Some(source);
                state.status = SessionStatus::Ready;
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %self.inner.id,
                    document_id = %document.id,
                    error = %err,
                    "Materialization failed"
                );
                state.source = None;
                state.error = Some(err.to_string());
                state.status = SessionStatus::Failed;
            }
        }
        state.status
    }
}

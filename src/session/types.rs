//! Viewer session types and boundary events

use serde::{Deserialize, Serialize};

/// Hierarchical key handed in by the navigation shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperKey {
    pub year: String,
    pub exam_type: String,
    pub category: String,

    /// Explicit document to open; `None` auto-selects the first resolved
    /// record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

impl PaperKey {
    /// Key for a fully specified category screen
    pub fn new(
        year: impl Into<String>,
        exam_type: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            year: year.into(),
            exam_type: exam_type.into(),
            category: category.into(),
            document: None,
        }
    }

    /// Name a specific document within the key
    pub fn with_document(mut self, id: impl Into<String>) -> Self {
        self.document = Some(id.into());
        self
    }
}

/// Screen-level lifecycle of a viewer session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No document chosen
    #[default]
    Idle,

    /// Sibling list being computed
    Resolving,

    /// Resolution found nothing; terminal "no documents available" display,
    /// not an error
    Empty,

    /// A document is selected, its source is not yet ready
    AwaitingMaterialization,

    /// Source available and handed to the renderer
    Ready,

    /// A sibling was picked while ready; the previous output stays up until
    /// the new one lands
    SwitchingSelection,

    /// Materialization or load failure; recoverable by re-selecting
    Failed,
}

/// Feedback from the external PDF renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RendererEvent {
    /// The document finished loading with this many pages
    Loaded { pages: u32 },

    /// The visible page changed
    PageChanged { page: u32, pages: u32 },

    /// Terminal load failure
    LoadFailed { message: String },
}

/// Navigation the core asks the surrounding shell to perform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum NavigationRequest {
    /// Drill into a year node
    DrillYear { year: String },

    /// Drill into an exam type under a year
    DrillType { year: String, exam_type: String },

    /// Drill into a category, which opens a viewer session
    DrillCategory {
        year: String,
        exam_type: String,
        category: String,
    },

    /// Open one specific resolved document
    OpenDocument { key: PaperKey },
}

impl NavigationRequest {
    /// Request emitted when the user picks a year on the years screen
    pub fn pick_year(year: impl Into<String>) -> Self {
        Self::DrillYear { year: year.into() }
    }

    /// Request emitted when the user picks an exam type under a year
    pub fn pick_type(year: impl Into<String>, exam_type: impl Into<String>) -> Self {
        Self::DrillType {
            year: year.into(),
            exam_type: exam_type.into(),
        }
    }

    /// Request emitted when the user picks a category
    pub fn pick_category(
        year: impl Into<String>,
        exam_type: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self::DrillCategory {
            year: year.into(),
            exam_type: exam_type.into(),
            category: category.into(),
        }
    }

    /// Request emitted when navigation names one resolved document
    pub fn open(key: PaperKey) -> Self {
        Self::OpenDocument { key }
    }
}

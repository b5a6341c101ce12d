//! Catalog record types

use serde::{Deserialize, Serialize};

/// A single exam-paper document in the catalog
///
/// Constructed once at catalog build time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Unique identifier (unique across the whole catalog)
    pub id: String,

    /// Exam year, e.g. "2023"
    pub year: String,

    /// Exam type id, e.g. "prelims" or "mains"
    #[serde(rename = "type")]
    pub exam_type: String,

    /// Category id within the exam type, e.g. "gs1"
    pub category_id: String,

    /// Display title
    pub title: String,

    /// File name as originally published
    pub original_file_name: String,

    /// Renderer-safe file name; names the durable copy
    pub file_name: String,

    /// Where the document content lives
    #[serde(rename = "path")]
    pub source: SourceLocator,
}

/// Where a document's content comes from
///
/// Classified from the raw table string: `http://` and `https://` prefixes
/// mean a remote URL, anything else is a reference into the bundled asset
/// tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceLocator {
    /// Bundled-asset reference, relative to the assets root
    Asset(String),

    /// Direct URL; streamed by the renderer, never copied locally
    Remote(String),
}

impl SourceLocator {
    /// The raw locator string
    pub fn as_str(&self) -> &str {
        match self {
            SourceLocator::Asset(reference) => reference,
            SourceLocator::Remote(url) => url,
        }
    }

    /// Whether this locator points at a remote URL
    pub fn is_remote(&self) -> bool {
        matches!(self, SourceLocator::Remote(_))
    }
}

impl From<String> for SourceLocator {
    fn from(raw: String) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            SourceLocator::Remote(raw)
        } else {
            SourceLocator::Asset(raw)
        }
    }
}

impl From<SourceLocator> for String {
    fn from(locator: SourceLocator) -> Self {
        match locator {
            SourceLocator::Asset(reference) => reference,
            SourceLocator::Remote(url) => url,
        }
    }
}

/// An exam type choice at the second hierarchy level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeOption {
    pub id: String,
    pub display_name: String,
}

/// A category choice at the third hierarchy level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
}

/// Display name for an exam type id
///
/// The catalog only declares "prelims" and "mains"; any other id displays
/// as itself.
pub fn exam_type_display_name(id: &str) -> String {
    match id {
        "prelims" => "Preliminary Examination".to_string(),
        "mains" => "Main Examination".to_string(),
        other => other.to_string(),
    }
}

/// Normalize a file name so every platform renderer can open it
///
/// Mirrors the generator that produced the catalog tables: characters
/// outside `[A-Za-z0-9_.-]` become `_`, runs of `_` collapse, leading and
/// trailing `_` are trimmed, the result is lowercased.
pub fn safe_file_name(name: &str) -> String {
    let mut replaced = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '-') {
            replaced.push(c.to_ascii_lowercase());
        } else {
            replaced.push('_');
        }
    }

    let mut collapsed = String::with_capacity(replaced.len());
    let mut prev_underscore = false;
    for c in replaced.chars() {
        if c == '_' {
            if !prev_underscore {
                collapsed.push(c);
            }
            prev_underscore = true;
        } else {
            collapsed.push(c);
            prev_underscore = false;
        }
    }

    collapsed.trim_matches('_').to_string()
}

//! Catalog loading and validation
//!
//! The catalog is built from four read-only tables, loaded once at process
//! start. Everything else in the crate sees it as an injected, immutable
//! value; there is no global state.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use super::types::{safe_file_name, CategoryOption, DocumentRecord};

/// Catalog build or load failure
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate document id: {0}")]
    DuplicateDocumentId(String),

    #[error("document {0} has an empty source locator")]
    EmptyLocator(String),

    #[error("document {0} has an empty file name")]
    MissingFileName(String),
}

/// The four pre-generated tables the catalog is built from
///
/// Shapes match the generator output: `years.json`, `paper_types.json`,
/// `categories.json` (keyed by `"{year}/{type}"` with the type lowercased),
/// and the flat `papers.json` document table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogTables {
    /// Ordered list of years, as declared
    pub years: Vec<String>,

    /// Year → ordered exam type ids
    pub paper_types: HashMap<String, Vec<String>>,

    /// `"{year}/{type}"` → ordered categories
    pub categories: HashMap<String, Vec<CategoryOption>>,

    /// Flat document table
    pub papers: Vec<DocumentRecord>,
}

/// Immutable catalog of exam-paper documents
///
/// Owns the data; lookup logic lives in [`crate::resolver::Resolver`].
#[derive(Debug, Clone)]
pub struct Catalog {
    years: Vec<String>,
    types_by_year: HashMap<String, Vec<String>>,
    categories: HashMap<String, Vec<CategoryOption>>,
    documents: Vec<DocumentRecord>,
}

impl Catalog {
    /// Build a catalog from in-memory tables
    ///
    /// This is the injection point for test catalogs; [`Catalog::load`] is a
    /// file-reading wrapper around it. Validates the catalog invariants:
    /// document ids unique catalog-wide, locators and file names non-empty.
    pub fn from_tables(tables: CatalogTables) -> Result<Self, CatalogError> {
        let mut documents = tables.papers;
        let mut seen = HashSet::new();

        for record in &mut documents {
            if record.source.as_str().is_empty() {
                return Err(CatalogError::EmptyLocator(record.id.clone()));
            }
            if !seen.insert(record.id.clone()) {
                return Err(CatalogError::DuplicateDocumentId(record.id.clone()));
            }
            // The generator already emits safe names; normalize again in case
            // the tables were edited by hand.
            record.file_name = safe_file_name(&record.file_name);
            if record.file_name.is_empty() {
                return Err(CatalogError::MissingFileName(record.id.clone()));
            }
        }

        Ok(Self {
            years: tables.years,
            types_by_year: tables.paper_types,
            categories: tables.categories,
            documents,
        })
    }

    /// Load and validate the catalog from a directory of JSON tables
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let tables = CatalogTables {
            years: read_json(dir, "years.json")?,
            paper_types: read_json(dir, "paper_types.json")?,
            categories: read_json(dir, "categories.json")?,
            papers: read_json(dir, "papers.json")?,
        };

        let catalog = Self::from_tables(tables)?;
        tracing::info!(
            years = catalog.years.len(),
            documents = catalog.documents.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Ordered list of years, as declared in the catalog
    pub fn years(&self) -> &[String] {
        &self.years
    }

    /// Ordered exam type ids for a year
    pub fn types_for_year(&self, year: &str) -> Option<&[String]> {
        self.types_by_year.get(year).map(Vec::as_slice)
    }

    /// Ordered categories for a `"{year}/{type}"` key
    pub fn categories_for_key(&self, key: &str) -> Option<&[CategoryOption]> {
        self.categories.get(key).map(Vec::as_slice)
    }

    /// The flat document table, in declaration order
    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T, CatalogError> {
    let path = dir.join(file);
    let bytes = std::fs::read(&path).map_err(|source| CatalogError::Io {
        file: file.to_string(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
        file: file.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SourceLocator;

    fn record(id: &str, file_name: &str, path: &str) -> DocumentRecord {
        DocumentRecord {
            id: id.to_string(),
            year: "2023".to_string(),
            exam_type: "mains".to_string(),
            category_id: "gs1".to_string(),
            title: format!("Paper {id}"),
            original_file_name: file_name.to_string(),
            file_name: file_name.to_string(),
            source: SourceLocator::from(path.to_string()),
        }
    }

    fn tables(papers: Vec<DocumentRecord>) -> CatalogTables {
        CatalogTables {
            years: vec!["2023".to_string()],
            paper_types: HashMap::from([("2023".to_string(), vec!["mains".to_string()])]),
            categories: HashMap::from([(
                "2023/mains".to_string(),
                vec![CategoryOption {
                    id: "gs1".to_string(),
                    name: "General Studies Paper I".to_string(),
                }],
            )]),
            papers,
        }
    }

    #[test]
    fn test_from_tables_accepts_valid_catalog() {
        let catalog = Catalog::from_tables(tables(vec![
            record("a", "a.pdf", "papers/a.pdf"),
            record("b", "b.pdf", "papers/b.pdf"),
        ]))
        .unwrap();

        assert_eq!(catalog.years(), ["2023".to_string()]);
        assert_eq!(catalog.documents().len(), 2);
        assert_eq!(
            catalog.types_for_year("2023"),
            Some(["mains".to_string()].as_slice())
        );
        assert!(catalog.types_for_year("1999").is_none());
    }

    #[test]
    fn test_duplicate_document_id_rejected() {
        let err = Catalog::from_tables(tables(vec![
            record("a", "a.pdf", "papers/a.pdf"),
            record("a", "other.pdf", "papers/other.pdf"),
        ]))
        .unwrap_err();

        assert!(matches!(err, CatalogError::DuplicateDocumentId(id) if id == "a"));
    }

    #[test]
    fn test_empty_locator_rejected() {
        let err =
            Catalog::from_tables(tables(vec![record("a", "a.pdf", "")])).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyLocator(id) if id == "a"));
    }

    #[test]
    fn test_file_names_normalized_on_build() {
        let catalog = Catalog::from_tables(tables(vec![record(
            "a",
            "Hand Edited Name.PDF",
            "papers/a.pdf",
        )]))
        .unwrap();

        assert_eq!(catalog.documents()[0].file_name, "hand_edited_name.pdf");
    }

    #[test]
    fn test_load_reads_all_four_tables() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("years.json"), r#"["2023"]"#).unwrap();
        std::fs::write(
            dir.path().join("paper_types.json"),
            r#"{"2023": ["mains"]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("categories.json"),
            r#"{"2023/mains": [{"id": "gs1", "name": "General Studies Paper I"}]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("papers.json"),
            r#"[{
                "id": "2023-mains-gs1-1",
                "year": "2023",
                "type": "mains",
                "categoryId": "gs1",
                "title": "General Studies Paper I",
                "originalFileName": "General Studies Paper I.pdf",
                "fileName": "general_studies_paper_i.pdf",
                "path": "papers/2023/mains/gs1/general_studies_paper_i.pdf"
            }]"#,
        )
        .unwrap();

        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.documents().len(), 1);
        assert_eq!(
            catalog.categories_for_key("2023/mains").unwrap()[0].id,
            "gs1"
        );
    }

    #[test]
    fn test_load_missing_table_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Io { file, .. } if file == "years.json"));
    }
}

//! Pure hierarchy lookups over the catalog
//!
//! The resolver never fails: an unknown key yields an empty list, because
//! absence of data is a normal, displayable state, not a fault. Results keep
//! the catalog's declaration order; nothing here re-sorts.

use std::sync::Arc;

use crate::catalog::{
    exam_type_display_name, Catalog, CategoryOption, DocumentRecord, TypeOption,
};

/// Read-only lookup facade over an immutable [`Catalog`]
#[derive(Debug, Clone)]
pub struct Resolver {
    catalog: Arc<Catalog>,
}

impl Resolver {
    /// Create a resolver over an injected catalog
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Ordered list of years with any published papers
    pub fn years(&self) -> &[String] {
        self.catalog.years()
    }

    /// Exam types available for a year, in declaration order
    ///
    /// Unknown years yield an empty vec.
    pub fn types_for_year(&self, year: &str) -> Vec<TypeOption> {
        self.catalog
            .types_for_year(year)
            .unwrap_or_default()
            .iter()
            .map(|id| TypeOption {
                id: id.clone(),
                display_name: exam_type_display_name(id),
            })
            .collect()
    }

    /// Categories for a year and exam type, in declaration order
    ///
    /// The exam type matches case-insensitively; the table key stores it
    /// lowercased. Unknown keys yield an empty vec.
    pub fn categories_for(&self, year: &str, exam_type: &str) -> Vec<CategoryOption> {
        let key = format!("{}/{}", year, exam_type.to_ascii_lowercase());
        self.catalog
            .categories_for_key(&key)
            .map(<[CategoryOption]>::to_vec)
            .unwrap_or_default()
    }

    /// Documents for a fully specified hierarchical key
    ///
    /// Exact match on year and category, case-insensitive on exam type.
    pub fn documents_for(
        &self,
        year: &str,
        exam_type: &str,
        category: &str,
    ) -> Vec<DocumentRecord> {
        self.catalog
            .documents()
            .iter()
            .filter(|record| {
                record.year == year
                    && record.exam_type.eq_ignore_ascii_case(exam_type)
                    && record.category_id == category
            })
            .cloned()
            .collect()
    }

    /// Direct id lookup, for navigation that names a specific document
    pub fn find_document(&self, id: &str) -> Option<&DocumentRecord> {
        self.catalog.documents().iter().find(|record| record.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogTables, SourceLocator};
    use std::collections::HashMap;

    fn record(id: &str, year: &str, exam_type: &str, category: &str) -> DocumentRecord {
        DocumentRecord {
            id: id.to_string(),
            year: year.to_string(),
            exam_type: exam_type.to_string(),
            category_id: category.to_string(),
            title: format!("Paper {id}"),
            original_file_name: format!("{id}.pdf"),
            file_name: format!("{id}.pdf"),
            source: SourceLocator::Asset(format!("papers/{id}.pdf")),
        }
    }

    fn resolver() -> Resolver {
        let tables = CatalogTables {
            years: vec!["2023".to_string(), "2022".to_string()],
            paper_types: HashMap::from([
                (
                    "2023".to_string(),
                    vec!["prelims".to_string(), "mains".to_string()],
                ),
                ("2022".to_string(), vec!["mains".to_string()]),
            ]),
            categories: HashMap::from([
                (
                    "2023/mains".to_string(),
                    vec![
                        CategoryOption {
                            id: "gs1".to_string(),
                            name: "General Studies Paper I".to_string(),
                        },
                        CategoryOption {
                            id: "essay".to_string(),
                            name: "Essay".to_string(),
                        },
                    ],
                ),
                (
                    "2023/prelims".to_string(),
                    vec![CategoryOption {
                        id: "gs1".to_string(),
                        name: "General Studies Paper I".to_string(),
                    }],
                ),
            ]),
            papers: vec![
                record("m1", "2023", "mains", "gs1"),
                record("m2", "2023", "mains", "gs1"),
                record("e1", "2023", "mains", "essay"),
                record("p1", "2023", "prelims", "gs1"),
            ],
        };
        Resolver::new(Arc::new(Catalog::from_tables(tables).unwrap()))
    }

    #[test]
    fn test_years_keep_declaration_order() {
        let resolver = resolver();
        assert_eq!(resolver.years(), ["2023".to_string(), "2022".to_string()]);
    }

    #[test]
    fn test_types_carry_display_names() {
        let resolver = resolver();
        let types = resolver.types_for_year("2023");
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].id, "prelims");
        assert_eq!(types[0].display_name, "Preliminary Examination");
        assert_eq!(types[1].display_name, "Main Examination");
    }

    #[test]
    fn test_unknown_year_yields_empty_types() {
        let resolver = resolver();
        assert!(resolver.types_for_year("1999").is_empty());
    }

    #[test]
    fn test_categories_match_type_case_insensitively() {
        let resolver = resolver();
        let lower = resolver.categories_for("2023", "mains");
        let mixed = resolver.categories_for("2023", "Mains");
        assert_eq!(lower, mixed);
        assert_eq!(lower[0].id, "gs1");
        assert_eq!(lower[1].id, "essay");
    }

    #[test]
    fn test_documents_filter_is_exact_on_year_and_category() {
        let resolver = resolver();

        let documents = resolver.documents_for("2023", "MAINS", "gs1");
        assert_eq!(documents.len(), 2);
        assert!(documents.iter().all(|d| d.category_id == "gs1"));
        assert_eq!(documents[0].id, "m1");
        assert_eq!(documents[1].id, "m2");

        // Category is case-sensitive.
        assert!(resolver.documents_for("2023", "mains", "GS1").is_empty());
        // Unknown triples are empty, never an error.
        assert!(resolver.documents_for("1999", "mains", "gs1").is_empty());
    }

    #[test]
    fn test_find_document_by_id() {
        let resolver = resolver();
        assert_eq!(resolver.find_document("e1").unwrap().category_id, "essay");
        assert!(resolver.find_document("missing").is_none());
    }
}

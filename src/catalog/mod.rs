//! Exam-paper catalog
//!
//! An immutable mapping from hierarchical keys (year → exam type → category)
//! to document records, built once at process start from four pre-generated
//! JSON tables and injected into the resolver.

mod store;
mod types;

pub use store::{Catalog, CatalogError, CatalogTables};
pub use types::{
    exam_type_display_name, safe_file_name, CategoryOption, DocumentRecord, SourceLocator,
    TypeOption,
};

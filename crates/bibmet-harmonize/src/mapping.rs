//! Declarative per-source field mappings
//!
//! The mapping tables are data, not code: the built-in defaults cover the
//! standard Scopus and Web of Science export headers, and callers can load a
//! replacement from a TOML document of the form:
//!
//! ```toml
//! [scopus.columns]
//! "Authors" = "authors"
//! "Source title" = "source"
//!
//! [wos.columns]
//! "AU" = "authors"
//! "SO" = "source"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use bibmet_domain::{RawTable, SourceDb};

/// Errors that can occur when loading mapping or alias configuration.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    Parse(String),
}

/// Rename table for one source type: raw column name -> canonical column.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SourceMapping {
    pub columns: HashMap<String, String>,
}

impl SourceMapping {
    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let columns = pairs
            .iter()
            .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
            .collect();
        Self { columns }
    }

    /// Canonical column a raw column maps to, if any.
    pub fn canonical_for(&self, raw_column: &str) -> Option<&str> {
        self.columns.get(raw_column).map(String::as_str)
    }

    /// Index of the raw column carrying a canonical field in the given table.
    pub fn source_column(&self, table: &RawTable, canonical: &str) -> Option<usize> {
        table
            .columns()
            .iter()
            .position(|col| self.canonical_for(col) == Some(canonical))
    }

    /// How many of the table's columns this mapping recognizes.
    pub fn matched_columns(&self, table: &RawTable) -> usize {
        table
            .columns()
            .iter()
            .filter(|col| self.columns.contains_key(*col))
            .count()
    }
}

/// The full per-source mapping configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MappingConfig {
    pub scopus: SourceMapping,
    pub wos: SourceMapping,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            scopus: SourceMapping::from_pairs(&[
                ("Authors", "authors"),
                ("Title", "title"),
                ("Year", "year"),
                ("Source title", "source"),
                ("Cited by", "cited_by"),
                ("Author Keywords", "author_keywords"),
                ("Index Keywords", "index_keywords"),
                ("Affiliations", "affiliations"),
                ("DOI", "doi"),
                ("Abstract", "abstract"),
                ("References", "references"),
                ("Document Type", "document_type"),
                ("Country/Territory", "countries"),
            ]),
            wos: SourceMapping::from_pairs(&[
                ("AU", "authors"),
                // Full author names; used when AU is absent or empty
                ("AF", "authors_full"),
                ("TI", "title"),
                ("PY", "year"),
                ("SO", "source"),
                ("TC", "cited_by"),
                ("DE", "author_keywords"),
                ("ID", "index_keywords"),
                ("C1", "affiliations"),
                ("DI", "doi"),
                ("AB", "abstract"),
                ("CR", "references"),
                ("DT", "document_type"),
                ("CU", "countries"),
            ]),
        }
    }
}

impl MappingConfig {
    /// Parse a mapping configuration from a TOML string.
    pub fn from_toml_str(input: &str) -> Result<Self, MappingError> {
        toml::from_str(input).map_err(|e| MappingError::Parse(e.to_string()))
    }

    /// Load a mapping configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MappingError> {
        let input =
            std::fs::read_to_string(path.as_ref()).map_err(|e| MappingError::Io(e.to_string()))?;
        Self::from_toml_str(&input)
    }

    /// Mapping for a concrete export source; `Harmonized` has none.
    pub fn for_source(&self, source: SourceDb) -> Option<&SourceMapping> {
        match source {
            SourceDb::Scopus => Some(&self.scopus),
            SourceDb::Wos => Some(&self.wos),
            SourceDb::Harmonized => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scopus_mapping() {
        let config = MappingConfig::default();
        assert_eq!(config.scopus.canonical_for("Source title"), Some("source"));
        assert_eq!(config.scopus.canonical_for("Cited by"), Some("cited_by"));
        assert_eq!(config.scopus.canonical_for("Unknown"), None);
    }

    #[test]
    fn test_default_wos_mapping() {
        let config = MappingConfig::default();
        assert_eq!(config.wos.canonical_for("DE"), Some("author_keywords"));
        assert_eq!(config.wos.canonical_for("DI"), Some("doi"));
    }

    #[test]
    fn test_source_column_lookup() {
        let config = MappingConfig::default();
        let table = RawTable::new(vec!["TI".to_string(), "PY".to_string()]);
        assert_eq!(config.wos.source_column(&table, "year"), Some(1));
        assert_eq!(config.wos.source_column(&table, "doi"), None);
    }

    #[test]
    fn test_matched_columns() {
        let config = MappingConfig::default();
        let table = RawTable::new(vec![
            "Authors".to_string(),
            "Title".to_string(),
            "Custom".to_string(),
        ]);
        assert_eq!(config.scopus.matched_columns(&table), 2);
        assert_eq!(config.wos.matched_columns(&table), 0);
    }

    #[test]
    fn test_from_toml_str_overrides() {
        let toml = r#"
            [scopus.columns]
            "Titel" = "title"

            [wos.columns]
            "TI" = "title"
        "#;
        let config = MappingConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.scopus.canonical_for("Titel"), Some("title"));
        assert_eq!(config.scopus.canonical_for("Authors"), None);
    }

    #[test]
    fn test_from_toml_str_rejects_garbage() {
        assert!(matches!(
            MappingConfig::from_toml_str("not toml ["),
            Err(MappingError::Parse(_))
        ));
    }

    #[test]
    fn test_harmonized_has_no_mapping() {
        let config = MappingConfig::default();
        assert!(config.for_source(SourceDb::Harmonized).is_none());
    }
}

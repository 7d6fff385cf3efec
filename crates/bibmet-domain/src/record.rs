//! Canonical publication record

use serde::{Deserialize, Serialize};

use crate::SourceDb;

/// Canonical column set, in canonical order.
///
/// Harmonized output always carries exactly these fields regardless of which
/// raw columns an export contained.
pub const CANONICAL_COLUMNS: [&str; 14] = [
    "title",
    "authors",
    "year",
    "source",
    "document_type",
    "doi",
    "cited_by",
    "author_keywords",
    "index_keywords",
    "abstract",
    "references",
    "affiliations",
    "countries",
    "source_db",
];

/// One publication in the canonical schema.
///
/// Invariants established at harmonization time:
/// - `doi`, when non-empty, is lowercase with any resolver URL prefix removed
/// - `authors` holds no empty strings and no exact duplicates, in first-seen
///   order
/// - `author_keywords` / `index_keywords` are lowercase with duplicates
///   removed; consumers treat them as sets, the stored order is only there
///   to keep downstream output deterministic
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<i32>,
    /// Venue name (journal, proceedings)
    pub source: String,
    pub document_type: String,
    pub doi: String,
    pub cited_by: u32,
    pub author_keywords: Vec<String>,
    pub index_keywords: Vec<String>,
    pub abstract_text: String,
    /// Raw reference list as exported; not parsed further
    pub references: String,
    pub affiliations: Vec<String>,
    pub countries: Vec<String>,
    pub source_db: SourceDb,
}

impl Record {
    /// Create an empty record tagged with its source database.
    pub fn new(source_db: SourceDb) -> Self {
        Self {
            title: String::new(),
            authors: Vec::new(),
            year: None,
            source: String::new(),
            document_type: String::new(),
            doi: String::new(),
            cited_by: 0,
            author_keywords: Vec::new(),
            index_keywords: Vec::new(),
            abstract_text: String::new(),
            references: String::new(),
            affiliations: Vec::new(),
            countries: Vec::new(),
            source_db,
        }
    }

    /// First entry of the normalized author sequence, or "" if no authors.
    pub fn first_author(&self) -> &str {
        self.authors.first().map(String::as_str).unwrap_or("")
    }

    pub fn has_doi(&self) -> bool {
        !self.doi.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let record = Record::new(SourceDb::Scopus);
        assert!(record.title.is_empty());
        assert!(record.authors.is_empty());
        assert_eq!(record.year, None);
        assert_eq!(record.cited_by, 0);
        assert_eq!(record.source_db, SourceDb::Scopus);
    }

    #[test]
    fn test_first_author() {
        let mut record = Record::new(SourceDb::Wos);
        assert_eq!(record.first_author(), "");

        record.authors = vec!["Smith, J.".to_string(), "Lee, K.".to_string()];
        assert_eq!(record.first_author(), "Smith, J.");
    }

    #[test]
    fn test_has_doi() {
        let mut record = Record::new(SourceDb::Scopus);
        assert!(!record.has_doi());
        record.doi = "10.1234/test".to_string();
        assert!(record.has_doi());
    }
}

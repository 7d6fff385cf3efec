//! Two-tier identity resolution across harmonized tables
//!
//! DOI equality is the highest-confidence identity key; records without a
//! DOI fall back to the composite (title, year, first author) key. The
//! composite key deliberately includes the first author: title + year alone
//! collapses distinct papers with generic titles.

use std::collections::HashSet;

use bibmet_domain::{Record, SourceDb};

/// Merge harmonized tables into one, collapsing records that describe the
/// same publication.
///
/// Records are visited in concatenation order (table order, then row order),
/// and the first occurrence of each identity wins. Records with an empty
/// title are dropped before deduplication; they cannot be grouped
/// meaningfully. The output lists all DOI-keyed survivors before the
/// composite-keyed ones; that order is part of the contract, not an
/// artifact.
///
/// Empty input yields an empty table, never an error.
pub fn merge(tables: &[Vec<Record>]) -> Vec<Record> {
    let mut with_doi: Vec<Record> = Vec::new();
    let mut without_doi: Vec<Record> = Vec::new();
    let mut seen_dois: HashSet<String> = HashSet::new();
    let mut seen_keys: HashSet<(String, Option<i32>, String)> = HashSet::new();

    for record in tables.iter().flatten() {
        if record.title.is_empty() {
            continue;
        }
        if record.has_doi() {
            if seen_dois.insert(record.doi.clone()) {
                with_doi.push(record.clone());
            }
        } else {
            let key = (
                record.title.clone(),
                record.year,
                record.first_author().to_string(),
            );
            if seen_keys.insert(key) {
                without_doi.push(record.clone());
            }
        }
    }

    with_doi.extend(without_doi);
    with_doi
}

/// [`merge`], with every survivor relabeled [`SourceDb::Harmonized`].
///
/// Use this for the combined table handed to analytics; use plain [`merge`]
/// when per-source breakdowns still matter downstream.
pub fn merge_harmonized(tables: &[Vec<Record>]) -> Vec<Record> {
    let mut merged = merge(tables);
    for record in &mut merged {
        record.source_db = SourceDb::Harmonized;
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, doi: &str, year: Option<i32>, first_author: &str) -> Record {
        let mut r = Record::new(SourceDb::Scopus);
        r.title = title.to_string();
        r.doi = doi.to_string();
        r.year = year;
        if !first_author.is_empty() {
            r.authors = vec![first_author.to_string()];
        }
        r
    }

    #[test]
    fn test_doi_duplicates_keep_first() {
        let a = vec![record("First title", "10.1/x", Some(2020), "Smith")];
        let b = vec![record("Different title", "10.1/x", Some(2021), "Lee")];
        let merged = merge(&[a, b]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "First title");
    }

    #[test]
    fn test_composite_key_includes_first_author() {
        let rows = vec![
            record("T", "", Some(2020), "Smith"),
            record("T", "", Some(2020), "Smith"),
            record("T", "", Some(2020), "Jones"),
        ];
        let merged = merge(&[rows]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_doi_partition_comes_first() {
        let no_doi = vec![record("B", "", Some(2020), "Smith")];
        let with_doi = vec![record("A", "10.1/a", Some(2020), "Lee")];
        let merged = merge(&[no_doi, with_doi]);
        assert_eq!(merged[0].title, "A");
        assert_eq!(merged[1].title, "B");
    }

    #[test]
    fn test_untitled_records_dropped() {
        let rows = vec![record("", "10.1/x", Some(2020), "Smith")];
        assert!(merge(&[rows]).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(merge(&[]).is_empty());
        assert!(merge(&[Vec::new()]).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let rows = vec![
            record("A", "10.1/a", Some(2020), "Smith"),
            record("A", "10.1/a", Some(2020), "Smith"),
            record("B", "", Some(2021), "Lee"),
            record("B", "", Some(2021), "Lee"),
        ];
        let once = merge(&[rows]);
        let twice = merge(&[once.clone()]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_harmonized_relabels() {
        let rows = vec![record("A", "10.1/a", Some(2020), "Smith")];
        let merged = merge_harmonized(&[rows]);
        assert_eq!(merged[0].source_db, SourceDb::Harmonized);
    }

    #[test]
    fn test_missing_year_and_author_still_group() {
        let rows = vec![record("T", "", None, ""), record("T", "", None, "")];
        assert_eq!(merge(&[rows]).len(), 1);
    }
}

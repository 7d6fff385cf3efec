//! Source signature detection
//!
//! Used at the upload/loader boundary to classify an export before
//! harmonization. Ambiguous tables yield `None` and are rejected back to the
//! caller; the pipeline never guesses.

use bibmet_domain::{RawTable, SourceDb};

/// Column names that only appear in Scopus-style exports.
const SCOPUS_SIGNATURE: &[&str] = &[
    "Authors",
    "Source title",
    "Author(s) ID",
    "Cited by",
    "Affiliations",
];

/// Two-letter field tags from Web of Science exports.
const WOS_SIGNATURE: &[&str] = &["AU", "TI", "SO", "PY", "C1", "DI"];

/// Classify a raw table by its column signature.
///
/// Scopus wins when both signatures somehow match (its headers are long
/// phrases and far less likely to collide with user data than two-letter
/// tags).
pub fn detect_source(table: &RawTable) -> Option<SourceDb> {
    if SCOPUS_SIGNATURE.iter().any(|col| table.has_column(col)) {
        Some(SourceDb::Scopus)
    } else if WOS_SIGNATURE.iter().any(|col| table.has_column(col)) {
        Some(SourceDb::Wos)
    } else {
        None
    }
}

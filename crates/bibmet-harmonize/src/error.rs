//! Error types for harmonization

use bibmet_domain::SourceDb;
use thiserror::Error;

/// Result type alias for harmonization operations.
pub type Result<T> = std::result::Result<T, HarmonizeError>;

/// Table-level harmonization errors.
///
/// These surface to the immediate caller for the offending input only;
/// field-level normalization failures are absorbed (defaulted and logged)
/// and never appear here.
#[derive(Debug, Error)]
pub enum HarmonizeError {
    /// The raw table shares no columns with the claimed source's mapping.
    /// Carries a column preview so the caller can show the user what was
    /// actually in the file.
    #[error("table matches no {source_db} columns (saw: {column_preview})")]
    SchemaMismatch {
        source_db: SourceDb,
        column_preview: String,
    },

    /// No field mapping exists for the requested source tag.
    #[error("no field mapping is defined for source {0}")]
    UnmappedSource(SourceDb),
}

impl HarmonizeError {
    /// Build a `SchemaMismatch` with a bounded raw-column preview.
    pub(crate) fn schema_mismatch(source: SourceDb, columns: &[String]) -> Self {
        const PREVIEW_LIMIT: usize = 8;
        let mut preview = columns
            .iter()
            .take(PREVIEW_LIMIT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if columns.len() > PREVIEW_LIMIT {
            preview.push_str(", ...");
        }
        HarmonizeError::SchemaMismatch {
            source_db: source,
            column_preview: preview,
        }
    }
}

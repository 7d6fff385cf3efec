//! Harmonization orchestration
//!
//! Applies the field mapper and the value normalizers to a raw export table,
//! producing canonical records. Output always carries the full canonical
//! field set regardless of which raw columns were present.

use tracing::warn;

use bibmet_domain::{RawTable, Record, SourceDb};

use crate::error::{HarmonizeError, Result};
use crate::mapping::{MappingConfig, SourceMapping};
use crate::normalize::{
    normalize_authors, normalize_country, normalize_doi, normalize_keywords, split_multivalued,
    CountryAliases,
};

/// Translates raw export tables into canonical records.
///
/// Holds the per-source field mappings and the country alias table; both are
/// editable configuration with compiled-in defaults.
#[derive(Clone, Debug)]
pub struct Harmonizer {
    mappings: MappingConfig,
    aliases: CountryAliases,
}

impl Default for Harmonizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Harmonizer {
    /// Harmonizer with the built-in mapping and alias tables.
    pub fn new() -> Self {
        Self {
            mappings: MappingConfig::default(),
            aliases: CountryAliases::default(),
        }
    }

    /// Harmonizer with externally loaded configuration.
    pub fn with_config(mappings: MappingConfig, aliases: CountryAliases) -> Self {
        Self { mappings, aliases }
    }

    /// Harmonize a raw table whose source classification is already
    /// resolved.
    ///
    /// Fails with [`HarmonizeError::SchemaMismatch`] when the table shares no
    /// columns with the claimed source's mapping; an empty table with a
    /// recognized header yields an empty record list, not an error.
    pub fn harmonize(&self, table: &RawTable, source: SourceDb) -> Result<Vec<Record>> {
        let mapping = self
            .mappings
            .for_source(source)
            .ok_or(HarmonizeError::UnmappedSource(source))?;

        if mapping.matched_columns(table) == 0 {
            return Err(HarmonizeError::schema_mismatch(source, table.columns()));
        }

        let fields = FieldIndex::resolve(table, mapping);
        let records = (0..table.num_rows())
            .map(|row| self.build_record(table, &fields, row, source))
            .collect();
        Ok(records)
    }

    fn build_record(
        &self,
        table: &RawTable,
        fields: &FieldIndex,
        row: usize,
        source: SourceDb,
    ) -> Record {
        let mut record = Record::new(source);
        record.title = cell(table, row, fields.title).trim().to_string();

        // WoS exports sometimes carry only the full-name author column
        let mut authors_raw = cell(table, row, fields.authors);
        if authors_raw.trim().is_empty() {
            authors_raw = cell(table, row, fields.authors_full);
        }
        record.authors = normalize_authors(authors_raw);

        record.year = parse_year(cell(table, row, fields.year));
        record.source = cell(table, row, fields.source).trim().to_string();
        record.document_type = cell(table, row, fields.document_type).trim().to_string();
        record.doi = normalize_doi(cell(table, row, fields.doi));
        record.cited_by = parse_citations(cell(table, row, fields.cited_by));
        record.author_keywords = normalize_keywords(cell(table, row, fields.author_keywords));
        record.index_keywords = normalize_keywords(cell(table, row, fields.index_keywords));
        record.abstract_text = cell(table, row, fields.abstract_text).trim().to_string();
        record.references = cell(table, row, fields.references).trim().to_string();
        record.affiliations = split_multivalued(cell(table, row, fields.affiliations));
        record.countries = split_multivalued(cell(table, row, fields.countries))
            .iter()
            .map(|c| normalize_country(c, &self.aliases))
            .collect();
        record
    }
}

/// Cell at (row, resolved column), or "" when the column is unmapped.
fn cell<'t>(table: &'t RawTable, row: usize, col: Option<usize>) -> &'t str {
    col.and_then(|c| table.value_at(row, c)).unwrap_or("")
}

/// Resolved raw-column index per canonical field, for one table.
#[derive(Debug, Default)]
struct FieldIndex {
    title: Option<usize>,
    authors: Option<usize>,
    authors_full: Option<usize>,
    year: Option<usize>,
    source: Option<usize>,
    document_type: Option<usize>,
    doi: Option<usize>,
    cited_by: Option<usize>,
    author_keywords: Option<usize>,
    index_keywords: Option<usize>,
    abstract_text: Option<usize>,
    references: Option<usize>,
    affiliations: Option<usize>,
    countries: Option<usize>,
}

impl FieldIndex {
    fn resolve(table: &RawTable, mapping: &SourceMapping) -> Self {
        let col = |canonical: &str| mapping.source_column(table, canonical);
        Self {
            title: col("title"),
            authors: col("authors"),
            authors_full: col("authors_full"),
            year: col("year"),
            source: col("source"),
            document_type: col("document_type"),
            doi: col("doi"),
            cited_by: col("cited_by"),
            author_keywords: col("author_keywords"),
            index_keywords: col("index_keywords"),
            abstract_text: col("abstract"),
            references: col("references"),
            affiliations: col("affiliations"),
            countries: col("countries"),
        }
    }
}

/// Parse a year cell; unparseable input defaults to absent and is logged.
///
/// Accepts a float rendering like "2020.0" since spreadsheet round-trips
/// produce them.
fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    if let Ok(year) = raw.parse::<f64>() {
        if year.fract() == 0.0 {
            return Some(year as i32);
        }
    }
    warn!(value = raw, "unparseable year, defaulting to absent");
    None
}

/// Parse a citation-count cell; unparseable input defaults to zero and is
/// logged.
fn parse_citations(raw: &str) -> u32 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    if let Ok(count) = raw.parse::<u32>() {
        return count;
    }
    if let Ok(count) = raw.parse::<f64>() {
        if count >= 0.0 {
            return count as u32;
        }
    }
    warn!(value = raw, "unparseable citation count, defaulting to 0");
    0
}

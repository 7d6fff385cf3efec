//! Harmonization of bibliographic export tables
//!
//! This crate turns raw Scopus-style and Web-of-Science-style export tables
//! into canonical [`Record`](bibmet_domain::Record)s and merges the results
//! across sources:
//! - declarative per-source field mappings, overridable from TOML
//! - pure value normalizers for authors, keywords, DOIs, and country names
//! - source signature detection for the upload/loader boundary
//! - two-tier deduplication (DOI identity first, then title/year/first-author)
//!
//! All field-level cleanup is total: malformed input degrades to an empty or
//! default value and is logged, it never aborts a record. Table-level
//! problems (a table that matches no known source signature) surface as
//! typed errors to the caller.

pub mod dedupe;
pub mod detect;
pub mod error;
mod harmonizer;
pub mod mapping;
pub mod normalize;

pub use dedupe::{merge, merge_harmonized};
pub use detect::detect_source;
pub use error::{HarmonizeError, Result};
pub use harmonizer::Harmonizer;
pub use mapping::{MappingConfig, MappingError, SourceMapping};
pub use normalize::{
    normalize_authors, normalize_authors_with, normalize_country, normalize_doi,
    normalize_keywords, CountryAliases,
};

//! Value normalization for bibliographic fields
//!
//! Single point of truth for the delimiter and cleanup policy applied to
//! multi-valued cells. Every function here is total: absent or malformed
//! input maps to an empty result, never an error.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

lazy_static! {
    static ref DOI_RESOLVER: Regex = Regex::new(r"^https?://(dx\.)?doi\.org/").unwrap();
    static ref ET_AL: Regex = Regex::new(r"(?i)[\s,]*\bet\s+al\.?\s*$").unwrap();
}

/// Default author delimiters, tried in order; see [`normalize_authors_with`].
pub const AUTHOR_DELIMITERS: &[char] = &[';', '|', ','];

/// Keyword cells split on any of these.
pub const KEYWORD_DELIMITERS: &[char] = &[';', ',', '/'];

/// Noise characters stripped from keyword tokens.
const KEYWORD_NOISE: &[char] = &['[', ']', '\'', '"'];

/// Normalize an author cell with the default delimiter set.
pub fn normalize_authors(raw: &str) -> Vec<String> {
    normalize_authors_with(raw, AUTHOR_DELIMITERS)
}

/// Normalize an author cell: split, trim, strip a trailing "et al." token,
/// drop empties, and remove exact duplicates preserving first-seen order.
///
/// Delimiters are tried in the given order and the first one present in the
/// input wins, so comma-bearing names like "Smith, J." survive a
/// semicolon-delimited list instead of being split apart. A cell containing
/// none of the delimiters is a single author.
pub fn normalize_authors_with(raw: &str, delimiters: &[char]) -> Vec<String> {
    let raw = ET_AL.replace(raw, "");
    let delimiter = delimiters.iter().find(|d| raw.contains(**d));

    let parts: Vec<&str> = match delimiter {
        Some(&d) => raw.split(d).collect(),
        None => vec![raw.as_ref()],
    };

    let mut seen = Vec::new();
    for part in parts {
        let part = part.trim();
        if part.is_empty() || seen.iter().any(|s| s == part) {
            continue;
        }
        seen.push(part.to_string());
    }
    seen
}

/// Normalize a keyword cell: split on `;`, `,` or `/`, lowercase, strip
/// bracket/quote noise, drop empty and duplicate entries.
///
/// The result has set semantics; entries are kept in first-seen order only
/// so downstream output stays deterministic.
pub fn normalize_keywords(raw: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for part in raw.split(KEYWORD_DELIMITERS) {
        let cleaned: String = part
            .chars()
            .filter(|c| !KEYWORD_NOISE.contains(c))
            .collect::<String>()
            .trim()
            .to_lowercase();
        if cleaned.is_empty() || seen.iter().any(|s| s == &cleaned) {
            continue;
        }
        seen.push(cleaned);
    }
    seen
}

/// Normalize a DOI: trim, lowercase, strip a resolver URL or `doi:` prefix.
///
/// Empty input yields empty output.
pub fn normalize_doi(raw: &str) -> String {
    let mut doi = raw.trim().to_lowercase();
    doi = DOI_RESOLVER.replace(&doi, "").into_owned();
    if let Some(stripped) = doi.strip_prefix("doi:") {
        doi = stripped.trim_start().to_string();
    }
    doi
}

/// Substitution table for long-form country names.
///
/// The table is editable configuration: the built-in defaults cover the
/// aliases the supported export databases are known to emit, and callers can
/// load a replacement from TOML.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CountryAliases {
    pub aliases: HashMap<String, String>,
}

impl Default for CountryAliases {
    fn default() -> Self {
        let aliases = [
            ("United States of America", "USA"),
            ("United States", "USA"),
            ("United Kingdom", "UK"),
            ("Peoples R China", "China"),
            ("Korea South", "South Korea"),
            ("Iran Islamic Republic", "Iran"),
            ("Russian Federation", "Russia"),
            ("Viet Nam", "Vietnam"),
        ]
        .into_iter()
        .map(|(long, short)| (long.to_string(), short.to_string()))
        .collect();
        Self { aliases }
    }
}

impl CountryAliases {
    /// Parse an alias table from a TOML document of the form
    /// `[aliases]\n"United States of America" = "USA"`.
    pub fn from_toml_str(input: &str) -> Result<Self, crate::MappingError> {
        toml::from_str(input).map_err(|e| crate::MappingError::Parse(e.to_string()))
    }
}

/// Normalize a country name through the alias table; unknown names pass
/// through unchanged (trimmed).
pub fn normalize_country(raw: &str, aliases: &CountryAliases) -> String {
    let name = raw.trim();
    match aliases.aliases.get(name) {
        Some(short) => short.clone(),
        None => name.to_string(),
    }
}

/// Split a plain multi-valued cell (affiliations, countries) on semicolons,
/// trimming and dropping empty entries. Order is preserved; duplicates are
/// kept, the cell is positional data.
pub fn split_multivalued(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

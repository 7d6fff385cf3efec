//! Ranked-count series and per-year trends

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use bibmet_domain::Record;

/// Which canonical field a ranked-count series is computed over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountField {
    Authors,
    Sources,
    DocumentTypes,
    Affiliations,
    Countries,
    AuthorKeywords,
    IndexKeywords,
}

impl CountField {
    fn values<'a>(&self, record: &'a Record) -> Vec<&'a str> {
        match self {
            CountField::Authors => record.authors.iter().map(String::as_str).collect(),
            CountField::Sources => scalar(&record.source),
            CountField::DocumentTypes => scalar(&record.document_type),
            CountField::Affiliations => record.affiliations.iter().map(String::as_str).collect(),
            CountField::Countries => record.countries.iter().map(String::as_str).collect(),
            CountField::AuthorKeywords => {
                record.author_keywords.iter().map(String::as_str).collect()
            }
            CountField::IndexKeywords => record.index_keywords.iter().map(String::as_str).collect(),
        }
    }
}

fn scalar(value: &str) -> Vec<&str> {
    if value.is_empty() {
        Vec::new()
    } else {
        vec![value]
    }
}

/// Top-k entity counts for a field, sorted by count descending with ties
/// broken by label. Pass `usize::MAX` for the full series.
pub fn ranked_counts(records: &[Record], field: CountField, k: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        for value in field.values(record) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    let mut series: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    series.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    series.truncate(k);
    series
}

/// Publication and citation trend for one year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnualCount {
    pub year: i32,
    pub publications: usize,
    pub citations: u64,
    pub avg_citations: f64,
}

/// Per-year publication and citation counts, sorted by year ascending.
/// Records without a year are skipped.
pub fn annual_counts(records: &[Record]) -> Vec<AnnualCount> {
    let mut by_year: HashMap<i32, (usize, u64)> = HashMap::new();
    for record in records {
        if let Some(year) = record.year {
            let entry = by_year.entry(year).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += record.cited_by as u64;
        }
    }

    let mut series: Vec<AnnualCount> = by_year
        .into_iter()
        .map(|(year, (publications, citations))| AnnualCount {
            year,
            publications,
            citations,
            avg_citations: citations as f64 / publications as f64,
        })
        .collect();
    series.sort_by_key(|entry| entry.year);
    series
}

/// One cell of the year x keyword frequency table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeywordYearCount {
    pub year: i32,
    pub keyword: String,
    pub count: usize,
}

/// Year-wise frequencies of the overall top-k author keywords, for thematic
/// evolution mapping. Records outside the optional year bounds (inclusive)
/// or without a year are skipped. Output is sorted by (year, keyword).
pub fn keyword_evolution(
    records: &[Record],
    min_year: Option<i32>,
    max_year: Option<i32>,
    top_k: usize,
) -> Vec<KeywordYearCount> {
    let mut cells: HashMap<(i32, &str), usize> = HashMap::new();
    let mut totals: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let Some(year) = record.year else { continue };
        if min_year.is_some_and(|lo| year < lo) || max_year.is_some_and(|hi| year > hi) {
            continue;
        }
        for keyword in &record.author_keywords {
            *cells.entry((year, keyword)).or_insert(0) += 1;
            *totals.entry(keyword).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(top_k);
    let keep: Vec<&str> = ranked.into_iter().map(|(keyword, _)| keyword).collect();

    let mut table: Vec<KeywordYearCount> = cells
        .into_iter()
        .filter(|((_, keyword), _)| keep.contains(keyword))
        .map(|((year, keyword), count)| KeywordYearCount {
            year,
            keyword: keyword.to_string(),
            count,
        })
        .collect();
    table.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.keyword.cmp(&b.keyword)));
    table
}

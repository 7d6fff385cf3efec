//! Impact metrics and dataset diagnostics

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use bibmet_domain::Record;

/// Key bibliometric indicators for a record table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImpactMetrics {
    pub total_publications: usize,
    pub total_citations: u64,
    pub mean_citations: f64,
    pub median_citations: f64,
    /// Largest h such that h records have at least h citations each.
    pub h_index: u32,
    pub unique_authors: usize,
}

impl ImpactMetrics {
    pub fn from_records(records: &[Record]) -> Self {
        if records.is_empty() {
            return Self {
                total_publications: 0,
                total_citations: 0,
                mean_citations: 0.0,
                median_citations: 0.0,
                h_index: 0,
                unique_authors: 0,
            };
        }

        let mut citations: Vec<u32> = records.iter().map(|r| r.cited_by).collect();
        citations.sort_unstable_by(|a, b| b.cmp(a));

        let total: u64 = citations.iter().map(|&c| c as u64).sum();
        let n = citations.len();
        let median = if n % 2 == 0 {
            (citations[n / 2 - 1] as f64 + citations[n / 2] as f64) / 2.0
        } else {
            citations[n / 2] as f64
        };

        let h_index = citations
            .iter()
            .enumerate()
            .take_while(|&(rank, &cited)| cited as usize >= rank + 1)
            .count() as u32;

        let authors: HashSet<&str> = records
            .iter()
            .flat_map(|r| r.authors.iter().map(String::as_str))
            .collect();

        Self {
            total_publications: n,
            total_citations: total,
            mean_citations: total as f64 / n as f64,
            median_citations: median,
            h_index,
            unique_authors: authors.len(),
        }
    }

    /// Metric name -> value pairs for the analytics boundary.
    pub fn to_pairs(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("total_publications", self.total_publications as f64),
            ("total_citations", self.total_citations as f64),
            ("mean_citations", self.mean_citations),
            ("median_citations", self.median_citations),
            ("h_index", self.h_index as f64),
            ("unique_authors", self.unique_authors as f64),
        ]
    }
}

/// Diagnostic overview of a record table, for per-file reporting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub records_total: usize,
    pub records_with_doi: usize,
    pub unique_titles: usize,
    pub missing_year: usize,
    /// (first, latest) publication year over records that have one.
    pub year_range: Option<(i32, i32)>,
    /// Record count per source database tag.
    pub source_breakdown: BTreeMap<String, usize>,
}

impl DatasetSummary {
    pub fn from_records(records: &[Record]) -> Self {
        let mut titles: HashSet<&str> = HashSet::new();
        let mut breakdown: BTreeMap<String, usize> = BTreeMap::new();
        let mut with_doi = 0;
        let mut missing_year = 0;
        let mut year_range: Option<(i32, i32)> = None;

        for record in records {
            titles.insert(&record.title);
            *breakdown.entry(record.source_db.to_string()).or_insert(0) += 1;
            if record.has_doi() {
                with_doi += 1;
            }
            match record.year {
                Some(year) => {
                    year_range = Some(match year_range {
                        Some((lo, hi)) => (lo.min(year), hi.max(year)),
                        None => (year, year),
                    });
                }
                None => missing_year += 1,
            }
        }

        Self {
            records_total: records.len(),
            records_with_doi: with_doi,
            unique_titles: titles.len(),
            missing_year,
            year_range,
            source_breakdown: breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibmet_domain::SourceDb;

    fn record(cited_by: u32, year: Option<i32>, doi: &str, source_db: SourceDb) -> Record {
        let mut r = Record::new(source_db);
        r.title = format!("paper-{cited_by}");
        r.cited_by = cited_by;
        r.year = year;
        r.doi = doi.to_string();
        r
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = ImpactMetrics::from_records(&[]);
        assert_eq!(metrics.total_publications, 0);
        assert_eq!(metrics.h_index, 0);
        assert_eq!(metrics.mean_citations, 0.0);
    }

    #[test]
    fn test_h_index() {
        // Citations 10, 8, 5, 4, 3: h = 4 (four papers with >= 4 citations)
        let records: Vec<Record> = [10, 8, 5, 4, 3]
            .iter()
            .map(|&c| record(c, Some(2020), "", SourceDb::Scopus))
            .collect();
        let metrics = ImpactMetrics::from_records(&records);
        assert_eq!(metrics.h_index, 4);
        assert_eq!(metrics.total_citations, 30);
        assert_eq!(metrics.mean_citations, 6.0);
        assert_eq!(metrics.median_citations, 5.0);
    }

    #[test]
    fn test_unique_authors() {
        let mut a = record(1, Some(2020), "", SourceDb::Scopus);
        a.authors = vec!["Smith, J.".to_string(), "Lee, K.".to_string()];
        let mut b = record(2, Some(2021), "", SourceDb::Scopus);
        b.authors = vec!["Smith, J.".to_string()];
        let metrics = ImpactMetrics::from_records(&[a, b]);
        assert_eq!(metrics.unique_authors, 2);
    }

    #[test]
    fn test_to_pairs_names() {
        let metrics = ImpactMetrics::from_records(&[]);
        let names: Vec<&str> = metrics.to_pairs().iter().map(|(n, _)| *n).collect();
        assert!(names.contains(&"h_index"));
        assert!(names.contains(&"total_citations"));
    }

    #[test]
    fn test_dataset_summary() {
        let records = vec![
            record(1, Some(2019), "10.1/a", SourceDb::Scopus),
            record(2, Some(2022), "", SourceDb::Wos),
            record(3, None, "10.1/b", SourceDb::Scopus),
        ];
        let summary = DatasetSummary::from_records(&records);
        assert_eq!(summary.records_total, 3);
        assert_eq!(summary.records_with_doi, 2);
        assert_eq!(summary.unique_titles, 3);
        assert_eq!(summary.missing_year, 1);
        assert_eq!(summary.year_range, Some((2019, 2022)));
        assert_eq!(summary.source_breakdown["Scopus"], 2);
        assert_eq!(summary.source_breakdown["WoS"], 1);
    }

    #[test]
    fn test_dataset_summary_empty() {
        let summary = DatasetSummary::from_records(&[]);
        assert_eq!(summary.records_total, 0);
        assert_eq!(summary.year_range, None);
        assert!(summary.source_breakdown.is_empty());
    }
}

//! Descriptive analytics over canonical record tables
//!
//! Everything here is a pure summary of an in-memory table: impact metrics
//! (citation aggregates, h-index approximation), dataset diagnostics,
//! ranked-count series for any canonical field, and per-year trends. Empty
//! input degrades to empty or zero-valued results; nothing in this crate
//! fails.

pub mod counts;
pub mod metrics;

pub use counts::{annual_counts, keyword_evolution, ranked_counts, AnnualCount, CountField, KeywordYearCount};
pub use metrics::{DatasetSummary, ImpactMetrics};

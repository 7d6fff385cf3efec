//! Untyped raw table as produced by export-file loaders
//!
//! Column sets vary per export and per database version, so the raw layer is
//! string-typed; the field mapper is responsible for turning rows into
//! canonical [`Record`](crate::Record)s.

use serde::{Deserialize, Serialize};

/// A named-column table of string cells.
///
/// Rows are padded or truncated to the header width on insertion, so every
/// stored row has exactly one cell per column.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create an empty table with the given column headers.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a table from headers and rows in one step.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell value at (row, column name), if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    /// Cell value at (row, column index), if both exist.
    pub fn value_at(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RawTable {
        RawTable::from_rows(
            vec!["Title".to_string(), "Year".to_string()],
            vec![
                vec!["Paper A".to_string(), "2020".to_string()],
                vec!["Paper B".to_string()],
            ],
        )
    }

    #[test]
    fn test_rows_padded_to_header_width() {
        let t = table();
        assert_eq!(t.num_rows(), 2);
        assert_eq!(t.value(1, "Year"), Some(""));
    }

    #[test]
    fn test_value_lookup() {
        let t = table();
        assert_eq!(t.value(0, "Title"), Some("Paper A"));
        assert_eq!(t.value(0, "Missing"), None);
        assert_eq!(t.value(5, "Title"), None);
    }

    #[test]
    fn test_column_index() {
        let t = table();
        assert_eq!(t.column_index("Year"), Some(1));
        assert!(!t.has_column("DOI"));
    }

    #[test]
    fn test_truncates_long_rows() {
        let mut t = RawTable::new(vec!["A".to_string()]);
        t.push_row(vec!["x".to_string(), "extra".to_string()]);
        assert_eq!(t.value(0, "A"), Some("x"));
        assert_eq!(t.num_columns(), 1);
    }
}

//! CSV/TSV export file reader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use bibmet_domain::RawTable;

use crate::{IoError, IoResult};

/// Reader options for delimiter-separated files.
#[derive(Clone, Copy, Debug)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Accept rows whose cell count differs from the header; short rows are
    /// padded, long rows truncated. Database exports are ragged often
    /// enough that strict mode mostly rejects real files.
    pub flexible: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            flexible: true,
        }
    }
}

impl CsvOptions {
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }
}

/// Read a comma-separated export file into a raw table.
pub fn read_table(path: impl AsRef<Path>) -> IoResult<RawTable> {
    read_table_with(path, CsvOptions::default())
}

/// Read a delimiter-separated export file into a raw table.
pub fn read_table_with(path: impl AsRef<Path>, options: CsvOptions) -> IoResult<RawTable> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
    read_table_from(BufReader::new(file), options)
}

/// Read a raw table from any byte source (an extracted archive member, an
/// upload buffer).
pub fn read_table_from<R: Read>(reader: R, options: CsvOptions) -> IoResult<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(options.flexible)
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| IoError::InvalidFormat(e.to_string()))?;
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(IoError::MissingHeader);
    }
    let columns: Vec<String> = headers.iter().map(str::to_string).collect();

    let mut table = RawTable::new(columns);
    for record in csv_reader.records() {
        let record = record.map_err(|e| IoError::InvalidFormat(e.to_string()))?;
        table.push_row(record.iter().map(str::to_string).collect());
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "scopus.csv",
            "Title,Authors,Year\n\"Paper A\",\"Smith, J.\",2020\n",
        );
        let table = read_table(&path).unwrap();
        assert_eq!(table.columns(), ["Title", "Authors", "Year"]);
        assert_eq!(table.num_rows(), 1);
        assert_eq!(table.value(0, "Authors"), Some("Smith, J."));
    }

    #[test]
    fn test_read_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "wos.tsv", "AU\tTI\tPY\nSmith, J.\tPaper A\t2020\n");
        let table = read_table_with(&path, CsvOptions::tsv()).unwrap();
        assert_eq!(table.columns(), ["AU", "TI", "PY"]);
        assert_eq!(table.value(0, "TI"), Some("Paper A"));
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "ragged.csv", "A,B,C\n1,2\n1,2,3,4\n");
        let table = read_table(&path).unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.value(0, "C"), Some(""));
        assert_eq!(table.value(1, "C"), Some("3"));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_table("/no/such/file.csv"),
            Err(IoError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let result = read_table_from(std::io::Cursor::new(""), CsvOptions::default());
        assert!(matches!(result, Err(IoError::MissingHeader)));
    }
}

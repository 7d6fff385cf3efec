//! Raw export table loading
//!
//! Reads delimiter-separated export files into
//! [`RawTable`](bibmet_domain::RawTable)s for the harmonization pipeline.
//! Encoding detection, XLSX conversion, and archive extraction are the
//! calling application's concern; this crate is the seam those collaborators
//! feed.

mod csv_reader;

pub use csv_reader::{read_table, read_table_from, read_table_with, CsvOptions};

use thiserror::Error;

/// Result type alias for loader operations.
pub type IoResult<T> = std::result::Result<T, IoError>;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("failed to open file: {0}")]
    OpenFailed(String),

    #[error("invalid table format: {0}")]
    InvalidFormat(String),

    #[error("file contains no header row")]
    MissingHeader,
}

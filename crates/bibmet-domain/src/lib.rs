//! Canonical domain types shared across the bibmet crates
//!
//! This crate provides the unified publication schema every supported
//! bibliographic export is mapped into:
//! - Record: one publication in the canonical schema
//! - SourceDb: which export family a record came from
//! - RawTable: an untyped named-column table as handed over by file loaders

pub mod raw;
pub mod record;
pub mod source;

pub use raw::RawTable;
pub use record::{Record, CANONICAL_COLUMNS};
pub use source::SourceDb;

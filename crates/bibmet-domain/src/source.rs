//! Source database tags

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which export family a record came from.
///
/// `Harmonized` marks records that survived the cross-source merge and no
/// longer belong to a single export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceDb {
    Scopus,
    Wos,
    Harmonized,
}

impl SourceDb {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceDb::Scopus => "Scopus",
            SourceDb::Wos => "WoS",
            SourceDb::Harmonized => "Harmonized",
        }
    }
}

impl fmt::Display for SourceDb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

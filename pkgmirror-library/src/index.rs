use crate::{
    constants::{fields, ARCHIVE_EXTENSION},
    description::value_after,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// One `(name, version)` record of the remote package index.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub version: String,
}

impl IndexEntry {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// `<name>_<version>`, the stem of the package's source archive.
    pub fn archive_identifier(&self) -> String {
        format!("{}_{}", self.name, self.version)
    }

    pub fn archive_file_name(&self) -> String {
        format!("{}.{ARCHIVE_EXTENSION}", self.archive_identifier())
    }
}

impl Display for IndexEntry {
    fn fmt(&self, formatter: &mut Formatter) -> FmtResult {
        write!(formatter, "{}", self.archive_identifier())
    }
}

/// Splits the index listing into records.
///
/// A `Package: ` line opens a record and the next `Version: ` line closes it.
/// A version seen without an open record produces an entry with an empty name.
pub fn parse_index(text: &str) -> Vec<IndexEntry> {
    let mut entries = Vec::new();
    let mut open_name: Option<String> = None;

    for line in text.lines() {
        if let Some(name) = value_after(line, fields::PACKAGE) {
            open_name = Some(name.to_string());
        }
        if let Some(version) = value_after(line, fields::VERSION) {
            entries.push(IndexEntry::new(
                open_name.take().unwrap_or_default(),
                version,
            ));
        }
    }
    entries
}

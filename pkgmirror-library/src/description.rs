use crate::constants::fields;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::str::from_utf8;

/// Metadata scraped from a package's `DESCRIPTION` file.
///
/// Fields missing from the source text are left empty.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PackageDescription {
    pub name: String,
    pub version: String,
    pub published_date: String,
    pub title: String,
    pub description: String,
    pub authors: String,
    pub maintainers: String,
}

enum Field {
    Name,
    Version,
    Title,
    Description,
    PublishedDate,
    Authors,
    Maintainers,
}

// Order matters: a line is claimed by the first prefix it contains.
const FIELD_PREFIXES: [(&str, Field); 7] = [
    (fields::PACKAGE, Field::Name),
    (fields::VERSION, Field::Version),
    (fields::TITLE, Field::Title),
    (fields::DESCRIPTION, Field::Description),
    (fields::PUBLICATION_DATE, Field::PublishedDate),
    (fields::AUTHOR, Field::Authors),
    (fields::MAINTAINER, Field::Maintainers),
];

/// Returns the text following the first occurrence of `prefix` in `line`.
pub fn value_after<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.find(prefix).map(|position| &line[position + prefix.len()..])
}

impl PackageDescription {
    /// Scrapes `Key: value` lines. Keys are matched anywhere in the line and a
    /// repeated key overwrites the earlier value.
    pub fn parse(text: &str) -> Self {
        let mut description = Self::default();
        for line in text.lines() {
            let matched = FIELD_PREFIXES
                .iter()
                .find_map(|(prefix, field)| value_after(line, prefix).map(|value| (field, value)));
            if let Some((field, value)) = matched {
                description.set(field, value.to_string());
            }
        }
        description
    }

    pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::parse(from_utf8(bytes)?))
    }

    fn set(&mut self, field: &Field, value: String) {
        let target = match field {
            Field::Name => &mut self.name,
            Field::Version => &mut self.version,
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::PublishedDate => &mut self.published_date,
            Field::Authors => &mut self.authors,
            Field::Maintainers => &mut self.maintainers,
        };
        *target = value;
    }
}

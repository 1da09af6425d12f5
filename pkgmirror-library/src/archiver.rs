use crate::{constants::DESCRIPTION_FILE, description::PackageDescription};
use anyhow::{anyhow, Result};
use flate2::read::MultiGzDecoder;
use std::io::Read;
use tar::Archive;

/// Walks a gzip-compressed tarball and returns the content of the first entry
/// whose path contains `needle`.
pub fn extract_member(reader: impl Read, needle: &str) -> Result<Vec<u8>> {
    let mut archive = Archive::new(MultiGzDecoder::new(reader));
    for entry in archive.entries()? {
        let mut entry = entry?;
        if entry.path()?.to_string_lossy().contains(needle) {
            let mut buffer = Vec::new();
            entry.read_to_end(&mut buffer)?;
            return Ok(buffer);
        }
    }

    Err(anyhow!("No archive member matching {needle} found"))
}

pub fn extract_description(archive_bytes: &[u8]) -> Result<Vec<u8>> {
    extract_member(archive_bytes, DESCRIPTION_FILE)
}

/// Extracts and parses the `DESCRIPTION` file of a package archive.
pub fn read_description(archive_bytes: &[u8]) -> Result<PackageDescription> {
    let description_bytes = extract_description(archive_bytes)?;
    PackageDescription::parse_bytes(&description_bytes)
}

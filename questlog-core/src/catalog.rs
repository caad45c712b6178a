use std::path::Path;

use crate::entry::CatalogEntry;
use crate::error::CatalogError;

/// Read the catalog CSV from a file path.
pub fn read_catalog(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    parse_catalog(&contents)
}

/// Parse catalog CSV content from a string.
///
/// The first row is a header. Columns are positional:
/// name, status, platform, and an optional notes column. Rows with fewer than
/// three fields or an empty name are dropped without error.
pub fn parse_catalog(content: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut entries = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::debug!("Skipping unreadable catalog row: {e}");
                continue;
            }
        };

        if record.len() < 3 {
            continue;
        }

        let get = |i: usize| record.get(i).unwrap_or("").to_string();
        let name = get(0);
        if name.is_empty() {
            continue;
        }

        entries.push(CatalogEntry::new(name, get(1), get(2)).with_notes(get(3)));
    }

    Ok(entries)
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;

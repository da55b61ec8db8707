// src/bibliography/enrich.rs
use crate::bibliography::models::{BibEntry, Bibliography, ADDRESS_FIELD, BOOKTITLE_FIELD};
use crate::extractors::address::{extract_address_from_booktitle, ExtractedAddress};
use crate::utils::error::ExtractError;
use serde::Serialize;

/// Only proceedings papers get an address inferred from their booktitle.
const ENRICHED_ENTRY_TYPE: &str = "inproceedings";

/// Counts gathered while enriching a bibliography.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AddressReport {
    pub total: usize,
    pub present: usize,
    pub found: usize,
    pub not_found: usize,
    pub skipped: usize, // Entries of another type
}

impl AddressReport {
    pub fn log_summary(&self) {
        tracing::info!("Present address in {} entries (out of {})", self.present, self.total);
        tracing::info!("Updated {} entries (out of {})", self.found, self.total);
        tracing::info!("Not found {} entries (out of {})", self.not_found, self.total);
    }
}

/// Runs the extractor on the entry's booktitle, if it has one.
pub fn extract_address(entry: &BibEntry) -> Result<ExtractedAddress, ExtractError> {
    match entry.field(BOOKTITLE_FIELD) {
        Some(booktitle) => extract_address_from_booktitle(booktitle),
        None => Err(ExtractError::NoBookTitle),
    }
}

/// Fills in `address` (and strips it from `booktitle`) for every
/// proceedings entry that does not have one yet. Entries are either fully
/// updated or left untouched.
pub fn add_address(bib: &mut Bibliography) -> AddressReport {
    let mut report = AddressReport {
        total: bib.len(),
        ..Default::default()
    };

    for entry in bib.entries.iter_mut() {
        if !entry.is_type(ENRICHED_ENTRY_TYPE) {
            report.skipped += 1;
            continue;
        }

        if entry.has_nonempty(ADDRESS_FIELD) {
            tracing::debug!("{} already has an address", entry.key);
            report.present += 1;
            continue;
        }

        match extract_address(entry) {
            Ok(found) => {
                let (address, booktitle) = found.into_pair();
                tracing::debug!("{}: address = {}", entry.key, address);
                entry.set_field(ADDRESS_FIELD, &address);
                entry.set_field(BOOKTITLE_FIELD, &booktitle);
                report.found += 1;
            }
            Err(e) => {
                tracing::info!("No address found for {}: {}", entry.key, e);
                report.not_found += 1;
            }
        }
    }

    report
}

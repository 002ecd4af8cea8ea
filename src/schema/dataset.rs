// src/schema/dataset.rs

use chrono::NaiveDate;

use super::types::{CountryRecord, Dataset, Metadata};

pub const TITLE: &str = "ISO 3166-3: Formerly Used Country Codes";
pub const DESCRIPTION: &str = "Codes for country names which have been deleted from ISO 3166-1 since its first publication in 1974";
pub const STANDARD: &str = "ISO 3166-3";

impl Dataset {
    /// Wrap normalized records with run metadata. `generated` drives the
    /// `version` and `last_updated` fields and nothing else.
    pub fn build(countries: Vec<CountryRecord>, source: &str, generated: NaiveDate) -> Self {
        Dataset {
            metadata: Metadata {
                title: TITLE.to_string(),
                description: DESCRIPTION.to_string(),
                source: source.to_string(),
                standard: STANDARD.to_string(),
                version: generated.format("%Y-%m").to_string(),
                total_records: countries.len(),
                last_updated: generated.format("%Y-%m-%d").to_string(),
            },
            countries,
        }
    }
}

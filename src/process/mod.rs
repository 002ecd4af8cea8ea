// src/process/mod.rs

pub mod codes;
pub mod period;
pub mod raw_table;
pub mod record;
pub mod successors;
pub mod transition;
pub mod utils;

use tracing::{debug, instrument, warn};

use crate::schema::CountryRecord;
pub use raw_table::RawRow;

/// A row that could not be normalized, by its 0-based position in the table.
#[derive(Debug)]
pub struct RowFailure {
    pub index: usize,
    pub error: anyhow::Error,
}

impl std::fmt::Display for RowFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {:#}", self.index, self.error)
    }
}

#[derive(Debug, Default)]
pub struct ProcessOutcome {
    /// Normalized rows, in table order.
    pub records: Vec<CountryRecord>,
    pub failures: Vec<RowFailure>,
}

/// Normalize every row independently. A failing row is logged, recorded
/// and skipped; it never stops the rest.
#[instrument(level = "info", skip(rows), fields(rows = rows.len()))]
pub fn process_rows(rows: &[RawRow]) -> ProcessOutcome {
    let mut outcome = ProcessOutcome::default();

    for (index, row) in rows.iter().enumerate() {
        match record::assemble(row) {
            Ok(rec) => {
                debug!(index, name = %rec.former_country.name, kind = %rec.transition.kind, "normalized row");
                outcome.records.push(rec);
            }
            Err(error) => {
                warn!(index, error = %error, "skipping row");
                outcome.failures.push(RowFailure { index, error });
            }
        }
    }

    outcome
}

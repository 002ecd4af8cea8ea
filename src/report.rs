// src/report.rs

use std::{collections::BTreeMap, fmt};

use crate::process::RowFailure;
use crate::schema::Dataset;

/// How many row failures are listed before the rest are only counted.
pub const SHOWN_FAILURES: usize = 5;

const RULE_WIDTH: usize = 70;

/// Frequency tables printed after a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    /// transition type → count, sorted by type name
    pub transitions: BTreeMap<String, usize>,
    /// "1970s" style decade of the start year → count
    pub decades: BTreeMap<String, usize>,
}

impl Summary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut summary = Summary {
            total: dataset.metadata.total_records,
            ..Default::default()
        };

        for country in &dataset.countries {
            *summary
                .transitions
                .entry(country.transition.kind.to_string())
                .or_default() += 1;

            if let Some(start) = country.validity_period.start.filter(|y| *y != 0) {
                *summary.decades.entry(decade_label(start)).or_default() += 1;
            }
        }
        summary
    }
}

/// First three characters of the year followed by "0s": 1974 → "1970s".
pub fn decade_label(year: i32) -> String {
    let digits = year.to_string();
    let head: String = digits.chars().take(3).collect();
    format!("{}0s", head)
}

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", rule())?;
        writeln!(f, "SUMMARY")?;
        writeln!(f, "{}", rule())?;
        writeln!(f, "Total countries: {}", self.total)?;

        writeln!(f, "\nTransition types:")?;
        for (kind, count) in &self.transitions {
            writeln!(f, "  {}: {}", kind, count)?;
        }

        writeln!(f, "\nBy decade (start year):")?;
        for (decade, count) in &self.decades {
            writeln!(f, "  {}: {}", decade, count)?;
        }
        Ok(())
    }
}

/// Lines describing row failures: a header, then the first few.
pub fn failure_lines(failures: &[RowFailure]) -> Vec<String> {
    if failures.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!(
        "⚠ Encountered {} errors during processing:",
        failures.len()
    )];
    lines.extend(
        failures
            .iter()
            .take(SHOWN_FAILURES)
            .map(|failure| format!("  - {}", failure)),
    );
    lines
}

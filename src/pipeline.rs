// src/pipeline.rs

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use crate::{
    config::Config,
    fetch,
    process::{self, RawRow, RowFailure},
    schema::Dataset,
};

/// Result of one scrape: the dataset plus rows that were skipped.
#[derive(Debug)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub failures: Vec<RowFailure>,
}

/// Normalize already-extracted rows into a dataset.
pub fn build_dataset(rows: &[RawRow], source: &str, generated: NaiveDate) -> RunOutput {
    let outcome = process::process_rows(rows);
    info!(
        records = outcome.records.len(),
        failures = outcome.failures.len(),
        "processed rows"
    );
    RunOutput {
        dataset: Dataset::build(outcome.records, source, generated),
        failures: outcome.failures,
    }
}

/// Locate the table in `html` and normalize it.
pub fn normalize_page(html: &str, source: &str, generated: NaiveDate) -> Result<RunOutput> {
    let rows = fetch::extract_rows(html).context("locating the ISO 3166-3 table")?;
    Ok(build_dataset(&rows, source, generated))
}

/// Fetch the source page and normalize it. Any network failure is fatal.
pub async fn scrape(config: &Config, generated: NaiveDate) -> Result<RunOutput> {
    let client = fetch::build_client(config)?;
    let html = fetch::fetch_page(&client, &config.source_url).await?;
    normalize_page(&html, &config.source_url, generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Summary;
    use crate::schema::TransitionType;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,iso3166scraper=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    const PAGE: &str = r#"<html><body>
<table class="infobox"><tr><td>not this one</td></tr></table>
<table class="wikitable sortable">
<tbody>
<tr><th>Former country name</th><th>Former codes</th><th>Period of validity</th>
<th>ISO 3166-3 code</th><th>New country names and codes</th></tr>
<tr><td>Netherlands Antilles<sup>[note 1]</sup></td><td>AN, ANT, 530</td><td>1974–2010</td>
<td>ANHH</td><td>Divided into:<br>Curaçao (CW, CUW, 531)<br>Sint Maarten (Dutch part) (SX, SXM, 534)</td></tr>
<tr><td>Zanzibar</td><td>ZZ, ZZZ, 000</td><td>1964-1964</td>
<td>nan</td><td>Merged into Tanzania</td></tr>
<tr><td>Canton and Enderbury Islands</td><td></td><td>1974–1984</td>
<td>CTKI</td><td>Joined Kiribati</td></tr>
</tbody>
</table>
</body></html>"#;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn end_to_end_synthetic_table() -> Result<()> {
        init_test_logging();
        let out = normalize_page(PAGE, "https://example.org", date(1))?;
        let ds = &out.dataset;

        assert!(out.failures.is_empty());
        assert_eq!(ds.countries.len(), 3);
        assert_eq!(ds.metadata.total_records, 3);

        let antilles = &ds.countries[0];
        assert_eq!(antilles.former_country.name, "Netherlands Antilles");
        assert_eq!(antilles.transition.kind, TransitionType::Divided);
        assert_eq!(antilles.transition.successors.len(), 2);
        assert_eq!(
            antilles.transition.successors[1].name,
            "Sint Maarten (Dutch part)"
        );

        let zanzibar = &ds.countries[1];
        assert_eq!(zanzibar.transition.kind, TransitionType::Merged);
        assert!(zanzibar.transition.successors.is_empty());
        assert_eq!(zanzibar.former_country.legacy_code, None);

        let canton = &ds.countries[2];
        assert_eq!(canton.former_country.alpha2, None);
        assert_eq!(canton.former_country.alpha3, None);
        assert_eq!(canton.former_country.numeric, None);
        assert_eq!(canton.validity_period.end, Some(1984));

        let summary = Summary::from_dataset(ds);
        assert_eq!(summary.transitions.len(), 3);
        assert_eq!(summary.transitions["divided"], 1);
        assert_eq!(summary.transitions["merged"], 1);
        assert_eq!(summary.transitions["other"], 1);
        assert_eq!(summary.decades["1970s"], 2);
        assert_eq!(summary.decades["1960s"], 1);
        Ok(())
    }

    #[test]
    fn normalization_is_repeatable() -> Result<()> {
        let rows = fetch::extract_rows(PAGE)?;

        let first = build_dataset(&rows, "src", date(1)).dataset;
        let again = build_dataset(&rows, "src", date(1)).dataset;
        assert_eq!(
            serde_json::to_string_pretty(&first)?,
            serde_json::to_string_pretty(&again)?
        );

        // another day only moves the generation stamps
        let mut later = build_dataset(&rows, "src", date(30)).dataset;
        assert_ne!(later.metadata.last_updated, first.metadata.last_updated);
        later.metadata.version = first.metadata.version.clone();
        later.metadata.last_updated = first.metadata.last_updated.clone();
        assert_eq!(
            serde_json::to_string_pretty(&first)?,
            serde_json::to_string_pretty(&later)?
        );
        Ok(())
    }

    #[test]
    fn nameless_rows_are_kept() -> Result<()> {
        let page = r#"<table class="sortable">
<tr><th>Former country name</th><th>Former codes</th><th>New country names and codes</th></tr>
<tr><td></td><td>AA, AAA, 001</td><td>Merged into Y</td></tr>
<tr><td>Upper Volta</td><td>HV, HVO, 854</td><td>Name changed to Burkina Faso (BF, BFA, 854)</td></tr>
</table>"#;
        let out = normalize_page(page, "src", date(1))?;
        assert!(out.failures.is_empty());
        assert_eq!(out.dataset.metadata.total_records, 2);
        assert_eq!(out.dataset.countries[0].former_country.name, "");
        assert_eq!(
            out.dataset.countries[0].transition.kind,
            TransitionType::Merged
        );
        Ok(())
    }

    #[test]
    fn blank_rows_do_not_stop_the_run() -> Result<()> {
        let page = r#"<table class="sortable">
<tr><th>Former country name</th><th>Former codes</th></tr>
<tr><td> </td><td></td></tr>
<tr><td>Upper Volta</td><td>HV, HVO, 854</td></tr>
</table>"#;
        let out = normalize_page(page, "src", date(1))?;
        assert_eq!(out.dataset.countries.len(), 1);
        assert_eq!(out.failures.len(), 1);
        assert_eq!(out.failures[0].index, 0);
        Ok(())
    }

    #[test]
    fn page_without_tables_is_fatal() {
        assert!(normalize_page("<p>gone</p>", "src", date(1)).is_err());
    }
}

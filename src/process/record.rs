use anyhow::{bail, Result};

use super::{
    codes::parse_former_codes, period::parse_period, raw_table::RawRow,
    successors::parse_successors, transition::classify, utils::clean_name,
};
use crate::schema::{CountryRecord, FormerCountry, Transition};

pub const COL_FORMER_NAME: &str = "Former country name";
pub const COL_FORMER_CODES: &str = "Former codes";
pub const COL_PERIOD: &str = "Period of validity";
pub const COL_WITHDRAWAL_CODE: &str = "ISO 3166-3 code";
pub const COL_NEW_NAMES: &str = "New country names and codes";

/// Text the source uses for an empty cell.
const MISSING_PLACEHOLDER: &str = "nan";

/// Build one `CountryRecord` from a table row.
///
/// Fails only when every cell of the row is blank. A row with other
/// data but no former country name is kept with an empty name.
pub fn assemble(row: &RawRow) -> Result<CountryRecord> {
    if row.is_empty() {
        bail!("row has no filled cells");
    }
    let name = clean_name(row.get(COL_FORMER_NAME));

    let codes = parse_former_codes(row.get(COL_FORMER_CODES));
    let description = row.get(COL_NEW_NAMES);

    let legacy_code = row
        .get(COL_WITHDRAWAL_CODE)
        .map(str::trim)
        .filter(|code| !code.is_empty() && *code != MISSING_PLACEHOLDER)
        .map(str::to_string);

    Ok(CountryRecord {
        former_country: FormerCountry {
            name,
            alpha2: codes.alpha2,
            alpha3: codes.alpha3,
            numeric: codes.numeric,
            legacy_code,
        },
        validity_period: parse_period(row.get(COL_PERIOD)),
        transition: Transition {
            kind: classify(description),
            successors: parse_successors(description),
        },
    })
}

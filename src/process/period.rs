use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::ValidityPeriod;

/// Four digits, an en-dash or hyphen, four digits.
static YEAR_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4})[–-]([0-9]{4})").expect("year range regex should compile"));

/// Pull the first `YYYY–YYYY` range out of `raw`.
///
/// Neither the order of the years nor their plausibility is checked.
pub fn parse_period(raw: Option<&str>) -> ValidityPeriod {
    let Some(caps) = raw.and_then(|s| YEAR_RANGE.captures(s.trim())) else {
        return ValidityPeriod::default();
    };

    match (caps[1].parse::<i32>(), caps[2].parse::<i32>()) {
        (Ok(start), Ok(end)) => ValidityPeriod {
            start: Some(start),
            end: Some(end),
        },
        _ => ValidityPeriod::default(),
    }
}

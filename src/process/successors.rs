use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::utils::{clean_name, strip_notes};
use crate::schema::Successor;

/// `(AA, BBB, 123)`: alpha-2, alpha-2/3, 3-4 digit numeric.
static CODE_TRIPLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(([A-Z]{2}),\s*([A-Z]{2,3}),\s*([0-9]{3,4})\)")
        .expect("code triplet regex should compile")
});

static LEADING_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:Divided into:|Split into:)\s*").expect("keyword regex should compile")
});

static TRAILING_CODES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\([A-Z]{2}.*?\)").expect("trailing code regex should compile")
});

/// Names Wikipedia writes as "X, Republic of"; checked in this order.
static INCOMPLETE_SUFFIXES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    ["Republic of", "Democratic Republic of the"]
        .into_iter()
        .map(|suffix| {
            let re = Regex::new(&format!(r"([\w\s]+,?\s*{})", regex::escape(suffix)))
                .expect("incomplete name regex should compile");
            (suffix, re)
        })
        .collect()
});

/// Only names up to this many characters are considered truncated.
const MAX_REPAIR_LEN: usize = 25;
const MIN_NAME_LEN: usize = 3;

/// Extract successor countries from a transition description.
///
/// Code triplets anchor the split: the name of each successor is whatever
/// sits between the previous triplet and its own, so names that carry
/// their own parentheses ("Sint Maarten (Dutch part)") come through whole.
/// Candidates that clean down to fewer than three characters are dropped.
pub fn parse_successors(raw: Option<&str>) -> Vec<Successor> {
    let Some(description) = raw else {
        return Vec::new();
    };

    let mut successors = Vec::new();
    let mut name_start = 0;

    for caps in CODE_TRIPLET.captures_iter(description) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let slice = description[name_start..whole.start()].trim();
        name_start = whole.end();

        let slice = LEADING_KEYWORD.replace(slice, "");
        let slice = strip_notes(&slice);
        let name = clean_name(Some(slice.trim()));

        if name.chars().count() < MIN_NAME_LEN {
            trace!(candidate = %name, "skipping successor noise");
            continue;
        }

        successors.push(Successor {
            name: repair_incomplete_name(name, description),
            alpha2: caps[1].to_string(),
            alpha3: caps[2].to_string(),
            numeric: caps[3].to_string(),
        });
    }

    successors
}

/// Recover names cut down to "…Republic of" by searching the full
/// description for the longest `<words>, Republic of` phrase.
pub fn repair_incomplete_name(name: String, description: &str) -> String {
    if name.is_empty() || name.chars().count() > MAX_REPAIR_LEN {
        return name;
    }

    for (suffix, pattern) in INCOMPLETE_SUFFIXES.iter() {
        if !name.ends_with(suffix) {
            continue;
        }
        if let Some(found) = pattern.captures(description).and_then(|c| c.get(1)) {
            let full = TRAILING_CODES.replace_all(found.as_str(), "");
            trace!(from = %name, to = %full.trim(), "repaired incomplete name");
            return full.trim().to_string();
        }
        return name;
    }

    name
}

// src/schema/types.rs

use serde::{Deserialize, Serialize};

/// The withdrawn country as it stood before the transition.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq)]
pub struct FormerCountry {
    pub name: String,
    pub alpha2: Option<String>,
    pub alpha3: Option<String>,
    pub numeric: Option<String>,
    /// Four-letter ISO 3166-3 withdrawal code.
    #[serde(rename = "iso_3166_3_alpha4")]
    pub legacy_code: Option<String>,
}

/// Years the former code was in use. `start <= end` is not checked.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Eq, Default)]
pub struct ValidityPeriod {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    Merged,
    NameChanged,
    Divided,
    Other,
}

impl TransitionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionType::Merged => "merged",
            TransitionType::NameChanged => "name_changed",
            TransitionType::Divided => "divided",
            TransitionType::Other => "other",
        }
    }
}

impl std::fmt::Display for TransitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A country that took over from the former one, with its full code triplet.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq)]
pub struct Successor {
    pub name: String,
    pub alpha2: String,
    pub alpha3: String,
    pub numeric: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq)]
pub struct Transition {
    #[serde(rename = "type")]
    pub kind: TransitionType,
    pub successors: Vec<Successor>,
}

/// One normalized table row.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq)]
pub struct CountryRecord {
    pub former_country: FormerCountry,
    pub validity_period: ValidityPeriod,
    pub transition: Transition,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub source: String,
    pub standard: String,
    /// `YYYY-MM` of the run.
    pub version: String,
    pub total_records: usize,
    /// `YYYY-MM-DD` of the run.
    pub last_updated: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq)]
pub struct Dataset {
    pub metadata: Metadata,
    pub countries: Vec<CountryRecord>,
}

// src/config.rs

use std::{path::PathBuf, time::Duration};

/// Page carrying the ISO 3166-3 table.
pub const SOURCE_URL: &str = "https://en.wikipedia.org/wiki/ISO_3166-3";

/// Wikipedia serves a trimmed page to unknown clients, so we pose as a desktop browser.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub const DEFAULT_OUTPUT: &str = "iso_3166_3_cleaned.json";

/// Fixed run settings. There are no flags or config files; this only
/// gathers the constants in one place so tests can point elsewhere.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: SOURCE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: REQUEST_TIMEOUT,
            output_path: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

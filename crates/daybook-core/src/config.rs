//! Process-wide book configuration.
//!
//! The configuration (decimal places, currency and date formats, numbering
//! rules) is fetched once at startup and then only ever read. It is an
//! explicit value passed by reference to whatever needs it; there is no
//! module-level singleton.

use crate::Precision;
use serde::{Deserialize, Serialize};

/// How entry numbers are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Numbering {
    /// The server assigns a number when the entry is left blank.
    #[default]
    Auto,
    /// The operator must supply a number on every entry.
    Manual,
}

/// Configuration for a set of books, populated once from the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookConfig {
    /// Decimal places monetary amounts are kept at.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Currency symbol used when formatting amounts.
    #[serde(default)]
    pub currency_symbol: String,
    /// strftime-style date format used for display and CSV import.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Entry numbering rule.
    #[serde(default)]
    pub numbering: Numbering,
}

const fn default_decimal_places() -> u32 {
    2
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            decimal_places: default_decimal_places(),
            currency_symbol: String::new(),
            date_format: default_date_format(),
            numbering: Numbering::Auto,
        }
    }
}

impl BookConfig {
    /// The fixed-point precision derived from `decimal_places`.
    #[must_use]
    pub const fn precision(&self) -> Precision {
        Precision::new(self.decimal_places)
    }
}

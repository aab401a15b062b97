//! The debit/credit side of a posting.
//!
//! Every monetary figure in the system carries a [`Dc`] side instead of a
//! sign. Amounts are always non-negative; which side of the ledger they land
//! on is expressed separately, matching the wire format of the accounting API
//! (`"D"` / `"C"`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which side of the double-entry ledger an amount applies to.
///
/// # Examples
///
/// ```
/// use daybook_core::Dc;
///
/// assert_eq!(Dc::Debit.opposite(), Dc::Credit);
/// assert_eq!("c".parse::<Dc>().unwrap(), Dc::Credit);
/// assert_eq!(serde_json::to_string(&Dc::Debit).unwrap(), "\"D\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dc {
    /// The debit side (`"D"` on the wire).
    #[serde(rename = "D")]
    Debit,
    /// The credit side (`"C"` on the wire).
    #[serde(rename = "C")]
    Credit,
}

impl Dc {
    /// Get the other side.
    ///
    /// Used by the entry editor to pre-select the side of the next line,
    /// alternating D → C → D as the operator adds lines.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }

    /// The single-letter wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "D",
            Self::Credit => "C",
        }
    }
}

impl fmt::Display for Dc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a recognizable debit/credit marker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid debit/credit indicator: {0:?}")]
pub struct ParseDcError(pub String);

impl FromStr for Dc {
    type Err = ParseDcError;

    /// Parse a side indicator leniently, as found in imported CSV files.
    ///
    /// Accepts `"D"`/`"C"` in any case with surrounding whitespace. Anything
    /// else, including an empty string, is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "D" | "d" => Ok(Self::Debit),
            "C" | "c" => Ok(Self::Credit),
            other => Err(ParseDcError(other.to_string())),
        }
    }
}

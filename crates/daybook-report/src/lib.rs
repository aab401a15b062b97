//! Report rendering support for daybook.
//!
//! The remote API computes every report figure; this crate turns the nested
//! account trees it returns into flat, ordered row sequences the UI can
//! render directly:
//!
//! - [`flatten`] / [`flatten_for_side`] - a lazy, restartable iterator over
//!   indented display rows, with side-mismatch flagging for balance-sheet
//!   columns
//! - [`TrialBalanceReport`], [`BalanceSheetReport`], [`ProfitLossReport`] -
//!   the report envelopes and their section totaling rules

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod flatten;
pub mod statements;

pub use flatten::{flatten, flatten_for_side, FlattenedRows, Row};
pub use statements::{
    BalanceSheetReport, OpeningDifference, ProfitLossReport, TrialBalanceReport,
};

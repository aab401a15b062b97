//! Entry composition for daybook.
//!
//! This crate implements the client-side half of the balanced double-entry
//! invariant:
//!
//! - [`LineEditor`] - the ordered posting-line collection an operator builds,
//!   with debit/credit alternation on the pending line
//! - [`compute_totals`] - debit and credit totals plus the signed difference,
//!   recomputed through fixed-point arithmetic after every change
//! - [`validate_draft`] - the coded submission gate; an entry with any
//!   error-severity finding never produces a payload
//! - [`to_payload`] - serialization of a clean draft to the wire shape
//!
//! The balance check here is a mandatory UX gate that saves a round-trip for
//! obviously broken entries; the server independently enforces the same
//! invariant and remains authoritative.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod check;
pub mod editor;
pub mod hydrate;
pub mod payload;
pub mod totals;

pub use check::{
    has_errors, validate_draft, CheckCode, CheckError, LedgerDirectory, Severity,
};
pub use editor::{EditorError, LineEditor, NewLine};
pub use hydrate::hydrate_draft;
pub use payload::to_payload;
pub use totals::{compute_totals, Totals};

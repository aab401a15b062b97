//! Core types for daybook
//!
//! This crate provides the fundamental types used throughout the daybook project:
//!
//! - [`Dc`] - The debit/credit side of a posting
//! - [`Precision`] - Fixed-point arithmetic on monetary values
//! - [`AccountNode`] - A node in the chart-of-accounts report tree
//! - [`PostingLine`] / [`EntryDraft`] - A journal entry under composition
//! - [`BookConfig`] - Process-wide configuration, constructed once and passed by reference
//! - [`CapabilitySet`] - Session capabilities resolved once at sign-in
//!
//! # Example
//!
//! ```
//! use daybook_core::{Dc, Precision};
//!
//! let p = Precision::new(2);
//!
//! // Binary floating point alone drifts; the fixed-point fold does not.
//! let total = (0..1000).fold(0.0, |acc, _| p.add(acc, 0.1));
//! assert_eq!(total, 100.0);
//!
//! assert_eq!(Dc::Debit.opposite(), Dc::Credit);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod access;
pub mod account;
pub mod config;
pub mod dc;
pub mod entry;
pub mod fixed;

pub use access::CapabilitySet;
pub use account::{AccountNode, NodeKind, TreeError};
pub use config::{BookConfig, Numbering};
pub use dc::{Dc, ParseDcError};
pub use entry::{
    EntryDraft, EntryPayload, FetchedEntry, FetchedItem, ItemPayload, LedgerOption, LedgerRef,
    PostingLine, TagRef,
};
pub use fixed::Precision;

// Re-export commonly used external types
pub use chrono::NaiveDate;

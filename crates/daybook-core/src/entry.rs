//! Journal entries under composition and their wire representations.
//!
//! An [`EntryDraft`] is the aggregate an operator builds before submission:
//! header fields plus an ordered collection of [`PostingLine`]s. Once the
//! draft passes validation it is serialized to an [`EntryPayload`] and handed
//! to the API as a single atomic create-or-update call. Fetched entries come
//! back as [`FetchedEntry`] and are hydrated into a fresh draft for editing;
//! submitted lines are never mutated in place.

use crate::Dc;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A resolved reference to a ledger, as selected in the entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRef {
    /// Ledger identifier.
    pub id: String,
    /// Display label shown to the operator.
    pub label: String,
}

impl LedgerRef {
    /// Create a ledger reference.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A classification tag applied to a whole entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    /// Tag identifier.
    pub id: String,
    /// Tag title.
    pub title: String,
}

/// One ledger in the lookup list the entry form offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerOption {
    /// Ledger identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Disabled ledgers stay visible but must not receive new postings.
    #[serde(default)]
    pub disabled: bool,
}

/// One debit or credit leg of a journal entry.
///
/// The amount is a non-negative decimal; the side is carried separately.
/// Duplicate ledger references across lines are permitted (split
/// transactions) and are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingLine {
    /// Debit or credit.
    pub dc: Dc,
    /// The ledger this leg posts to.
    pub ledger: LedgerRef,
    /// Non-negative amount.
    pub amount: f64,
    /// Free-text narration for this leg.
    #[serde(default)]
    pub narration: String,
}

impl PostingLine {
    /// Create a posting line.
    #[must_use]
    pub fn new(dc: Dc, ledger: LedgerRef, amount: f64, narration: impl Into<String>) -> Self {
        Self {
            dc,
            ledger,
            amount,
            narration: narration.into(),
        }
    }
}

/// A journal entry being composed, before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Entry number; left blank for system assignment when numbering is
    /// automatic.
    pub number: Option<String>,
    /// Entry date.
    pub date: NaiveDate,
    /// Classification tag; required before submission.
    pub tag: Option<TagRef>,
    /// Ordered posting lines.
    pub lines: Vec<PostingLine>,
    /// Free-text notes for the whole entry.
    #[serde(default)]
    pub notes: String,
}

impl EntryDraft {
    /// Create an empty draft dated `date`.
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            number: None,
            date,
            tag: None,
            lines: Vec::new(),
            notes: String::new(),
        }
    }
}

/// The exact submission payload shape the API expects.
///
/// ```json
/// {
///   "number": null,
///   "date": "2025-01-05",
///   "tag_id": "t1",
///   "items": [{ "dc": "D", "ledger_id": "7", "amount": 500.0, "narration": "" }],
///   "notes": ""
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryPayload {
    /// Entry number, or `null` for system assignment.
    pub number: Option<String>,
    /// Entry date as an ISO calendar date.
    pub date: NaiveDate,
    /// Identifier of the classification tag.
    pub tag_id: String,
    /// The posting legs.
    pub items: Vec<ItemPayload>,
    /// Free-text notes.
    pub notes: String,
}

/// One posting leg in the submission payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    /// Debit or credit.
    pub dc: Dc,
    /// Resolved ledger identifier.
    pub ledger_id: String,
    /// Amount, quantized to the book precision.
    pub amount: f64,
    /// Free-text narration.
    pub narration: String,
}

/// An entry as returned by the API when editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedEntry {
    /// Entry identifier.
    pub id: String,
    /// Assigned entry number.
    pub number: Option<String>,
    /// Entry date.
    pub date: NaiveDate,
    /// Classification tag identifier.
    pub tag_id: String,
    /// The posting legs.
    pub items: Vec<FetchedItem>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

/// One posting leg of a fetched entry.
///
/// Carries the ledger's display name so a draft can still be hydrated when
/// the ledger no longer appears in the lookup list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedItem {
    /// Debit or credit.
    pub dc: Dc,
    /// Ledger identifier.
    pub ledger_id: String,
    /// Ledger display name at fetch time.
    #[serde(default)]
    pub ledger_name: String,
    /// Amount.
    pub amount: f64,
    /// Free-text narration.
    #[serde(default)]
    pub narration: String,
}

//! Draft entry validation.
//!
//! This module gates the submit action: a draft with any error-severity
//! finding must not be serialized or sent. The check exists to avoid a
//! round-trip for obviously broken entries; the server enforces the same
//! rules authoritatively and nothing here assumes otherwise.
//!
//! # Check Codes
//!
//! | Code | Description |
//! |------|-------------|
//! | V1001 | Classification tag missing |
//! | V1002 | Entry has no posting lines |
//! | V1003 | Entry number required under manual numbering |
//! | V1101 | Line references an unknown ledger |
//! | V1102 | Line references a disabled ledger |
//! | V1103 | Line amount not strictly positive |
//! | V2001 | Debits and credits do not balance |
//! | V3001 | Entry dated in the future (warning) |

use chrono::{Local, NaiveDate};
use daybook_core::{BookConfig, EntryDraft, LedgerOption, Numbering};
use std::collections::HashMap;
use thiserror::Error;

use crate::totals::compute_totals;

/// Validation check codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckCode {
    // === Structural checks (V1xxx) ===
    /// V1001: Classification tag missing.
    MissingTag,
    /// V1002: Entry has no posting lines.
    NoLines,
    /// V1003: Entry number required under manual numbering.
    MissingNumber,
    /// V1101: Line references a ledger not in the directory.
    UnknownLedger,
    /// V1102: Line references a disabled ledger.
    DisabledLedger,
    /// V1103: Line amount is not strictly positive at the book precision.
    NonPositiveAmount,

    // === Balance checks (V2xxx) ===
    /// V2001: Debit and credit totals differ.
    Unbalanced,

    // === Date checks (V3xxx) ===
    /// V3001: Entry dated in the future (warning).
    FutureDate,
}

impl CheckCode {
    /// Get the check code string (e.g., "V1001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingTag => "V1001",
            Self::NoLines => "V1002",
            Self::MissingNumber => "V1003",
            Self::UnknownLedger => "V1101",
            Self::DisabledLedger => "V1102",
            Self::NonPositiveAmount => "V1103",
            Self::Unbalanced => "V2001",
            Self::FutureDate => "V3001",
        }
    }

    /// Check if this finding is advisory rather than blocking.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::FutureDate)
    }

    /// Get the severity level.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        if self.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        }
    }
}

impl std::fmt::Display for CheckCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Submission is blocked.
    Error,
    /// Suspicious but submittable.
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[{code}] {message}")]
pub struct CheckError {
    /// Check code.
    pub code: CheckCode,
    /// Human-readable message, placed next to the offending control.
    pub message: String,
    /// Zero-based index of the offending line, for per-line findings.
    pub line: Option<usize>,
}

impl CheckError {
    /// Create a finding against the entry as a whole.
    #[must_use]
    pub fn new(code: CheckCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            line: None,
        }
    }

    /// Create a finding against one posting line.
    #[must_use]
    pub fn on_line(code: CheckCode, message: impl Into<String>, line: usize) -> Self {
        Self {
            code,
            message: message.into(),
            line: Some(line),
        }
    }
}

/// Check whether a set of findings blocks submission.
#[must_use]
pub fn has_errors(findings: &[CheckError]) -> bool {
    findings
        .iter()
        .any(|f| f.code.severity() == Severity::Error)
}

/// The ledger lookup list, indexed by identifier.
///
/// Built once from the ledger-list endpoint and consulted by the validator;
/// a line must resolve to a known, non-disabled ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerDirectory {
    by_id: HashMap<String, LedgerOption>,
}

impl LedgerDirectory {
    /// Build a directory from the lookup list.
    #[must_use]
    pub fn new(options: Vec<LedgerOption>) -> Self {
        Self {
            by_id: options.into_iter().map(|o| (o.id.clone(), o)).collect(),
        }
    }

    /// Look up a ledger by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LedgerOption> {
        self.by_id.get(id)
    }

    /// Look up a ledger by display name. Used by CSV import, where rows
    /// carry codes rather than identifiers.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&LedgerOption> {
        self.by_id.values().find(|o| o.name == name)
    }
}

/// Validate a draft entry against the book configuration and the ledger
/// directory, using today's local date for the future-date check.
#[must_use]
pub fn validate_draft(
    draft: &EntryDraft,
    config: &BookConfig,
    directory: &LedgerDirectory,
) -> Vec<CheckError> {
    validate_draft_at(draft, config, directory, Local::now().date_naive())
}

/// [`validate_draft`] with an explicit "today", so tests are deterministic.
#[must_use]
pub fn validate_draft_at(
    draft: &EntryDraft,
    config: &BookConfig,
    directory: &LedgerDirectory,
    today: NaiveDate,
) -> Vec<CheckError> {
    let mut findings = Vec::new();
    let precision = config.precision();

    if draft.tag.is_none() {
        findings.push(CheckError::new(CheckCode::MissingTag, "Tag is required"));
    }

    if config.numbering == Numbering::Manual
        && draft.number.as_deref().unwrap_or("").trim().is_empty()
    {
        findings.push(CheckError::new(
            CheckCode::MissingNumber,
            "Entry number is required",
        ));
    }

    if draft.lines.is_empty() {
        findings.push(CheckError::new(
            CheckCode::NoLines,
            "At least one posting line is required",
        ));
    }

    for (index, line) in draft.lines.iter().enumerate() {
        match directory.get(&line.ledger.id) {
            None => findings.push(CheckError::on_line(
                CheckCode::UnknownLedger,
                format!("Ledger {:?} is not known", line.ledger.label),
                index,
            )),
            Some(option) if option.disabled => findings.push(CheckError::on_line(
                CheckCode::DisabledLedger,
                format!("Ledger {:?} is disabled", option.name),
                index,
            )),
            Some(_) => {}
        }

        if !precision.is_positive(line.amount) {
            findings.push(CheckError::on_line(
                CheckCode::NonPositiveAmount,
                format!("Amount {} must be positive", line.amount),
                index,
            ));
        }
    }

    // Balance check only makes sense once there are lines at all.
    if !draft.lines.is_empty() {
        let totals = compute_totals(&draft.lines, precision);
        if !totals.balanced {
            let side = totals.heavier_side().map_or("", |dc| dc.as_str());
            findings.push(CheckError::new(
                CheckCode::Unbalanced,
                format!(
                    "Entry is out of balance by {:.places$} {side}",
                    totals.difference.abs(),
                    places = precision.places() as usize,
                ),
            ));
        }
    }

    if draft.date > today {
        findings.push(CheckError::new(
            CheckCode::FutureDate,
            format!("Entry is dated in the future ({})", draft.date),
        ));
    }

    findings
}

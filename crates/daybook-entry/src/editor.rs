//! The ordered posting-line collection an operator builds incrementally.

use daybook_core::{Dc, LedgerRef, PostingLine};
use thiserror::Error;

/// The in-progress line the operator is filling in.
///
/// The side is always pre-selected; ledger and amount start empty and must
/// be supplied before the line can be confirmed into the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLine {
    /// Pre-selected side for this line.
    pub dc: Dc,
    /// Chosen ledger, if any yet.
    pub ledger: Option<LedgerRef>,
    /// Entered amount, if any yet.
    pub amount: Option<f64>,
    /// Narration text.
    pub narration: String,
}

impl NewLine {
    /// A blank pending line with the given side pre-selected.
    #[must_use]
    pub fn with_side(dc: Dc) -> Self {
        Self {
            dc,
            ledger: None,
            amount: None,
            narration: String::new(),
        }
    }
}

/// Errors from mutating the line collection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// The pending line has no ledger selected.
    #[error("select a ledger before adding the line")]
    MissingLedger,
    /// The pending line has no amount entered.
    #[error("enter an amount before adding the line")]
    MissingAmount,
    /// Removal index does not name an existing line.
    #[error("no line at position {index} (collection has {len})")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// Current number of lines.
        len: usize,
    },
}

/// Holds the ordered posting lines of a draft plus the pending new line,
/// alternating the suggested side (D → C → D …) to speed data entry.
///
/// # Examples
///
/// ```
/// use daybook_core::{Dc, LedgerRef};
/// use daybook_entry::LineEditor;
///
/// let mut editor = LineEditor::new();
/// editor.pending_mut().ledger = Some(LedgerRef::new("7", "Cash"));
/// editor.pending_mut().amount = Some(500.00);
/// editor.add_line().unwrap();
///
/// // The next line is pre-selected on the opposite side.
/// assert_eq!(editor.pending().dc, Dc::Credit);
/// assert_eq!(editor.lines().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LineEditor {
    lines: Vec<PostingLine>,
    pending: NewLine,
}

impl LineEditor {
    /// An empty collection with a debit line pending, the default for a
    /// fresh entry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            pending: NewLine::with_side(Dc::Debit),
        }
    }

    /// Rebuild an editor from already-confirmed lines, as when editing a
    /// fetched entry. The pending side continues the alternation from the
    /// last line.
    #[must_use]
    pub fn from_lines(lines: Vec<PostingLine>) -> Self {
        let next = lines.last().map_or(Dc::Debit, |line| line.dc.opposite());
        Self {
            lines,
            pending: NewLine::with_side(next),
        }
    }

    /// The confirmed lines, in entry order.
    #[must_use]
    pub fn lines(&self) -> &[PostingLine] {
        &self.lines
    }

    /// Consume the editor, yielding the confirmed lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<PostingLine> {
        self.lines
    }

    /// The pending new line.
    #[must_use]
    pub fn pending(&self) -> &NewLine {
        &self.pending
    }

    /// Mutable access to the pending new line, for filling in its fields.
    pub fn pending_mut(&mut self) -> &mut NewLine {
        &mut self.pending
    }

    /// Confirm the pending line into the collection.
    ///
    /// Fails without touching the collection when the ledger or amount is
    /// missing. On success the pending line is reset blank with the opposite
    /// side pre-selected. Duplicate ledger references across lines are
    /// permitted and never merged.
    pub fn add_line(&mut self) -> Result<(), EditorError> {
        let ledger = self
            .pending
            .ledger
            .clone()
            .ok_or(EditorError::MissingLedger)?;
        let amount = self.pending.amount.ok_or(EditorError::MissingAmount)?;

        let dc = self.pending.dc;
        self.lines.push(PostingLine::new(
            dc,
            ledger,
            amount,
            std::mem::take(&mut self.pending.narration),
        ));
        self.pending = NewLine::with_side(dc.opposite());
        Ok(())
    }

    /// Remove the line at `index`, returning it.
    ///
    /// An out-of-range index is an error and leaves the collection intact.
    pub fn remove_line(&mut self, index: usize) -> Result<PostingLine, EditorError> {
        if index >= self.lines.len() {
            return Err(EditorError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}

//! Hydrating a fetched entry back into an editable draft.

use daybook_core::{EntryDraft, FetchedEntry, LedgerRef, PostingLine, TagRef};

use crate::check::LedgerDirectory;

/// Build a fresh [`EntryDraft`] from an entry fetched for editing.
///
/// Ledger labels are taken from the current lookup directory when the ledger
/// is still listed; otherwise the display name captured at fetch time is
/// kept, so old entries stay readable even after a ledger is renamed or
/// removed. The tag is matched against the current tag list; an unknown tag
/// id leaves the field unset for the operator to re-select.
#[must_use]
pub fn hydrate_draft(
    entry: FetchedEntry,
    tags: &[TagRef],
    directory: &LedgerDirectory,
) -> EntryDraft {
    let tag = tags.iter().find(|t| t.id == entry.tag_id).cloned();

    let lines = entry
        .items
        .into_iter()
        .map(|item| {
            let label = directory
                .get(&item.ledger_id)
                .map_or(item.ledger_name, |option| option.name.clone());
            PostingLine::new(
                item.dc,
                LedgerRef::new(item.ledger_id, label),
                item.amount,
                item.narration,
            )
        })
        .collect();

    EntryDraft {
        number: entry.number,
        date: entry.date,
        tag,
        lines,
        notes: entry.notes,
    }
}

//! Serialization of a validated draft to the submission payload.

use daybook_core::{BookConfig, EntryDraft, EntryPayload, ItemPayload};

use crate::check::{has_errors, validate_draft, CheckError, LedgerDirectory};

/// Validate `draft` and, if nothing blocks submission, serialize it to the
/// wire payload.
///
/// Amounts are quantized to the book precision and the entry date is carried
/// as an ISO calendar date. The caller hands the payload to the API as a
/// single atomic create-or-update call; a failed call is reported to the
/// operator and never retried automatically, so the draft must be kept
/// around until the call succeeds.
pub fn to_payload(
    draft: &EntryDraft,
    config: &BookConfig,
    directory: &LedgerDirectory,
) -> Result<EntryPayload, Vec<CheckError>> {
    let findings = validate_draft(draft, config, directory);
    if has_errors(&findings) {
        return Err(findings);
    }

    let precision = config.precision();
    let number = draft
        .number
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(ToString::to_string);

    Ok(EntryPayload {
        number,
        date: draft.date,
        // has_errors ruled out a missing tag
        tag_id: draft.tag.as_ref().map(|t| t.id.clone()).unwrap_or_default(),
        items: draft
            .lines
            .iter()
            .map(|line| ItemPayload {
                dc: line.dc,
                ledger_id: line.ledger.id.clone(),
                amount: precision.quantize(line.amount),
                narration: line.narration.clone(),
            })
            .collect(),
        notes: draft.notes.clone(),
    })
}

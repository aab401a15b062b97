//! Reading, grouping and validating CSV rows into journal entries.
//!
//! A file-level failure (unreadable file, ragged record) halts the import.
//! Everything after that point is reported per logical entry: one group with
//! a bad date or an unbalanced pair of legs becomes an [`ImportIssue`] while
//! every other group still lands in [`ImportResult::entries`].

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use daybook_core::{Dc, EntryPayload, ItemPayload, LedgerRef, PostingLine, Precision};
use daybook_entry::{compute_totals, LedgerDirectory};
use thiserror::Error;

use crate::mapping::FieldMapping;

/// A file-level import failure. Row-level problems never surface here; they
/// are collected as [`ImportIssue`]s instead.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be read or parsed as CSV.
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    /// A mapped column is absent from the file's header row.
    #[error("mapped column {name:?} not found in the CSV header")]
    MissingColumn {
        /// The missing header name.
        name: String,
    },
}

/// One posting leg extracted from a CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedItem {
    /// Ledger code as it appeared in the file; resolved to an id later.
    pub ledger_code: String,
    /// Debit or credit.
    pub dc: Dc,
    /// Amount, quantized to the import precision.
    pub amount: f64,
    /// Item-level narration.
    pub narration: String,
    /// Reconciliation date, when mapped and present.
    pub reconciliation_date: Option<NaiveDate>,
}

/// One logical entry assembled from a group of CSV rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedEntry {
    /// The group reference: the shared entry number, or a synthetic row
    /// reference for rows without one.
    pub reference: String,
    /// Entry number carried through to submission, when the file had one.
    pub number: Option<String>,
    /// Entry date.
    pub date: NaiveDate,
    /// Entry type identifier.
    pub entry_type: String,
    /// Classification tag identifier, when mapped.
    pub tag: Option<String>,
    /// Entry-level narration.
    pub narration: String,
    /// The posting legs, in file order.
    pub items: Vec<ImportedItem>,
}

/// Failure to resolve an imported entry's ledger codes for submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No ledger in the directory carries this code.
    #[error("unknown ledger code {0:?}")]
    UnknownLedger(String),
    /// The code resolved to a ledger that must not receive new postings.
    #[error("ledger {0:?} is disabled")]
    DisabledLedger(String),
}

impl ImportedEntry {
    /// Resolve each item's ledger code against the lookup directory and
    /// shape the entry as a submission payload. CSV rows carry ledger names,
    /// not identifiers; an unknown or disabled code fails the whole entry.
    pub fn resolve_payload(&self, directory: &LedgerDirectory) -> Result<EntryPayload, ResolveError> {
        let items = self
            .items
            .iter()
            .map(|item| {
                let option = directory
                    .find_by_name(&item.ledger_code)
                    .ok_or_else(|| ResolveError::UnknownLedger(item.ledger_code.clone()))?;
                if option.disabled {
                    return Err(ResolveError::DisabledLedger(item.ledger_code.clone()));
                }
                Ok(ItemPayload {
                    dc: item.dc,
                    ledger_id: option.id.clone(),
                    amount: item.amount,
                    narration: item.narration.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EntryPayload {
            number: self.number.clone(),
            date: self.date,
            tag_id: self.tag.clone().unwrap_or_default(),
            items,
            notes: self.narration.clone(),
        })
    }
}

/// A rejected entry group: the reference it was grouped under and why it
/// was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportIssue {
    /// The group reference the issue belongs to.
    pub reference: String,
    /// Human-readable reason.
    pub message: String,
}

/// The outcome of an import: the entries that passed per-entry validation
/// and the issues for those that did not.
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Valid entries, in first-seen file order.
    pub entries: Vec<ImportedEntry>,
    /// One issue per rejected entry group.
    pub issues: Vec<ImportIssue>,
}

/// CSV extraction driven by a [`FieldMapping`].
#[derive(Debug, Clone)]
pub struct CsvImport {
    mapping: FieldMapping,
    date_format: String,
    precision: Precision,
}

impl CsvImport {
    /// Create an import with the default ISO date format and cent precision.
    #[must_use]
    pub fn new(mapping: FieldMapping) -> Self {
        Self {
            mapping,
            date_format: "%Y-%m-%d".to_string(),
            precision: Precision::CENTS,
        }
    }

    /// Override the date format (chrono `strftime` syntax).
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Override the precision amounts are quantized and balanced at.
    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Import entries from a CSV file on disk.
    pub fn extract_file(&self, path: &Path) -> Result<ImportResult, ImportError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        self.extract(reader)
    }

    /// Import entries from in-memory CSV content.
    pub fn extract_string(&self, content: &str) -> Result<ImportResult, ImportError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        self.extract(reader)
    }

    fn extract<R: std::io::Read>(
        &self,
        mut reader: csv::Reader<R>,
    ) -> Result<ImportResult, ImportError> {
        let headers = reader.headers()?.clone();
        let columns = Columns::resolve(&self.mapping, &headers)?;

        // Group rows, preserving first-seen entry order. Rows with a blank
        // entry number each form their own single-item group under a
        // synthetic reference.
        let mut groups: Vec<Group> = Vec::new();
        let mut by_number: HashMap<String, usize> = HashMap::new();
        for (row_num, record) in reader.records().enumerate() {
            let record = record?;
            let row = columns.row(&record);
            match row.number.clone() {
                Some(number) => {
                    let slot = *by_number.entry(number.clone()).or_insert_with(|| {
                        groups.push(Group::numbered(number));
                        groups.len() - 1
                    });
                    groups[slot].rows.push(row);
                }
                None => {
                    groups.push(Group::synthetic(row_num + 2, row));
                }
            }
        }

        let mut result = ImportResult::default();
        for group in &groups {
            match self.build_entry(group) {
                Ok(entry) => result.entries.push(entry),
                Err(message) => result.issues.push(ImportIssue {
                    reference: group.reference.clone(),
                    message,
                }),
            }
        }
        Ok(result)
    }

    /// Validate one grouped entry; any failure rejects the whole group.
    fn build_entry(&self, group: &Group) -> Result<ImportedEntry, String> {
        let first = &group.rows[0];
        let date = NaiveDate::parse_from_str(&first.date, &self.date_format).map_err(|_| {
            format!(
                "unparseable date {:?} (expected format {})",
                first.date, self.date_format
            )
        })?;

        let mut items = Vec::with_capacity(group.rows.len());
        for (i, row) in group.rows.iter().enumerate() {
            let leg = i + 1;
            if row.ledger_code.is_empty() {
                return Err(format!("leg {leg}: missing ledger code"));
            }
            let dc: Dc = row
                .dc
                .parse()
                .map_err(|_| format!("leg {leg}: unrecognized dc value {:?}", row.dc))?;
            let amount = parse_money_string(&row.amount)
                .ok_or_else(|| format!("leg {leg}: unparseable amount {:?}", row.amount))?;
            if !self.precision.is_positive(amount) {
                return Err(format!("leg {leg}: amount must be positive, got {amount}"));
            }
            let reconciliation_date = match row.reconciliation_date.as_deref() {
                Some(s) if !s.is_empty() => Some(
                    NaiveDate::parse_from_str(s, &self.date_format)
                        .map_err(|_| format!("leg {leg}: unparseable reconciliation date {s:?}"))?,
                ),
                _ => None,
            };
            items.push(ImportedItem {
                ledger_code: row.ledger_code.clone(),
                dc,
                amount: self.precision.quantize(amount),
                narration: row.item_narration.clone(),
                reconciliation_date,
            });
        }

        // Ungrouped single rows have nothing to balance against; they are
        // checked again at the entry layer before submission.
        if group.numbered {
            let lines: Vec<PostingLine> = items
                .iter()
                .map(|item| {
                    PostingLine::new(
                        item.dc,
                        LedgerRef::new(item.ledger_code.clone(), item.ledger_code.clone()),
                        item.amount,
                        "",
                    )
                })
                .collect();
            let totals = compute_totals(&lines, self.precision);
            if !totals.balanced {
                return Err(format!(
                    "entry is out of balance by {:.places$}",
                    totals.difference.abs(),
                    places = self.precision.places() as usize
                ));
            }
        }

        Ok(ImportedEntry {
            reference: group.reference.clone(),
            number: group.numbered.then(|| group.reference.clone()),
            date,
            entry_type: first.entry_type.clone(),
            tag: first.tag.clone(),
            narration: first.entry_narration.clone(),
            items,
        })
    }
}

/// A contiguous-by-reference group of raw rows.
#[derive(Debug)]
struct Group {
    reference: String,
    numbered: bool,
    rows: Vec<RawRow>,
}

impl Group {
    fn numbered(number: String) -> Self {
        Self {
            reference: number,
            numbered: true,
            rows: Vec::new(),
        }
    }

    fn synthetic(line: usize, row: RawRow) -> Self {
        Self {
            reference: format!("line {line}"),
            numbered: false,
            rows: vec![row],
        }
    }
}

/// One CSV row with the mapped cells pulled out.
#[derive(Debug)]
struct RawRow {
    number: Option<String>,
    date: String,
    entry_type: String,
    tag: Option<String>,
    entry_narration: String,
    ledger_code: String,
    dc: String,
    amount: String,
    item_narration: String,
    reconciliation_date: Option<String>,
}

/// Mapped header names resolved to record indexes.
struct Columns {
    entry_number: Option<usize>,
    entry_date: usize,
    entry_type_id: usize,
    tag_id: Option<usize>,
    entry_narration: Option<usize>,
    ledger_code: usize,
    dc: usize,
    amount: usize,
    item_narration: Option<usize>,
    item_reconciliation_date: Option<usize>,
}

impl Columns {
    fn resolve(mapping: &FieldMapping, headers: &csv::StringRecord) -> Result<Self, ImportError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ImportError::MissingColumn {
                    name: name.to_string(),
                })
        };
        let find_opt =
            |name: Option<&String>| name.map(|n| find(n)).transpose();
        Ok(Self {
            entry_number: find_opt(mapping.entry_number.as_ref())?,
            entry_date: find(&mapping.entry_date)?,
            entry_type_id: find(&mapping.entry_type_id)?,
            tag_id: find_opt(mapping.tag_id.as_ref())?,
            entry_narration: find_opt(mapping.entry_narration.as_ref())?,
            ledger_code: find(&mapping.ledger_code)?,
            dc: find(&mapping.dc)?,
            amount: find(&mapping.amount)?,
            item_narration: find_opt(mapping.item_narration.as_ref())?,
            item_reconciliation_date: find_opt(mapping.item_reconciliation_date.as_ref())?,
        })
    }

    fn row(&self, record: &csv::StringRecord) -> RawRow {
        let cell = |i: usize| record.get(i).unwrap_or_default().to_string();
        let opt_cell = |i: Option<usize>| i.map(&cell).filter(|s| !s.is_empty());
        RawRow {
            number: opt_cell(self.entry_number),
            date: cell(self.entry_date),
            entry_type: cell(self.entry_type_id),
            tag: opt_cell(self.tag_id),
            entry_narration: self.entry_narration.map(&cell).unwrap_or_default(),
            ledger_code: cell(self.ledger_code),
            dc: cell(self.dc),
            amount: cell(self.amount),
            item_narration: self.item_narration.map(&cell).unwrap_or_default(),
            reconciliation_date: self.item_reconciliation_date.map(&cell),
        }
    }
}

/// Parse a money string, handling currency symbols, thousands separators
/// and parentheses for negatives.
fn parse_money_string(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (is_negative, s) = if s.starts_with('(') && s.ends_with(')') {
        (true, &s[1..s.len() - 1])
    } else {
        (false, s)
    };

    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    Some(if is_negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn mapping() -> FieldMapping {
        FieldMapping::auto_match(&[
            "entry_number",
            "entry_date",
            "entry_type_id",
            "ledger_code",
            "dc",
            "amount",
        ])
        .build()
        .unwrap()
    }

    #[test]
    fn test_parse_money_string() {
        assert_eq!(parse_money_string("100.00"), Some(100.0));
        assert_eq!(parse_money_string("$1,234.56"), Some(1234.56));
        assert_eq!(parse_money_string("(50.00)"), Some(-50.0));
        assert_eq!(parse_money_string("-50"), Some(-50.0));
        assert_eq!(parse_money_string(""), None);
        assert_eq!(parse_money_string("N/A"), None);
    }

    #[test]
    fn test_rows_sharing_a_number_group_into_one_entry() {
        let csv = "\
entry_number,entry_date,entry_type_id,ledger_code,dc,amount
1001,2025-01-05,receipt,CASH,D,500.00
1001,2025-01-05,receipt,SALES,C,500.00
";
        let result = CsvImport::new(mapping()).extract_string(csv).unwrap();
        assert!(result.issues.is_empty());
        assert_eq!(result.entries.len(), 1);
        let entry = &result.entries[0];
        assert_eq!(entry.reference, "1001");
        assert_eq!(entry.number.as_deref(), Some("1001"));
        assert_eq!(entry.items.len(), 2);
        assert_eq!(entry.items[0].dc, Dc::Debit);
        assert_eq!(entry.items[0].ledger_code, "CASH");
        assert_eq!(entry.items[1].dc, Dc::Credit);
    }

    #[test]
    fn test_interleaved_groups_keep_first_seen_order() {
        let csv = "\
entry_number,entry_date,entry_type_id,ledger_code,dc,amount
2,2025-01-05,journal,RENT,D,900
1,2025-01-04,journal,CASH,D,100
2,2025-01-05,journal,BANK,C,900
1,2025-01-04,journal,SALES,C,100
";
        let result = CsvImport::new(mapping()).extract_string(csv).unwrap();
        assert!(result.issues.is_empty());
        let refs: Vec<&str> = result.entries.iter().map(|e| e.reference.as_str()).collect();
        assert_eq!(refs, ["2", "1"]);
    }

    #[test]
    fn test_bad_group_is_reported_and_good_groups_survive() {
        let csv = "\
entry_number,entry_date,entry_type_id,ledger_code,dc,amount
1,2025-01-04,journal,CASH,D,100
1,2025-01-04,journal,SALES,C,100
2,2025-01-05,journal,RENT,X,900
2,2025-01-05,journal,BANK,C,900
3,2025-01-06,journal,CASH,D,50
3,2025-01-06,journal,SALES,C,49.50
";
        let result = CsvImport::new(mapping()).extract_string(csv).unwrap();
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].reference, "1");
        assert_eq!(result.issues.len(), 2);
        assert_eq!(result.issues[0].reference, "2");
        assert!(result.issues[0].message.contains("unrecognized dc"));
        assert_eq!(result.issues[1].reference, "3");
        assert!(result.issues[1].message.contains("out of balance by 0.50"));
    }

    #[test]
    fn test_blank_numbers_become_single_item_entries() {
        let csv = "\
entry_number,entry_date,entry_type_id,ledger_code,dc,amount
,2025-01-04,journal,CASH,D,100
,2025-01-05,journal,RENT,C,40
";
        let result = CsvImport::new(mapping()).extract_string(csv).unwrap();
        assert!(result.issues.is_empty());
        assert_eq!(result.entries.len(), 2);
        assert_eq!(result.entries[0].items.len(), 1);
        assert!(result.entries[0].number.is_none());
        assert_ne!(result.entries[0].reference, result.entries[1].reference);
    }

    #[test]
    fn test_malformed_file_halts_the_import() {
        let csv = "\
entry_number,entry_date,entry_type_id,ledger_code,dc,amount
1,2025-01-04,journal,CASH,D,100,extra-field
";
        let err = CsvImport::new(mapping()).extract_string(csv).unwrap_err();
        assert!(matches!(err, ImportError::Csv(_)));
    }

    #[test]
    fn test_missing_mapped_column_is_fatal() {
        let m = FieldMapping::builder()
            .entry_date("Date")
            .entry_type_id("Type")
            .ledger_code("Account")
            .dc("Side")
            .amount("Total")
            .build()
            .unwrap();
        let csv = "Date,Type,Account,Side\n2025-01-04,journal,CASH,D\n";
        let err = CsvImport::new(m).extract_string(csv).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn { name } if name == "Total"));
    }

    #[test]
    fn test_custom_date_format_and_money_cleanup() {
        let csv = "\
entry_number,entry_date,entry_type_id,ledger_code,dc,amount
7,05/01/2025,receipt,CASH,D,\"$1,250.00\"
7,05/01/2025,receipt,SALES,C,\"$1,250.00\"
";
        let result = CsvImport::new(mapping())
            .with_date_format("%d/%m/%Y")
            .extract_string(csv)
            .unwrap();
        assert!(result.issues.is_empty());
        let entry = &result.entries[0];
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
        assert_eq!(entry.items[0].amount, 1250.0);
    }

    fn directory() -> LedgerDirectory {
        LedgerDirectory::new(vec![
            daybook_core::LedgerOption {
                id: "7".to_string(),
                name: "CASH".to_string(),
                disabled: false,
            },
            daybook_core::LedgerOption {
                id: "9".to_string(),
                name: "SALES".to_string(),
                disabled: false,
            },
            daybook_core::LedgerOption {
                id: "11".to_string(),
                name: "OLD-BANK".to_string(),
                disabled: true,
            },
        ])
    }

    #[test]
    fn test_resolve_payload_maps_codes_to_ids() {
        let csv = "\
entry_number,entry_date,entry_type_id,ledger_code,dc,amount
1001,2025-01-05,receipt,CASH,D,500.00
1001,2025-01-05,receipt,SALES,C,500.00
";
        let result = CsvImport::new(mapping()).extract_string(csv).unwrap();
        let payload = result.entries[0].resolve_payload(&directory()).unwrap();
        assert_eq!(payload.number.as_deref(), Some("1001"));
        assert_eq!(payload.items[0].ledger_id, "7");
        assert_eq!(payload.items[1].ledger_id, "9");
        assert_eq!(payload.items[1].amount, 500.0);
        assert_eq!(payload.tag_id, "");
    }

    #[test]
    fn test_resolve_payload_rejects_unknown_and_disabled_codes() {
        let csv = "\
entry_number,entry_date,entry_type_id,ledger_code,dc,amount
1,2025-01-05,receipt,PETTY,D,20.00
1,2025-01-05,receipt,SALES,C,20.00
2,2025-01-06,receipt,CASH,D,30.00
2,2025-01-06,receipt,OLD-BANK,C,30.00
";
        let result = CsvImport::new(mapping()).extract_string(csv).unwrap();
        assert_eq!(
            result.entries[0].resolve_payload(&directory()),
            Err(ResolveError::UnknownLedger("PETTY".to_string()))
        );
        assert_eq!(
            result.entries[1].resolve_payload(&directory()),
            Err(ResolveError::DisabledLedger("OLD-BANK".to_string()))
        );
    }

    #[test]
    fn test_extract_file_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "entry_number,entry_date,entry_type_id,ledger_code,dc,amount\n\
             1001,2025-01-05,receipt,CASH,D,500.00\n\
             1001,2025-01-05,receipt,SALES,C,500.00\n"
        )
        .unwrap();
        let result = CsvImport::new(mapping()).extract_file(file.path()).unwrap();
        assert_eq!(result.entries.len(), 1);
    }
}

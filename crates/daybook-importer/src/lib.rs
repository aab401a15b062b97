//! CSV import for daybook.
//!
//! Turns an operator-supplied CSV file into structured journal entries ready
//! for submission:
//!
//! 1. map CSV headers onto the logical entry fields ([`FieldMapping`],
//!    with auto-matching of identically named columns),
//! 2. read the file (a malformed file halts the import),
//! 3. group rows sharing an entry number into one entry with multiple
//!    posting items ([`CsvImport`]),
//! 4. validate each logical entry and report failures per entry, so one bad
//!    group never poisons the rest of the file,
//! 5. for submission, resolve each ledger code through the lookup directory
//!    into a wire payload ([`ImportedEntry::resolve_payload`]); entries with
//!    unknown or disabled codes are rejected individually.
//!
//! # Example
//!
//! ```
//! use daybook_importer::{CsvImport, FieldMapping};
//!
//! let csv = "\
//! entry_number,entry_date,entry_type_id,ledger_code,dc,amount
//! 1001,2025-01-05,receipt,CASH,D,500
//! 1001,2025-01-05,receipt,SALES,C,500
//! ";
//! let mapping = FieldMapping::auto_match(&["entry_number", "entry_date",
//!     "entry_type_id", "ledger_code", "dc", "amount"]).build().unwrap();
//! let result = CsvImport::new(mapping).extract_string(csv).unwrap();
//! assert_eq!(result.entries.len(), 1);
//! assert_eq!(result.entries[0].items.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod csv_import;
pub mod mapping;

pub use csv_import::{
    CsvImport, ImportError, ImportIssue, ImportResult, ImportedEntry, ImportedItem, ResolveError,
};
pub use mapping::{FieldMapping, FieldMappingBuilder, MappingError};

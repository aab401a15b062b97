//! Mapping CSV headers onto the logical entry fields.

use thiserror::Error;

/// The logical fields an import row can feed, with the CSV header each one
/// reads from. Entry-level fields repeat on every row of a group; item-level
/// fields differ per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Groups rows into entries; blank values get a synthetic reference.
    pub entry_number: Option<String>,
    /// Entry date (required).
    pub entry_date: String,
    /// Entry type (required).
    pub entry_type_id: String,
    /// Classification tag.
    pub tag_id: Option<String>,
    /// Entry-level narration.
    pub entry_narration: Option<String>,
    /// Ledger code of the item (required).
    pub ledger_code: String,
    /// Debit/credit indicator of the item (required).
    pub dc: String,
    /// Item amount (required).
    pub amount: String,
    /// Item-level narration.
    pub item_narration: Option<String>,
    /// Item reconciliation date.
    pub item_reconciliation_date: Option<String>,
}

impl FieldMapping {
    /// Start an empty mapping builder.
    #[must_use]
    pub fn builder() -> FieldMappingBuilder {
        FieldMappingBuilder::default()
    }

    /// Pre-populate a builder from CSV headers whose names already match the
    /// logical field names exactly, the way the import wizard auto-selects
    /// columns. Remaining fields can still be set by hand before `build()`.
    #[must_use]
    pub fn auto_match<S: AsRef<str>>(headers: &[S]) -> FieldMappingBuilder {
        let mut builder = FieldMappingBuilder::default();
        for header in headers {
            let header = header.as_ref();
            match header {
                "entry_number" => builder.entry_number = Some(header.to_string()),
                "entry_date" => builder.entry_date = Some(header.to_string()),
                "entry_type_id" => builder.entry_type_id = Some(header.to_string()),
                "tag_id" => builder.tag_id = Some(header.to_string()),
                "entry_narration" => builder.entry_narration = Some(header.to_string()),
                "ledger_code" => builder.ledger_code = Some(header.to_string()),
                "dc" => builder.dc = Some(header.to_string()),
                "amount" => builder.amount = Some(header.to_string()),
                "item_narration" => builder.item_narration = Some(header.to_string()),
                "item_reconciliation_date" => {
                    builder.item_reconciliation_date = Some(header.to_string());
                }
                _ => {}
            }
        }
        builder
    }
}

/// Error building a field mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A required logical field has no CSV column assigned.
    #[error("please map the required field: {field}")]
    MissingRequired {
        /// Name of the unmapped logical field.
        field: &'static str,
    },
    /// A `field=Header` pair named a logical field that does not exist.
    #[error("unknown import field: {0:?}")]
    UnknownField(String),
}

/// Builder for a [`FieldMapping`].
#[derive(Debug, Clone, Default)]
pub struct FieldMappingBuilder {
    /// Header for the entry number column.
    pub entry_number: Option<String>,
    /// Header for the entry date column.
    pub entry_date: Option<String>,
    /// Header for the entry type column.
    pub entry_type_id: Option<String>,
    /// Header for the tag column.
    pub tag_id: Option<String>,
    /// Header for the entry narration column.
    pub entry_narration: Option<String>,
    /// Header for the ledger code column.
    pub ledger_code: Option<String>,
    /// Header for the debit/credit column.
    pub dc: Option<String>,
    /// Header for the amount column.
    pub amount: Option<String>,
    /// Header for the item narration column.
    pub item_narration: Option<String>,
    /// Header for the item reconciliation date column.
    pub item_reconciliation_date: Option<String>,
}

impl FieldMappingBuilder {
    /// Set the entry number column.
    #[must_use]
    pub fn entry_number(mut self, header: impl Into<String>) -> Self {
        self.entry_number = Some(header.into());
        self
    }

    /// Set the entry date column.
    #[must_use]
    pub fn entry_date(mut self, header: impl Into<String>) -> Self {
        self.entry_date = Some(header.into());
        self
    }

    /// Set the entry type column.
    #[must_use]
    pub fn entry_type_id(mut self, header: impl Into<String>) -> Self {
        self.entry_type_id = Some(header.into());
        self
    }

    /// Set the tag column.
    #[must_use]
    pub fn tag_id(mut self, header: impl Into<String>) -> Self {
        self.tag_id = Some(header.into());
        self
    }

    /// Set the entry narration column.
    #[must_use]
    pub fn entry_narration(mut self, header: impl Into<String>) -> Self {
        self.entry_narration = Some(header.into());
        self
    }

    /// Set the ledger code column.
    #[must_use]
    pub fn ledger_code(mut self, header: impl Into<String>) -> Self {
        self.ledger_code = Some(header.into());
        self
    }

    /// Set the debit/credit column.
    #[must_use]
    pub fn dc(mut self, header: impl Into<String>) -> Self {
        self.dc = Some(header.into());
        self
    }

    /// Set the amount column.
    #[must_use]
    pub fn amount(mut self, header: impl Into<String>) -> Self {
        self.amount = Some(header.into());
        self
    }

    /// Set the item narration column.
    #[must_use]
    pub fn item_narration(mut self, header: impl Into<String>) -> Self {
        self.item_narration = Some(header.into());
        self
    }

    /// Set the item reconciliation date column.
    #[must_use]
    pub fn item_reconciliation_date(mut self, header: impl Into<String>) -> Self {
        self.item_reconciliation_date = Some(header.into());
        self
    }

    /// Assign a column by logical field name, as parsed from a
    /// `field=Header` command-line pair. Unknown names are an error.
    pub fn set(mut self, field: &str, header: impl Into<String>) -> Result<Self, MappingError> {
        let header = header.into();
        match field {
            "entry_number" => self.entry_number = Some(header),
            "entry_date" => self.entry_date = Some(header),
            "entry_type_id" => self.entry_type_id = Some(header),
            "tag_id" => self.tag_id = Some(header),
            "entry_narration" => self.entry_narration = Some(header),
            "ledger_code" => self.ledger_code = Some(header),
            "dc" => self.dc = Some(header),
            "amount" => self.amount = Some(header),
            "item_narration" => self.item_narration = Some(header),
            "item_reconciliation_date" => self.item_reconciliation_date = Some(header),
            _ => return Err(MappingError::UnknownField(field.to_string())),
        }
        Ok(self)
    }

    /// Finish the mapping, enforcing that every required field is assigned.
    pub fn build(self) -> Result<FieldMapping, MappingError> {
        let required = |value: Option<String>, field: &'static str| {
            value.ok_or(MappingError::MissingRequired { field })
        };
        Ok(FieldMapping {
            entry_number: self.entry_number,
            entry_date: required(self.entry_date, "entry_date")?,
            entry_type_id: required(self.entry_type_id, "entry_type_id")?,
            tag_id: self.tag_id,
            entry_narration: self.entry_narration,
            ledger_code: required(self.ledger_code, "ledger_code")?,
            dc: required(self.dc, "dc")?,
            amount: required(self.amount, "amount")?,
            item_narration: self.item_narration,
            item_reconciliation_date: self.item_reconciliation_date,
        })
    }
}

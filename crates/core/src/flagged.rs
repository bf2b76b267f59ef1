//! Flagged records: rows an import could not cleanly reconcile.
//!
//! Flagged records are never persisted. Each import run owns one
//! [`FlaggedRecords`] accumulator and hands it back to the caller with the
//! run's summary, so concurrent runs cannot see each other's rows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::fields::Field;
use crate::kind::ImportKind;
use crate::sheet::RowFields;

/// Why a row was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagIssue {
    #[serde(rename = "Duplicate tag in file")]
    DuplicateTagInFile,
    #[serde(rename = "Duplicate tag vs. existing record")]
    DuplicateTagExisting,
    #[serde(rename = "Unknown tag")]
    UnknownTag,
}

impl FlagIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateTagInFile => "Duplicate tag in file",
            Self::DuplicateTagExisting => "Duplicate tag vs. existing record",
            Self::UnknownTag => "Unknown tag",
        }
    }
}

impl std::fmt::Display for FlagIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flagged row, with enough context for an operator to fix and resubmit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlaggedRecord {
    pub row_number: usize,
    pub tag: String,
    pub serial_number: String,
    pub model: String,
    pub manufacturer: String,
    pub category: String,
    pub unit: String,
    pub status: String,
    pub issue: FlagIssue,
    pub error_message: String,
    pub import_type: ImportKind,
    /// Raw cell text keyed by header.
    pub original_row_data: HashMap<String, String>,
}

impl FlaggedRecord {
    /// Capture a row's natural-key fields and raw cells.
    pub fn from_row(
        row: &impl RowFields,
        issue: FlagIssue,
        error_message: impl Into<String>,
        import_type: ImportKind,
    ) -> Self {
        Self {
            row_number: row.row_number(),
            tag: row.get(Field::Tag),
            serial_number: row.get(Field::SerialNumber),
            model: row.get(Field::Model),
            manufacturer: row.get(Field::Manufacturer),
            category: row.get(Field::Category),
            unit: row.get(Field::Unit),
            status: row.get(Field::Status),
            issue,
            error_message: error_message.into(),
            import_type,
            original_row_data: row.original_data(),
        }
    }
}

/// Run-scoped flagged-record accumulator.
#[derive(Debug, Clone, Default)]
pub struct FlaggedRecords {
    records: Vec<FlaggedRecord>,
}

impl FlaggedRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: FlaggedRecord) {
        self.records.push(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn all(&self) -> &[FlaggedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_vec(self) -> Vec<FlaggedRecord> {
        self.records
    }
}

//! Flagged-record review workbook.
//!
//! One sheet, one row per flagged record: row number, issue, error text and
//! the natural-key fields, followed by the row's original cells under their
//! original headers. Operators fix the rows and resubmit them.

use std::collections::BTreeSet;
use std::path::Path;

use assetdesk_core::flagged::FlaggedRecord;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

pub const FLAGGED_SHEET_NAME: &str = "Flagged Records";

/// Fixed leading columns.
pub const FIXED_HEADERS: [&str; 11] = [
    "Row",
    "Issue",
    "Error",
    "Import Type",
    "Tag",
    "Serial Number",
    "Model",
    "Manufacturer",
    "Category",
    "Unit",
    "Status",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("xlsx error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render flagged records as xlsx bytes.
pub fn flagged_workbook(records: &[FlaggedRecord]) -> Result<Vec<u8>, ExportError> {
    // Union of original headers across all rows, in stable order.
    let original_headers: Vec<&str> = records
        .iter()
        .flat_map(|r| r.original_row_data.keys().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(FLAGGED_SHEET_NAME)?;

    for (col, header) in FIXED_HEADERS.iter().chain(original_headers.iter()).enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        sheet.write_number(row, 0, record.row_number as f64)?;
        let fixed = [
            record.issue.as_str(),
            record.error_message.as_str(),
            record.import_type.as_str(),
            record.tag.as_str(),
            record.serial_number.as_str(),
            record.model.as_str(),
            record.manufacturer.as_str(),
            record.category.as_str(),
            record.unit.as_str(),
            record.status.as_str(),
        ];
        for (offset, value) in fixed.iter().enumerate() {
            sheet.write_string(row, offset as u16 + 1, *value)?;
        }
        for (offset, header) in original_headers.iter().enumerate() {
            if let Some(value) = record.original_row_data.get(*header) {
                let col = (FIXED_HEADERS.len() + offset) as u16;
                sheet.write_string(row, col, value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Write the review workbook to `path`.
pub fn write_flagged_workbook(path: &Path, records: &[FlaggedRecord]) -> Result<(), ExportError> {
    let bytes = flagged_workbook(records)?;
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), records = records.len(), "Flagged records exported");
    Ok(())
}

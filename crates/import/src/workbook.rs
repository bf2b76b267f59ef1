//! Spreadsheet reader: turns uploaded workbook bytes into a [`Worksheet`].
//!
//! Only the first sheet is read. Cells are rendered to text here so the
//! engine deals with one representation regardless of how the sheet typed
//! them: integral numbers lose their `.0`, date cells become ISO dates.

use std::io::Cursor;

use assetdesk_core::parse::excel_serial_to_date;
use assetdesk_core::sheet::Worksheet;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::error::ImportError;

/// Largest magnitude rendered as an integer rather than a float.
const MAX_INTEGRAL_FLOAT: f64 = 1e15;

/// Read the first worksheet of an xlsx/xls/ods workbook.
pub fn read_worksheet(bytes: Vec<u8>) -> Result<Worksheet, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ImportError::OpenWorkbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoWorksheet)?
        .map_err(|e| ImportError::OpenWorkbook(e.to_string()))?;

    let grid = range_to_grid(&range);
    tracing::debug!(rows = grid.len(), "Worksheet read");
    Worksheet::from_grid(grid).map_err(|_| ImportError::NoHeaderRow)
}

/// Render a range as text rows anchored at A1.
///
/// calamine trims leading empty rows and columns from a range; they are
/// restored so column indices and row numbers match the sheet.
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<String>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let blank_prefix = vec![String::new(); start_col as usize];

    let mut grid: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = blank_prefix.clone();
        cells.extend(row.iter().map(cell_text));
        grid.push(cells);
    }
    grid
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(v) => v.to_string(),
        Data::Float(v) => float_text(*v),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            match excel_serial_to_date(serial) {
                Some(date) if dt.is_datetime() => date.to_string(),
                _ => float_text(serial),
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

fn float_text(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < MAX_INTEGRAL_FLOAT {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

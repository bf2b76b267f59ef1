//! In-memory worksheet and the two row-addressing strategies.
//!
//! A [`Worksheet`] is a header row plus data rows of cell text, produced by
//! the workbook reader. The reconciliation engine never indexes cells
//! directly; it reads through [`RowFields`], implemented by
//! [`HeaderMappedRow`] (lookup by normalized header) and [`PositionalRow`]
//! (lookup by fixed column index).

use std::collections::HashMap;

use crate::error::CoreError;
use crate::fields::{Field, PositionalLayout};
use crate::header_map::{extract, HeaderMap};

// ---------------------------------------------------------------------------
// Worksheet
// ---------------------------------------------------------------------------

/// One data row. `number` is the 1-based row number in the source sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub number: usize,
    cells: Vec<String>,
}

impl SheetRow {
    pub fn new(number: usize, cells: Vec<String>) -> Self {
        Self { number, cells }
    }

    /// Trimmed text of the cell at `index`; empty when out of range.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(|c| c.trim()).unwrap_or("")
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// `true` if every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

/// A parsed worksheet: first row is the header.
#[derive(Debug, Clone)]
pub struct Worksheet {
    headers: Vec<String>,
    rows: Vec<SheetRow>,
}

impl Worksheet {
    /// Build a worksheet from a grid of cell text, first row as header.
    ///
    /// Fails if the grid is empty or its first row has no non-blank cell.
    pub fn from_grid(grid: Vec<Vec<String>>) -> Result<Self, CoreError> {
        let mut iter = grid.into_iter();
        let headers = iter
            .next()
            .ok_or_else(|| CoreError::Validation("Worksheet is empty".to_string()))?;
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(CoreError::Validation(
                "Worksheet has no header row".to_string(),
            ));
        }
        // Header is sheet row 1, so data starts at row 2.
        let rows = iter
            .enumerate()
            .map(|(i, cells)| SheetRow::new(i + 2, cells))
            .collect();
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    pub fn header_map(&self) -> HeaderMap {
        HeaderMap::build(&self.headers)
    }
}

// ---------------------------------------------------------------------------
// Row addressing
// ---------------------------------------------------------------------------

/// Read access to one import row, independent of how columns are located.
pub trait RowFields {
    fn row(&self) -> &SheetRow;

    fn headers(&self) -> &[String];

    /// Trimmed value of `field`; empty when the template has no such column.
    fn get(&self, field: Field) -> String;

    fn row_number(&self) -> usize {
        self.row().number
    }

    /// `true` if `field` has a non-empty value.
    fn has(&self, field: Field) -> bool {
        !self.get(field).is_empty()
    }

    /// Raw cell text keyed by header, for flagged-record review.
    fn original_data(&self) -> HashMap<String, String> {
        self.headers()
            .iter()
            .enumerate()
            .filter(|(_, header)| !header.trim().is_empty())
            .map(|(index, header)| (header.trim().to_string(), self.row().cell(index).to_string()))
            .collect()
    }
}

/// Fields located through a [`HeaderMap`].
pub struct HeaderMappedRow<'a> {
    row: &'a SheetRow,
    headers: &'a [String],
    map: &'a HeaderMap,
}

impl<'a> HeaderMappedRow<'a> {
    pub fn new(row: &'a SheetRow, headers: &'a [String], map: &'a HeaderMap) -> Self {
        Self { row, headers, map }
    }
}

impl RowFields for HeaderMappedRow<'_> {
    fn row(&self) -> &SheetRow {
        self.row
    }

    fn headers(&self) -> &[String] {
        self.headers
    }

    fn get(&self, field: Field) -> String {
        extract(self.row, self.map, field.key())
    }
}

/// Fields located by fixed column index.
pub struct PositionalRow<'a> {
    row: &'a SheetRow,
    headers: &'a [String],
    layout: &'a PositionalLayout,
}

impl<'a> PositionalRow<'a> {
    pub fn new(row: &'a SheetRow, headers: &'a [String], layout: &'a PositionalLayout) -> Self {
        Self {
            row,
            headers,
            layout,
        }
    }
}

impl RowFields for PositionalRow<'_> {
    fn row(&self) -> &SheetRow {
        self.row
    }

    fn headers(&self) -> &[String] {
        self.headers
    }

    fn get(&self, field: Field) -> String {
        self.layout
            .column(field)
            .map(|index| self.row.cell(index).to_string())
            .unwrap_or_default()
    }
}

//! Import run driver.
//!
//! [`run_import`] walks a worksheet top to bottom, hands each row to the
//! variant selected by the request, and batches the resulting writes.
//! Row-level failures are recorded and the run moves on; only the setup
//! checks in [`ImportRun::prepare`] can abort a run.

use std::collections::HashSet;

use assetdesk_core::flagged::{FlagIssue, FlaggedRecord, FlaggedRecords};
use assetdesk_core::kind::{Addressing, ImportKind};
use assetdesk_core::report::{ImportSummary, ImportTally};
use assetdesk_core::sheet::{HeaderMappedRow, PositionalRow, RowFields, Worksheet};
use assetdesk_core::types::DbId;
use assetdesk_db::models::location::Location;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ImportError, StoreError};
use crate::store::InventoryStore;
use crate::variants;
use crate::workbook;

/// Rows per batch when the caller does not say otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// Request / outcome
// ---------------------------------------------------------------------------

/// What to import and on whose behalf.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub kind: ImportKind,
    /// Location applied to every row, overriding the row's own location.
    pub default_location_id: Option<DbId>,
    /// Recorded as the actor of every audit entry.
    pub actor: String,
    /// Created plus updated rows per flush. Never zero.
    pub batch_size: usize,
}

impl ImportRequest {
    pub fn new(kind: ImportKind, actor: impl Into<String>) -> Self {
        Self {
            kind,
            default_location_id: None,
            actor: actor.into(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Set the default location. `0` means "no default".
    pub fn with_default_location(mut self, location_id: DbId) -> Self {
        self.default_location_id = (location_id != 0).then_some(location_id);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

/// Result of one import run.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub run_id: Uuid,
    pub summary: ImportSummary,
    pub flagged: Vec<FlaggedRecord>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Read workbook bytes and import the first sheet.
pub async fn import_workbook<S>(
    store: &mut S,
    bytes: Vec<u8>,
    request: &ImportRequest,
) -> Result<ImportOutcome, ImportError>
where
    S: InventoryStore + ?Sized,
{
    let sheet = workbook::read_worksheet(bytes)?;
    run_import(store, &sheet, request).await
}

/// Import an already-parsed worksheet.
pub async fn run_import<S>(
    store: &mut S,
    sheet: &Worksheet,
    request: &ImportRequest,
) -> Result<ImportOutcome, ImportError>
where
    S: InventoryStore + ?Sized,
{
    let mut run = ImportRun::prepare(store, request).await?;
    tracing::info!(
        run_id = %run.run_id,
        kind = %request.kind,
        rows = sheet.rows().len(),
        "Import started"
    );

    let headers = sheet.headers();
    match request.kind.addressing() {
        Addressing::HeaderMapped => {
            let map = sheet.header_map();
            for row in sheet.rows().iter().filter(|row| !row.is_blank()) {
                let fields = HeaderMappedRow::new(row, headers, &map);
                run.process(&fields).await;
            }
        }
        Addressing::Positional(layout) => {
            for row in sheet.rows().iter().filter(|row| !row.is_blank()) {
                let fields = PositionalRow::new(row, headers, layout);
                run.process(&fields).await;
            }
        }
    }

    run.flush().await;
    Ok(run.finish())
}

// ---------------------------------------------------------------------------
// Run state
// ---------------------------------------------------------------------------

/// Outcome of one row, as seen by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Created,
    Updated,
    /// Missing natural key, or nothing to apply.
    Skipped,
    Flagged,
}

/// Created/updated rows since the last flush.
#[derive(Debug, Default)]
struct Batch {
    imported: usize,
    updated: usize,
    first_row: Option<usize>,
    last_row: usize,
}

impl Batch {
    fn pending(&self) -> usize {
        self.imported + self.updated
    }

    fn note(&mut self, row_number: usize) {
        self.first_row.get_or_insert(row_number);
        self.last_row = row_number;
    }
}

/// Mutable state of one import run.
pub(crate) struct ImportRun<'a, S: InventoryStore + ?Sized> {
    pub(crate) store: &'a mut S,
    pub(crate) request: &'a ImportRequest,
    pub(crate) run_id: Uuid,
    pub(crate) tally: ImportTally,
    pub(crate) flagged: FlaggedRecords,
    /// Resolved default location, if the request named one.
    pub(crate) default_location: Option<Location>,
    seen_tags: HashSet<String>,
    locations: Option<Vec<Location>>,
    batch: Batch,
}

impl<'a, S: InventoryStore + ?Sized> ImportRun<'a, S> {
    /// Validate the request against the store before any row is read.
    async fn prepare(store: &'a mut S, request: &'a ImportRequest) -> Result<Self, ImportError> {
        let uses_location = matches!(
            request.kind,
            ImportKind::FullInventory | ImportKind::Registration
        );
        let default_location = match request.default_location_id {
            Some(id) if uses_location => Some(
                store
                    .find_location(id)
                    .await?
                    .ok_or(ImportError::UnknownLocation(id))?,
            ),
            _ => None,
        };

        Ok(Self {
            store,
            request,
            run_id: Uuid::now_v7(),
            tally: ImportTally::new(),
            flagged: FlaggedRecords::new(),
            default_location,
            seen_tags: HashSet::new(),
            locations: None,
            batch: Batch::default(),
        })
    }

    async fn process(&mut self, row: &impl RowFields) {
        let row_number = row.row_number();
        let result = match self.request.kind {
            ImportKind::FullInventory => variants::full_inventory::import_row(self, row).await,
            ImportKind::Registration => variants::registration::import_row(self, row).await,
            ImportKind::Configuration => variants::configuration::import_row(self, row).await,
            ImportKind::People => variants::people::import_row(self, row).await,
        };
        match result {
            Ok(outcome) => tracing::debug!(run_id = %self.run_id, row_number, ?outcome, "Row processed"),
            Err(e) => {
                tracing::debug!(run_id = %self.run_id, row_number, error = %e, "Row failed");
                self.tally.error(format!("Row {row_number}: {e}"));
            }
        }

        if self.batch.pending() >= self.request.batch_size {
            self.flush().await;
        }
    }

    /// Commit pending writes. A failure is recorded against the batch's row
    /// range and the rows' counts are withdrawn.
    async fn flush(&mut self) {
        let batch = std::mem::take(&mut self.batch);
        let Some(first_row) = batch.first_row else {
            return;
        };
        if let Err(e) = self.store.flush().await {
            tracing::warn!(
                run_id = %self.run_id,
                first_row,
                last_row = batch.last_row,
                error = %e,
                "Batch save failed"
            );
            self.tally.retract(batch.imported, batch.updated);
            self.tally.error(format!(
                "Rows {first_row}-{}: batch save failed: {e}",
                batch.last_row
            ));
        }
    }

    fn finish(self) -> ImportOutcome {
        let summary = self.tally.summarize(self.request.kind);
        tracing::info!(
            run_id = %self.run_id,
            imported = summary.imported_count,
            updated = summary.updated_count,
            errors = summary.error_count,
            warnings = summary.warning_count,
            flagged = self.flagged.len(),
            "Import finished"
        );
        ImportOutcome {
            run_id: self.run_id,
            summary,
            flagged: self.flagged.into_vec(),
        }
    }

    // -- helpers used by the variants ----------------------------------------

    pub(crate) fn record_imported(&mut self, row_number: usize) {
        self.tally.record_imported();
        self.batch.imported += 1;
        self.batch.note(row_number);
    }

    pub(crate) fn record_updated(&mut self, row_number: usize) {
        self.tally.record_updated();
        self.batch.updated += 1;
        self.batch.note(row_number);
    }

    /// Remember `tag` for this run. Returns `false` if it was already seen.
    pub(crate) fn note_tag(&mut self, tag: &str) -> bool {
        self.seen_tags.insert(tag.to_string())
    }

    /// Flag a row and add the matching error entry.
    pub(crate) fn flag(&mut self, row: &impl RowFields, issue: FlagIssue, message: String) {
        tracing::warn!(
            run_id = %self.run_id,
            row_number = row.row_number(),
            issue = %issue,
            "Row flagged"
        );
        self.flagged
            .add(FlaggedRecord::from_row(row, issue, message.clone(), self.request.kind));
        self.tally.error(message);
    }

    /// Locations, loaded once per run.
    pub(crate) async fn locations(&mut self) -> Result<&[Location], StoreError> {
        if self.locations.is_none() {
            self.locations = Some(self.store.list_locations().await?);
        }
        Ok(self.locations.as_deref().unwrap_or_default())
    }
}

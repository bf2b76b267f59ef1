//! Spreadsheet import and reconciliation for AssetDesk.
//!
//! The flow is: [`workbook::read_worksheet`] turns uploaded bytes into a
//! worksheet, [`engine::run_import`] reconciles it row by row against an
//! [`store::InventoryStore`], and the returned [`engine::ImportOutcome`]
//! carries the summary plus any flagged rows, which
//! [`export::flagged_workbook`] can render for review.

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod store;
mod variants;
pub mod workbook;

pub use engine::{import_workbook, run_import, ImportOutcome, ImportRequest};
pub use error::{ImportError, StoreError};
pub use store::{InventoryStore, PgInventoryStore};

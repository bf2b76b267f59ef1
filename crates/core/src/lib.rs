//! Pure domain logic for the AssetDesk spreadsheet import pipeline.
//!
//! Nothing in this crate touches the database, performs I/O, or is async.
//! Persistence and workbook decoding live in `assetdesk-db` and
//! `assetdesk-import`.

pub mod audit;
pub mod edit;
pub mod error;
pub mod fields;
pub mod flagged;
pub mod header_map;
pub mod kind;
pub mod parse;
pub mod report;
pub mod sheet;
pub mod types;

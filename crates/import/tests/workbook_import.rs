//! End-to-end: workbook bytes in, summary and flagged export out.

mod common;

use assert_matches::assert_matches;
use assetdesk_core::kind::ImportKind;
use assetdesk_import::export::flagged_workbook;
use assetdesk_import::workbook::read_worksheet;
use assetdesk_import::{import_workbook, ImportError, ImportRequest};
use rust_xlsxwriter::Workbook;

use common::MemoryStore;

fn registration_bytes(rows: &[[&str; 3]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet.write_string(r as u32, c as u16, *value).unwrap();
        }
    }
    workbook.save_to_buffer().unwrap()
}

#[tokio::test]
async fn registration_workbook_round_trip() {
    let mut store = MemoryStore::new();
    let bytes = registration_bytes(&[
        ["OATH Tag*", "Serial Number*", "Model"],
        ["OATH-1", "SN1", "Latitude 7440"],
        ["OATH-1", "SN1-B", "Latitude 7440"],
    ]);
    let request = ImportRequest::new(ImportKind::Registration, "registrar");

    let outcome = import_workbook(&mut store, bytes, &request).await.unwrap();

    assert_eq!(outcome.summary.message(), "1 new equipment added, 1 error");
    assert_eq!(store.equipment("OATH-1").unwrap().model.as_deref(), Some("Latitude 7440"));

    let exported = flagged_workbook(&outcome.flagged).unwrap();
    let sheet = read_worksheet(exported).unwrap();
    assert_eq!(sheet.rows().len(), 1);
    assert_eq!(sheet.rows()[0].cell(1), "Duplicate tag in file");
}

#[tokio::test]
async fn header_only_workbook_changes_nothing() {
    let mut store = MemoryStore::new();
    let bytes = registration_bytes(&[["OATH Tag", "Serial Number", "Model"]]);
    let request = ImportRequest::new(ImportKind::Registration, "registrar");

    let outcome = import_workbook(&mut store, bytes, &request).await.unwrap();

    assert_eq!(outcome.summary.message(), "No changes were made");
    assert_eq!(store.flush_count(), 0);
}

#[tokio::test]
async fn garbage_bytes_fail_to_open() {
    let mut store = MemoryStore::new();
    let request = ImportRequest::new(ImportKind::FullInventory, "ops");

    let result = import_workbook(&mut store, b"not a workbook".to_vec(), &request).await;

    assert_matches!(result, Err(ImportError::OpenWorkbook(_)));
}

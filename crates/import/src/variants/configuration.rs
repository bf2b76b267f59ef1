//! Configuration import: positional overwrite of the technology
//! configuration of existing equipment.

use assetdesk_core::audit::{actions, import_description};
use assetdesk_core::fields::Field;
use assetdesk_core::flagged::FlagIssue;
use assetdesk_core::sheet::RowFields;

use super::apply::{apply_tech_config, audit};
use crate::engine::{ImportRun, RowOutcome};
use crate::error::StoreError;
use crate::store::InventoryStore;

pub(crate) async fn import_row<S>(
    run: &mut ImportRun<'_, S>,
    row: &impl RowFields,
) -> Result<RowOutcome, StoreError>
where
    S: InventoryStore + ?Sized,
{
    let row_number = row.row_number();
    let tag = row.get(Field::Tag);
    if tag.is_empty() {
        return Ok(RowOutcome::Skipped);
    }
    if !run.note_tag(&tag) {
        run.flag(
            row,
            FlagIssue::DuplicateTagInFile,
            format!("Row {row_number}: duplicate tag '{tag}' appears earlier in this file"),
        );
        return Ok(RowOutcome::Flagged);
    }

    let Some(equipment) = run.store.find_equipment_by_tag(&tag).await? else {
        run.flag(
            row,
            FlagIssue::UnknownTag,
            format!("Row {row_number}: no equipment found with tag '{tag}'"),
        );
        return Ok(RowOutcome::Flagged);
    };

    if !apply_tech_config(run, row, equipment.id).await? {
        run.tally.warning(format!(
            "Row {row_number}: no hostname, IP address or MAC address for '{tag}'; configuration unchanged"
        ));
        return Ok(RowOutcome::Skipped);
    }
    run.record_updated(row_number);

    let description = import_description(run.request.kind, row_number, &tag);
    audit(run, equipment.id, actions::CONFIGURATION_IMPORT, description).await?;
    Ok(RowOutcome::Updated)
}

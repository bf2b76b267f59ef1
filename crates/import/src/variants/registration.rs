//! Registration import: header-mapped, create-only.

use assetdesk_core::audit::{actions, import_description};
use assetdesk_core::fields::Field;
use assetdesk_core::flagged::FlagIssue;
use assetdesk_core::sheet::RowFields;
use assetdesk_db::models::equipment::SaveEquipment;

use super::apply::{apply_equipment_fields, apply_tech_config, audit};
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
    let serial = row.get(Field::SerialNumber);
    if tag.is_empty() || serial.is_empty() {
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

    // Inactive records count too: registration never revives or overwrites.
    if run.store.find_equipment_by_tag(&tag).await?.is_some() {
        run.flag(
            row,
            FlagIssue::DuplicateTagExisting,
            format!("Row {row_number}: tag '{tag}' is already registered"),
        );
        return Ok(RowOutcome::Flagged);
    }

    let mut save = SaveEquipment::new(tag.as_str(), serial);
    apply_equipment_fields(run, row, &mut save).await?;
    let created = run.store.create_equipment(&save).await?;
    run.record_imported(row_number);

    apply_tech_config(run, row, created.id).await?;
    let description = import_description(run.request.kind, row_number, &tag);
    audit(run, created.id, actions::REGISTER, description).await?;
    Ok(RowOutcome::Created)
}

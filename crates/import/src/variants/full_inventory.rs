//! Full-inventory import: positional create-or-update of equipment.

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

    let existing = run.store.find_equipment_by_tag(&tag).await?;
    let mut save = match &existing {
        Some(current) => {
            let mut save = SaveEquipment::from(current);
            save.serial_number = serial;
            save.is_active = true;
            save
        }
        None => SaveEquipment::new(tag.as_str(), serial),
    };
    apply_equipment_fields(run, row, &mut save).await?;

    let (equipment, action, outcome) = match existing {
        Some(current) => {
            let updated = run.store.update_equipment(current.id, &save).await?;
            run.record_updated(row_number);
            run.tally
                .warning(format!("Row {row_number}: updated existing record '{tag}'"));
            let action = if current.is_active {
                actions::IMPORT_UPDATE
            } else {
                tracing::info!(run_id = %run.run_id, tag = %tag, "Reactivated inactive equipment");
                actions::IMPORT_REACTIVATE
            };
            (updated, action, RowOutcome::Updated)
        }
        None => {
            let created = run.store.create_equipment(&save).await?;
            run.record_imported(row_number);
            (created, actions::IMPORT_CREATE, RowOutcome::Created)
        }
    };

    apply_tech_config(run, row, equipment.id).await?;
    let description = import_description(run.request.kind, row_number, &tag);
    audit(run, equipment.id, action, description).await?;
    Ok(outcome)
}

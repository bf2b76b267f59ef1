//! Field application shared by the equipment variants.

use assetdesk_core::fields::{Field, NETWORK_IDENTITY_FIELDS};
use assetdesk_core::parse::{non_empty, parse_currency, parse_date};
use assetdesk_core::sheet::RowFields;
use assetdesk_core::types::DbId;
use assetdesk_db::models::audit::CreateAuditLog;
use assetdesk_db::models::equipment::SaveEquipment;
use assetdesk_db::models::location::Location;
use assetdesk_db::models::tech_config::SaveTechConfiguration;

use crate::engine::ImportRun;
use crate::error::StoreError;
use crate::store::InventoryStore;

/// Assigned email recorded when a row names a user but no address.
pub(crate) const NO_EMAIL_ON_FILE: &str = "No email on file";

/// Copy a row's descriptive, classification, assignment and placement
/// fields onto `save`. The natural key is left alone.
pub(crate) async fn apply_equipment_fields<S>(
    run: &mut ImportRun<'_, S>,
    row: &impl RowFields,
    save: &mut SaveEquipment,
) -> Result<(), StoreError>
where
    S: InventoryStore + ?Sized,
{
    save.model = non_empty(&row.get(Field::Model));
    save.manufacturer = non_empty(&row.get(Field::Manufacturer));
    save.unit = non_empty(&row.get(Field::Unit));
    save.notes = non_empty(&row.get(Field::Notes));

    // Unparseable typed values leave whatever is already there.
    if let Some(date) = parse_date(&row.get(Field::PurchaseDate)) {
        save.purchase_date = Some(date);
    }
    if let Some(cost) = parse_currency(&row.get(Field::PurchaseCost)) {
        save.purchase_cost = Some(cost);
    }
    if let Some(date) = parse_date(&row.get(Field::WarrantyExpiry)) {
        save.warranty_expiry = Some(date);
    }

    save.category_id = match non_empty(&row.get(Field::Category)) {
        Some(name) => run.store.find_category_by_name(&name).await?.map(|c| c.id),
        None => None,
    };
    save.status_id = match non_empty(&row.get(Field::Status)) {
        Some(name) => run.store.find_status_by_name(&name).await?.map(|s| s.id),
        None => None,
    };

    apply_assignment(run, row, save).await?;
    apply_placement(run, row, save).await?;
    Ok(())
}

/// Resolve the assigned user. A directory match wins over the row's text.
async fn apply_assignment<S>(
    run: &mut ImportRun<'_, S>,
    row: &impl RowFields,
    save: &mut SaveEquipment,
) -> Result<(), StoreError>
where
    S: InventoryStore + ?Sized,
{
    let Some(name) = non_empty(&row.get(Field::AssignedUserName)) else {
        return Ok(());
    };
    match non_empty(&row.get(Field::AssignedUserEmail)) {
        Some(email) => match run.store.find_directory_account_by_email(&email).await? {
            Some(account) => {
                save.assigned_name = Some(account.display_name.clone());
                save.assigned_email = Some(account.email().to_string());
                save.directory_account_id = Some(account.id);
            }
            None => {
                save.assigned_name = Some(name);
                save.assigned_email = Some(email);
                save.directory_account_id = None;
            }
        },
        None => {
            save.assigned_name = Some(name);
            save.assigned_email = Some(NO_EMAIL_ON_FILE.to_string());
            save.directory_account_id = None;
        }
    }
    Ok(())
}

/// Resolve location, floor plan and desk.
///
/// When a location resolves, floor plan and desk are always rewritten
/// (possibly to `None`) so the three references stay consistent. When it
/// does not, all three are left untouched.
async fn apply_placement<S>(
    run: &mut ImportRun<'_, S>,
    row: &impl RowFields,
    save: &mut SaveEquipment,
) -> Result<(), StoreError>
where
    S: InventoryStore + ?Sized,
{
    let default_id = run.default_location.as_ref().map(|location| location.id);
    let location_id = match default_id {
        Some(id) => Some(id),
        None => match non_empty(&row.get(Field::Location)) {
            Some(text) => match_location(run.locations().await?, &text),
            None => None,
        },
    };
    let Some(location_id) = location_id else {
        return Ok(());
    };

    let floor_plan_id = match non_empty(&row.get(Field::Floor)) {
        Some(floor) => run
            .store
            .find_floor_plan(location_id, &floor)
            .await?
            .map(|f| f.id),
        None => None,
    };
    let desk_id = match (floor_plan_id, non_empty(&row.get(Field::Desk))) {
        (Some(floor_plan_id), Some(desk)) => run
            .store
            .find_desk(floor_plan_id, &desk)
            .await?
            .map(|d| d.id),
        _ => None,
    };

    save.location_id = Some(location_id);
    save.floor_plan_id = floor_plan_id;
    save.desk_id = desk_id;
    Ok(())
}

/// First location whose name contains `text`. Case-sensitive.
fn match_location(locations: &[Location], text: &str) -> Option<DbId> {
    locations
        .iter()
        .find(|location| location.name.contains(text))
        .map(|location| location.id)
}

/// `true` if the row carries a hostname, IP address or MAC address.
pub(crate) fn has_network_identity(row: &impl RowFields) -> bool {
    NETWORK_IDENTITY_FIELDS.iter().any(|field| row.has(*field))
}

/// Every configuration field as the row states it. Blank cells clear.
pub(crate) fn tech_config_from_row(row: &impl RowFields) -> SaveTechConfiguration {
    SaveTechConfiguration {
        hostname: non_empty(&row.get(Field::Hostname)),
        ipv4_address: non_empty(&row.get(Field::IpAddress)),
        mac_address: non_empty(&row.get(Field::MacAddress)),
        switch_port: non_empty(&row.get(Field::SwitchPort)),
        wall_port: non_empty(&row.get(Field::WallPort)),
        phone_number: non_empty(&row.get(Field::PhoneNumber)),
        extension: non_empty(&row.get(Field::Extension)),
        imei: non_empty(&row.get(Field::Imei)),
        sim_number: non_empty(&row.get(Field::SimCardNumber)),
    }
}

/// Overwrite the equipment's configuration when the row has a network
/// identity. Returns whether anything was written.
pub(crate) async fn apply_tech_config<S>(
    run: &mut ImportRun<'_, S>,
    row: &impl RowFields,
    equipment_id: DbId,
) -> Result<bool, StoreError>
where
    S: InventoryStore + ?Sized,
{
    if !has_network_identity(row) {
        return Ok(false);
    }
    run.store
        .upsert_tech_config(equipment_id, &tech_config_from_row(row))
        .await?;
    Ok(true)
}

pub(crate) async fn audit<S>(
    run: &mut ImportRun<'_, S>,
    equipment_id: DbId,
    action: &str,
    description: String,
) -> Result<(), StoreError>
where
    S: InventoryStore + ?Sized,
{
    let entry = CreateAuditLog {
        equipment_id,
        action: action.to_string(),
        actor: run.request.actor.clone(),
        description,
    };
    run.store.append_audit(&entry).await
}

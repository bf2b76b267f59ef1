//! People import: header-mapped upsert of directory accounts.
//!
//! Accounts are keyed by object id, falling back to principal name. Rows
//! are never flagged; when a file names the same account twice, the later
//! row wins.

use assetdesk_core::fields::Field;
use assetdesk_core::parse::{non_empty, parse_flag};
use assetdesk_core::sheet::RowFields;
use assetdesk_db::models::directory::{CreatePerson, DirectoryAccount, SaveDirectoryAccount};

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
    let object_id = non_empty(&row.get(Field::ObjectId));
    let upn = non_empty(&row.get(Field::UserPrincipalName));
    if object_id.is_none() && upn.is_none() {
        return Ok(RowOutcome::Skipped);
    }

    let existing = find_existing(run, object_id.as_deref(), upn.as_deref()).await?;
    let save = account_from_row(row, object_id, upn, existing.as_ref());

    match existing {
        Some(current) => {
            run.store.update_directory_account(current.id, &save).await?;
            run.record_updated(row_number);
            Ok(RowOutcome::Updated)
        }
        None => {
            let account = run.store.create_directory_account(&save).await?;
            run.record_imported(row_number);
            run.store
                .create_person(&CreatePerson {
                    name: account.display_name.clone(),
                    email: Some(account.email().to_string()),
                    directory_account_id: Some(account.id),
                    is_supervisor: Some(false),
                })
                .await?;
            Ok(RowOutcome::Created)
        }
    }
}

/// Look up by object id first, then by principal name.
async fn find_existing<S>(
    run: &mut ImportRun<'_, S>,
    object_id: Option<&str>,
    upn: Option<&str>,
) -> Result<Option<DirectoryAccount>, StoreError>
where
    S: InventoryStore + ?Sized,
{
    if let Some(object_id) = object_id {
        if let Some(found) = run
            .store
            .find_directory_account(Some(object_id), upn.unwrap_or_default())
            .await?
        {
            return Ok(Some(found));
        }
    }
    match upn {
        Some(upn) => run.store.find_directory_account(None, upn).await,
        None => Ok(None),
    }
}

/// Build the saved account. Row values replace stored ones; the principal
/// name, display name and enabled flag fall back to the stored account (or
/// sensible defaults) when the row leaves them blank.
fn account_from_row(
    row: &impl RowFields,
    object_id: Option<String>,
    upn: Option<String>,
    existing: Option<&DirectoryAccount>,
) -> SaveDirectoryAccount {
    let mail = non_empty(&row.get(Field::Mail));
    let user_principal_name = upn
        .or_else(|| existing.map(|a| a.user_principal_name.clone()))
        .or_else(|| mail.clone())
        .or_else(|| object_id.clone())
        .unwrap_or_default();
    let display_name = non_empty(&row.get(Field::DisplayName))
        .or_else(|| existing.map(|a| a.display_name.clone()))
        .unwrap_or_else(|| user_principal_name.clone());
    let account_enabled = parse_flag(&row.get(Field::AccountEnabled))
        .or_else(|| existing.map(|a| a.account_enabled))
        .unwrap_or(true);

    SaveDirectoryAccount {
        object_id: object_id.or_else(|| existing.and_then(|a| a.object_id.clone())),
        user_principal_name,
        display_name,
        mail,
        job_title: non_empty(&row.get(Field::JobTitle)),
        department: non_empty(&row.get(Field::Unit)),
        office_location: non_empty(&row.get(Field::OfficeLocation)),
        mobile_phone: non_empty(&row.get(Field::MobilePhone)),
        account_enabled,
    }
}

//! Repository for the `equipment` table.

use assetdesk_core::audit::{actions, field_change_description};
use assetdesk_core::edit::EquipmentField;
use assetdesk_core::error::CoreError;
use assetdesk_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::error::DbError;
use crate::models::audit::CreateAuditLog;
use crate::models::equipment::{Equipment, SaveEquipment};
use crate::repositories::AuditLogRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tag, serial_number, manufacturer, model, category_id, status_id, \
    location_id, floor_plan_id, desk_id, assigned_name, assigned_email, directory_account_id, \
    unit, notes, purchase_date, purchase_cost, warranty_expiry, is_active, created_at, updated_at";

/// Provides reads and writes for equipment records.
pub struct EquipmentRepo;

impl EquipmentRepo {
    /// Insert a new equipment record, returning the created row.
    pub async fn create<'e, E>(db: E, input: &SaveEquipment) -> Result<Equipment, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO equipment
                (tag, serial_number, manufacturer, model, category_id, status_id,
                 location_id, floor_plan_id, desk_id, assigned_name, assigned_email,
                 directory_account_id, unit, notes, purchase_date, purchase_cost,
                 warranty_expiry, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(&input.tag)
            .bind(&input.serial_number)
            .bind(&input.manufacturer)
            .bind(&input.model)
            .bind(input.category_id)
            .bind(input.status_id)
            .bind(input.location_id)
            .bind(input.floor_plan_id)
            .bind(input.desk_id)
            .bind(&input.assigned_name)
            .bind(&input.assigned_email)
            .bind(input.directory_account_id)
            .bind(&input.unit)
            .bind(&input.notes)
            .bind(input.purchase_date)
            .bind(input.purchase_cost)
            .bind(input.warranty_expiry)
            .bind(input.is_active)
            .fetch_one(db)
            .await
    }

    pub async fn find_by_id<'e, E>(db: E, id: DbId) -> Result<Option<Equipment>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM equipment WHERE id = $1");
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Find by tag, active or inactive.
    pub async fn find_by_tag<'e, E>(db: E, tag: &str) -> Result<Option<Equipment>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM equipment WHERE tag = $1");
        sqlx::query_as::<_, Equipment>(&query)
            .bind(tag)
            .fetch_optional(db)
            .await
    }

    /// Overwrite every writable column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e, E>(
        db: E,
        id: DbId,
        input: &SaveEquipment,
    ) -> Result<Option<Equipment>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE equipment SET
                tag = $2,
                serial_number = $3,
                manufacturer = $4,
                model = $5,
                category_id = $6,
                status_id = $7,
                location_id = $8,
                floor_plan_id = $9,
                desk_id = $10,
                assigned_name = $11,
                assigned_email = $12,
                directory_account_id = $13,
                unit = $14,
                notes = $15,
                purchase_date = $16,
                purchase_cost = $17,
                warranty_expiry = $18,
                is_active = $19,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .bind(&input.tag)
            .bind(&input.serial_number)
            .bind(&input.manufacturer)
            .bind(&input.model)
            .bind(input.category_id)
            .bind(input.status_id)
            .bind(input.location_id)
            .bind(input.floor_plan_id)
            .bind(input.desk_id)
            .bind(&input.assigned_name)
            .bind(&input.assigned_email)
            .bind(input.directory_account_id)
            .bind(&input.unit)
            .bind(&input.notes)
            .bind(input.purchase_date)
            .bind(input.purchase_cost)
            .bind(input.warranty_expiry)
            .bind(input.is_active)
            .fetch_optional(db)
            .await
    }

    /// Apply a single inline edit and record it in the audit trail.
    ///
    /// The raw text is parsed for the field's kind; bad input is a
    /// validation error and nothing is written. The update and its audit
    /// entry commit together.
    pub async fn edit_field(
        pool: &PgPool,
        id: DbId,
        field: EquipmentField,
        raw: &str,
        actor: &str,
    ) -> Result<Equipment, DbError> {
        let value = field.parse(raw)?;
        let new_display = value.display();

        let mut tx = pool.begin().await?;
        let existing = Self::find_by_id(&mut *tx, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "equipment",
                id,
            })?;

        let mut save = SaveEquipment::from(&existing);
        let old_display = save.apply_edit(field, value)?;
        let updated = Self::update(&mut *tx, id, &save)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "equipment",
                id,
            })?;

        AuditLogRepo::create(
            &mut *tx,
            &CreateAuditLog {
                equipment_id: id,
                action: actions::FIELD_EDIT.to_string(),
                actor: actor.to_string(),
                description: field_change_description(field.as_str(), &old_display, &new_display),
            },
        )
        .await?;
        tx.commit().await?;

        tracing::info!(equipment_id = id, field = %field, actor, "Equipment field edited");
        Ok(updated)
    }
}

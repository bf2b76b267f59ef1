//! Repository for the append-only `audit_logs` table.

use assetdesk_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::audit::{AuditLog, CreateAuditLog};

const COLUMNS: &str = "id, equipment_id, action, actor, description, created_at";

/// Insert and read audit entries. There is no update or delete.
pub struct AuditLogRepo;

impl AuditLogRepo {
    pub async fn create<'e, E>(db: E, input: &CreateAuditLog) -> Result<AuditLog, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO audit_logs (equipment_id, action, actor, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(input.equipment_id)
            .bind(&input.action)
            .bind(&input.actor)
            .bind(&input.description)
            .fetch_one(db)
            .await
    }

    /// Entries for one equipment record, oldest first.
    pub async fn list_by_equipment<'e, E>(
        db: E,
        equipment_id: DbId,
    ) -> Result<Vec<AuditLog>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs
             WHERE equipment_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(equipment_id)
            .fetch_all(db)
            .await
    }
}

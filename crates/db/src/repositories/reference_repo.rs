//! Repositories for the `equipment_categories` and `equipment_statuses`
//! lookup tables.

use sqlx::PgExecutor;

use crate::models::reference::{Category, EquipmentStatus};

const COLUMNS: &str = "id, name, created_at";

/// Lookups and inserts for equipment categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Find a category by name, ignoring case.
    pub async fn find_by_name<'e, E>(db: E, name: &str) -> Result<Option<Category>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query =
            format!("SELECT {COLUMNS} FROM equipment_categories WHERE LOWER(name) = LOWER($1)");
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_optional(db)
            .await
    }

    pub async fn create<'e, E>(db: E, name: &str) -> Result<Category, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query =
            format!("INSERT INTO equipment_categories (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_one(db)
            .await
    }
}

/// Lookups and inserts for equipment statuses.
pub struct StatusRepo;

impl StatusRepo {
    /// Find a status by name, ignoring case.
    pub async fn find_by_name<'e, E>(
        db: E,
        name: &str,
    ) -> Result<Option<EquipmentStatus>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query =
            format!("SELECT {COLUMNS} FROM equipment_statuses WHERE LOWER(name) = LOWER($1)");
        sqlx::query_as::<_, EquipmentStatus>(&query)
            .bind(name)
            .fetch_optional(db)
            .await
    }
}

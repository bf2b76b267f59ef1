//! Repository for the location -> floor plan -> desk hierarchy.

use assetdesk_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::location::{
    CreateDesk, CreateFloorPlan, CreateLocation, Desk, FloorPlan, Location,
};

const LOCATION_COLUMNS: &str = "id, name, address, created_at, updated_at";
const FLOOR_PLAN_COLUMNS: &str = "id, location_id, floor_number, name, created_at, updated_at";
const DESK_COLUMNS: &str = "id, floor_plan_id, desk_number, created_at, updated_at";

/// Reads and inserts across locations, floor plans and desks.
pub struct LocationRepo;

impl LocationRepo {
    // -----------------------------------------------------------------------
    // Locations
    // -----------------------------------------------------------------------

    pub async fn create<'e, E>(db: E, input: &CreateLocation) -> Result<Location, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO locations (name, address) VALUES ($1, $2) RETURNING {LOCATION_COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .fetch_one(db)
            .await
    }

    pub async fn find_by_id<'e, E>(db: E, id: DbId) -> Result<Option<Location>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// All locations in id order. Substring matching during import walks
    /// this list, so the order decides which of several matches wins.
    pub async fn list<'e, E>(db: E) -> Result<Vec<Location>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {LOCATION_COLUMNS} FROM locations ORDER BY id");
        sqlx::query_as::<_, Location>(&query).fetch_all(db).await
    }

    // -----------------------------------------------------------------------
    // Floor plans
    // -----------------------------------------------------------------------

    pub async fn create_floor_plan<'e, E>(
        db: E,
        input: &CreateFloorPlan,
    ) -> Result<FloorPlan, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO floor_plans (location_id, floor_number, name)
             VALUES ($1, $2, $3)
             RETURNING {FLOOR_PLAN_COLUMNS}"
        );
        sqlx::query_as::<_, FloorPlan>(&query)
            .bind(input.location_id)
            .bind(&input.floor_number)
            .bind(&input.name)
            .fetch_one(db)
            .await
    }

    /// Exact match on (location, floor number).
    pub async fn find_floor_plan<'e, E>(
        db: E,
        location_id: DbId,
        floor_number: &str,
    ) -> Result<Option<FloorPlan>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {FLOOR_PLAN_COLUMNS} FROM floor_plans
             WHERE location_id = $1 AND floor_number = $2"
        );
        sqlx::query_as::<_, FloorPlan>(&query)
            .bind(location_id)
            .bind(floor_number)
            .fetch_optional(db)
            .await
    }

    // -----------------------------------------------------------------------
    // Desks
    // -----------------------------------------------------------------------

    pub async fn create_desk<'e, E>(db: E, input: &CreateDesk) -> Result<Desk, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO desks (floor_plan_id, desk_number) VALUES ($1, $2) RETURNING {DESK_COLUMNS}"
        );
        sqlx::query_as::<_, Desk>(&query)
            .bind(input.floor_plan_id)
            .bind(&input.desk_number)
            .fetch_one(db)
            .await
    }

    /// Exact match on (floor plan, desk number).
    pub async fn find_desk<'e, E>(
        db: E,
        floor_plan_id: DbId,
        desk_number: &str,
    ) -> Result<Option<Desk>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {DESK_COLUMNS} FROM desks WHERE floor_plan_id = $1 AND desk_number = $2"
        );
        sqlx::query_as::<_, Desk>(&query)
            .bind(floor_plan_id)
            .bind(desk_number)
            .fetch_optional(db)
            .await
    }
}

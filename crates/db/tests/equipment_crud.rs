//! Integration tests for the equipment, reference and location repositories.

use assert_matches::assert_matches;
use assetdesk_core::edit::EquipmentField;
use assetdesk_core::error::CoreError;
use assetdesk_db::error::DbError;
use assetdesk_db::models::equipment::SaveEquipment;
use assetdesk_db::models::location::{CreateDesk, CreateFloorPlan, CreateLocation};
use assetdesk_db::models::tech_config::SaveTechConfiguration;
use assetdesk_db::repositories::{
    AuditLogRepo, CategoryRepo, EquipmentRepo, LocationRepo, StatusRepo, TechConfigRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_by_tag(pool: PgPool) {
    let mut input = SaveEquipment::new("OATH-100", "SN100");
    input.model = Some("Latitude 5440".to_string());
    input.purchase_cost = Some(1299.99);
    let created = EquipmentRepo::create(&pool, &input).await.unwrap();
    assert!(created.is_active);

    let found = EquipmentRepo::find_by_tag(&pool, "OATH-100")
        .await
        .unwrap()
        .expect("tag should be found");
    assert_eq!(found.id, created.id);
    assert_eq!(found.model.as_deref(), Some("Latitude 5440"));
    assert_eq!(found.purchase_cost, Some(1299.99));

    assert!(EquipmentRepo::find_by_tag(&pool, "OATH-999")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_tag_includes_inactive(pool: PgPool) {
    let mut input = SaveEquipment::new("OATH-200", "SN200");
    input.is_active = false;
    EquipmentRepo::create(&pool, &input).await.unwrap();

    let found = EquipmentRepo::find_by_tag(&pool, "OATH-200").await.unwrap();
    assert_matches!(found, Some(e) if !e.is_active);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_tag_rejected(pool: PgPool) {
    EquipmentRepo::create(&pool, &SaveEquipment::new("OATH-300", "A"))
        .await
        .unwrap();
    let err = EquipmentRepo::create(&pool, &SaveEquipment::new("OATH-300", "B"))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("uq_equipment_tag"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_overwrites_columns(pool: PgPool) {
    let created = EquipmentRepo::create(&pool, &SaveEquipment::new("OATH-400", "SN400"))
        .await
        .unwrap();
    let mut save = SaveEquipment::from(&created);
    save.notes = Some("moved to storage".to_string());
    save.is_active = false;

    let updated = EquipmentRepo::update(&pool, created.id, &save)
        .await
        .unwrap()
        .expect("row exists");
    assert_eq!(updated.notes.as_deref(), Some("moved to storage"));
    assert!(!updated.is_active);
    assert!(updated.updated_at >= created.updated_at);

    assert!(EquipmentRepo::update(&pool, 999_999, &save)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Inline edit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_edit_field_updates_and_audits(pool: PgPool) {
    let mut input = SaveEquipment::new("OATH-500", "SN500");
    input.model = Some("Old".to_string());
    let created = EquipmentRepo::create(&pool, &input).await.unwrap();

    let edited = EquipmentRepo::edit_field(&pool, created.id, EquipmentField::Model, "New", "alice")
        .await
        .unwrap();
    assert_eq!(edited.model.as_deref(), Some("New"));

    let logs = AuditLogRepo::list_by_equipment(&pool, created.id)
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "field_edit");
    assert_eq!(logs[0].actor, "alice");
    assert_eq!(logs[0].description, "Changed model from 'Old' to 'New'");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_edit_field_rejects_bad_value(pool: PgPool) {
    let created = EquipmentRepo::create(&pool, &SaveEquipment::new("OATH-600", "SN600"))
        .await
        .unwrap();

    let result = EquipmentRepo::edit_field(
        &pool,
        created.id,
        EquipmentField::PurchaseDate,
        "next tuesday",
        "alice",
    )
    .await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));

    let logs = AuditLogRepo::list_by_equipment(&pool, created.id)
        .await
        .unwrap();
    assert!(logs.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_edit_field_missing_equipment(pool: PgPool) {
    let result =
        EquipmentRepo::edit_field(&pool, 424_242, EquipmentField::Notes, "x", "alice").await;
    assert_matches!(
        result,
        Err(DbError::Core(CoreError::NotFound { entity: "equipment", .. }))
    );
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reference_lookup_ignores_case(pool: PgPool) {
    let laptop = CategoryRepo::create(&pool, "Laptop").await.unwrap();
    let found = CategoryRepo::find_by_name(&pool, "LAPTOP").await.unwrap();
    assert_matches!(found, Some(c) if c.id == laptop.id);

    // Seeded by the first migration.
    let in_use = StatusRepo::find_by_name(&pool, "in use").await.unwrap();
    assert_matches!(in_use, Some(s) if s.name == "In Use");
    assert!(StatusRepo::find_by_name(&pool, "Lost").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_location_hierarchy_lookups(pool: PgPool) {
    let hq = LocationRepo::create(
        &pool,
        &CreateLocation {
            name: "Headquarters".to_string(),
            address: None,
        },
    )
    .await
    .unwrap();
    let floor = LocationRepo::create_floor_plan(
        &pool,
        &CreateFloorPlan {
            location_id: hq.id,
            floor_number: "3".to_string(),
            name: None,
        },
    )
    .await
    .unwrap();
    let desk = LocationRepo::create_desk(
        &pool,
        &CreateDesk {
            floor_plan_id: floor.id,
            desk_number: "3-14".to_string(),
        },
    )
    .await
    .unwrap();

    let listed = LocationRepo::list(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_matches!(
        LocationRepo::find_floor_plan(&pool, hq.id, "3").await.unwrap(),
        Some(f) if f.id == floor.id
    );
    assert!(LocationRepo::find_floor_plan(&pool, hq.id, "4")
        .await
        .unwrap()
        .is_none());
    assert_matches!(
        LocationRepo::find_desk(&pool, floor.id, "3-14").await.unwrap(),
        Some(d) if d.id == desk.id
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tech_config_upsert_overwrites(pool: PgPool) {
    let equipment = EquipmentRepo::create(&pool, &SaveEquipment::new("OATH-700", "SN700"))
        .await
        .unwrap();

    let first = TechConfigRepo::upsert(
        &pool,
        equipment.id,
        &SaveTechConfiguration {
            hostname: Some("ws-700".to_string()),
            imei: Some("3567".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let second = TechConfigRepo::upsert(
        &pool,
        equipment.id,
        &SaveTechConfiguration {
            ipv4_address: Some("10.1.2.3".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.hostname, None);
    assert_eq!(second.imei, None);
    assert_eq!(second.ipv4_address.as_deref(), Some("10.1.2.3"));
}

//! Integration tests for student and location lookups.

use assert_matches::assert_matches;
use hallpass_db::repositories::{LocationRepo, StudentRepo};
use hallpass_db::store::{AttendanceStore, SqliteStore};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn find_by_credentials(pool: SqlitePool) {
    let by_qr = StudentRepo::find_by_qr_value(&pool, "QR-ALAN").await.unwrap().unwrap();
    assert_eq!(by_qr.id, 2);

    let by_card = StudentRepo::find_by_card_uid(&pool, "CARD-GRACE")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_card.full_name, "Grace Hopper");

    // Exact match only.
    assert!(StudentRepo::find_by_qr_value(&pool, "qr-alan").await.unwrap().is_none());
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn card_holder_excludes_target(pool: SqlitePool) {
    let holder = StudentRepo::find_card_holder(&pool, "CARD-ADA", 2).await.unwrap();
    assert_eq!(holder.map(|s| s.id), Some(1));

    let self_holder = StudentRepo::find_card_holder(&pool, "CARD-ADA", 1).await.unwrap();
    assert!(self_holder.is_none());
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn assign_card_updates_row(pool: SqlitePool) {
    let updated = StudentRepo::assign_card(&pool, 2, "CARD-ALAN")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.card_uid.as_deref(), Some("CARD-ALAN"));

    let missing = StudentRepo::assign_card(&pool, 999, "CARD-X").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn assign_card_enforces_uniqueness_in_store(pool: SqlitePool) {
    let result = StudentRepo::assign_card(&pool, 2, "CARD-ADA").await;
    assert_matches!(result, Err(sqlx::Error::Database(err)) if err.is_unique_violation());
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn active_lookup_skips_inactive(pool: SqlitePool) {
    assert!(LocationRepo::find_active_by_id(&pool, 4).await.unwrap().is_none());
    assert!(LocationRepo::find_by_id(&pool, 4).await.unwrap().is_some());
    assert!(LocationRepo::find_active_by_school_code(&pool, 1, "GYM")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn code_lookup_scoped_and_global(pool: SqlitePool) {
    let south = LocationRepo::find_active_by_school_code(&pool, 2, "LIB")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(south.name, "South Library");

    // Unscoped lookup of a repeated code picks the lowest id.
    let global = LocationRepo::find_active_by_code(&pool, "LIB").await.unwrap().unwrap();
    assert_eq!(global.id, 2);
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn list_filters_by_school_and_active(pool: SqlitePool) {
    let school_one = LocationRepo::list(&pool, Some(1), false).await.unwrap();
    let codes: Vec<&str> = school_one.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["LIB", "ROOM-101"]);

    let with_inactive = LocationRepo::list(&pool, Some(1), true).await.unwrap();
    assert_eq!(with_inactive.len(), 3);

    let everywhere = LocationRepo::list(&pool, None, false).await.unwrap();
    assert_eq!(everywhere.len(), 4);
}

// ---------------------------------------------------------------------------
// Store seam
// ---------------------------------------------------------------------------

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn sqlite_store_routes_code_lookup_by_scope(pool: SqlitePool) {
    let store = SqliteStore::new(pool);

    let scoped = store
        .find_active_location_by_code("LIB", Some(2))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(scoped.id, 3);

    let global = store.find_active_location_by_code("LIB", None).await.unwrap().unwrap();
    assert_eq!(global.id, 2);

    store.health_check().await.unwrap();
}

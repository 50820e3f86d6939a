//! Integration tests for `POST /api/v1/scans/{qr,nfc}`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::SqlitePool;

async fn scan(pool: &SqlitePool, kind: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = post_json(build_test_app(pool.clone()), &format!("/api/v1/scans/{kind}"), body).await;
    let status = response.status();
    (status, body_json(response).await)
}

async fn event_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM scan_events")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Recording
// ---------------------------------------------------------------------------

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn qr_scan_returns_201_receipt(pool: SqlitePool) {
    let (status, json) = scan(
        &pool,
        "qr",
        json!({ "qr_value": "QR-ADA", "location_code": "ROOM-101", "device_label": "door-a" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let data = &json["data"];
    assert!(data["event_id"].as_i64().unwrap() > 0);
    assert_eq!(data["direction"], "ENTRY");
    assert_eq!(data["source"], "QR");
    assert_eq!(data["device_label"], "door-a");
    assert_eq!(data["student"]["id"], 1);
    assert_eq!(data["student"]["full_name"], "Ada Lovelace");
    assert_eq!(data["student"]["school_id"], 1);
    assert_eq!(data["location"]["id"], 1);
    assert_eq!(data["location"]["name"], "Room 101");
    assert_eq!(data["location"]["code"], "ROOM-101");
    assert!(data["scanned_at"].is_string());
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn mixed_sources_alternate_direction(pool: SqlitePool) {
    let qr = json!({ "qr_value": "QR-ADA", "location_id": 2 });
    let nfc = json!({ "card_uid": "CARD-ADA", "location_id": 2 });

    let (_, first) = scan(&pool, "qr", qr.clone()).await;
    let (_, second) = scan(&pool, "nfc", nfc.clone()).await;
    let (_, third) = scan(&pool, "nfc", nfc).await;
    let (_, fourth) = scan(&pool, "qr", qr).await;

    assert_eq!(first["data"]["direction"], "ENTRY");
    assert_eq!(second["data"]["direction"], "EXIT");
    assert_eq!(second["data"]["source"], "NFC");
    assert_eq!(third["data"]["direction"], "ENTRY");
    assert_eq!(fourth["data"]["direction"], "EXIT");
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn explicit_direction_is_case_insensitive(pool: SqlitePool) {
    let (status, json) = scan(
        &pool,
        "qr",
        json!({ "qr_value": "QR-ADA", "location_code": "ROOM-101", "direction": "exit" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["direction"], "EXIT");
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn code_is_scoped_to_students_school(pool: SqlitePool) {
    let (_, ada) = scan(&pool, "qr", json!({ "qr_value": "QR-ADA", "location_code": "LIB" })).await;
    let (_, grace) = scan(&pool, "nfc", json!({ "card_uid": "CARD-GRACE", "location_code": "LIB" })).await;

    assert_eq!(ada["data"]["location"]["name"], "North Library");
    assert_eq!(grace["data"]["location"]["name"], "South Library");
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn explicit_school_overrides_students_school(pool: SqlitePool) {
    let (status, json) = scan(
        &pool,
        "qr",
        json!({ "qr_value": "QR-ADA", "location_code": "NURSE", "school_id": 2 }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["location"]["id"], 5);
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn location_id_takes_precedence_over_code(pool: SqlitePool) {
    let (_, json) = scan(
        &pool,
        "qr",
        json!({ "qr_value": "QR-ADA", "location_id": 1, "location_code": "LIB" }),
    )
    .await;

    assert_eq!(json["data"]["location"]["code"], "ROOM-101");
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn missing_or_blank_credential_is_400(pool: SqlitePool) {
    let (status, json) = scan(&pool, "qr", json!({ "location_id": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // A QR value posted to the NFC endpoint is not a card UID.
    let (status, _) = scan(&pool, "nfc", json!({ "qr_value": "QR-ADA", "location_id": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = scan(&pool, "nfc", json!({ "card_uid": "   ", "location_id": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(event_count(&pool).await, 0);
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn missing_location_selector_is_400(pool: SqlitePool) {
    let (status, json) = scan(&pool, "qr", json!({ "qr_value": "QR-ADA" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "location_code or location_id is required");
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn invalid_direction_is_400(pool: SqlitePool) {
    let (status, json) = scan(
        &pool,
        "qr",
        json!({ "qr_value": "QR-ADA", "location_id": 1, "direction": "sideways" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("SIDEWAYS"));
    assert_eq!(event_count(&pool).await, 0);
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn overlong_device_label_is_400(pool: SqlitePool) {
    let (status, _) = scan(
        &pool,
        "qr",
        json!({ "qr_value": "QR-ADA", "location_id": 1, "device_label": "x".repeat(101) }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = scan(
        &pool,
        "qr",
        json!({ "qr_value": "QR-ADA", "location_id": 1, "device_label": "x".repeat(100) }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn unknown_credential_is_404(pool: SqlitePool) {
    let (status, json) = scan(&pool, "nfc", json!({ "card_uid": "CARD-NOBODY", "location_id": 1 })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Student with card_uid 'CARD-NOBODY' not found");
    assert_eq!(event_count(&pool).await, 0);
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn inactive_location_is_404(pool: SqlitePool) {
    let (status, json) = scan(&pool, "qr", json!({ "qr_value": "QR-ADA", "location_code": "GYM" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Location with code 'GYM' not found");

    let (status, _) = scan(&pool, "qr", json!({ "qr_value": "QR-ADA", "location_id": 4 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(event_count(&pool).await, 0);
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn code_from_other_school_is_404_when_scoped(pool: SqlitePool) {
    // NURSE exists only in school 2; Ada is in school 1.
    let (status, _) = scan(&pool, "qr", json!({ "qr_value": "QR-ADA", "location_code": "NURSE" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn scan_in_then_out_empties_location(pool: SqlitePool) {
    let body = json!({ "qr_value": "QR-ALAN", "location_code": "ROOM-101" });
    scan(&pool, "qr", body.clone()).await;

    let json = body_json(get(build_test_app(pool.clone()), "/api/v1/locations/1/occupants").await).await;
    assert_eq!(json["data"]["count"], 1);

    scan(&pool, "qr", body).await;

    let json = body_json(get(build_test_app(pool.clone()), "/api/v1/locations/1/occupants").await).await;
    assert_eq!(json["data"]["count"], 0);
    assert_eq!(json["data"]["occupants"], json!([]));
}

#[sqlx::test(
    migrations = "../../db/migrations",
    fixtures(path = "../../../db/fixtures", scripts("campus"))
)]
async fn padded_credential_does_not_match(pool: SqlitePool) {
    let (status, json) = scan(&pool, "qr", json!({ "qr_value": "QR-ADA  ", "location_id": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Student with qr_value 'QR-ADA  ' not found");

    let (status, _) = scan(&pool, "nfc", json!({ "card_uid": " CARD-ADA", "location_id": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(event_count(&pool).await, 0);
}

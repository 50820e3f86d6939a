//! Scan event model, insert DTO, and read projections.

use hallpass_core::attendance::{Direction, ScanSource};
use hallpass_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `scan_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScanEvent {
    pub id: DbId,
    pub student_id: DbId,
    pub location_id: DbId,
    #[sqlx(try_from = "String")]
    pub direction: Direction,
    #[sqlx(try_from = "String")]
    pub source: ScanSource,
    pub device_label: Option<String>,
    pub scanned_at: Timestamp,
}

/// DTO for appending a scan event. `scanned_at` is assigned by the store.
#[derive(Debug, Clone)]
pub struct CreateScanEvent {
    pub student_id: DbId,
    pub location_id: DbId,
    pub direction: Direction,
    pub source: ScanSource,
    pub device_label: Option<String>,
}

/// A student's latest scan joined with the location it happened at.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LatestScan {
    pub event_id: DbId,
    pub location_id: DbId,
    pub location_name: String,
    pub location_code: String,
    #[sqlx(try_from = "String")]
    pub direction: Direction,
    pub scanned_at: Timestamp,
}

/// One student currently inside a location.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Occupant {
    pub student_id: DbId,
    pub full_name: String,
    pub school_id: DbId,
    #[sqlx(try_from = "String")]
    pub direction: Direction,
    pub scanned_at: Timestamp,
}

//! Repository for the append-only `scan_events` table.
//!
//! "Latest" always means `ORDER BY scanned_at DESC, id DESC`: two events
//! stamped in the same millisecond resolve by insertion order.

use hallpass_core::attendance::Direction;
use hallpass_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::scan_event::{CreateScanEvent, LatestScan, Occupant, ScanEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, location_id, direction, source, device_label, scanned_at";

/// Provides append and read operations over the scan event log.
pub struct ScanEventRepo;

impl ScanEventRepo {
    /// Append a new event, returning the stored row with its timestamp.
    pub async fn create(pool: &SqlitePool, input: &CreateScanEvent) -> Result<ScanEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO scan_events (student_id, location_id, direction, source, device_label) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScanEvent>(&query)
            .bind(input.student_id)
            .bind(input.location_id)
            .bind(input.direction.as_str())
            .bind(input.source.as_str())
            .bind(&input.device_label)
            .fetch_one(pool)
            .await
    }

    /// Latest event for one (student, location) pair.
    pub async fn find_latest_for_pair(
        pool: &SqlitePool,
        student_id: DbId,
        location_id: DbId,
    ) -> Result<Option<ScanEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scan_events \
             WHERE student_id = ? AND location_id = ? \
             ORDER BY scanned_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, ScanEvent>(&query)
            .bind(student_id)
            .bind(location_id)
            .fetch_optional(pool)
            .await
    }

    /// Latest event for a student across all locations, with the location's
    /// name and code.
    pub async fn find_latest_for_student(
        pool: &SqlitePool,
        student_id: DbId,
    ) -> Result<Option<LatestScan>, sqlx::Error> {
        sqlx::query_as::<_, LatestScan>(
            "SELECT e.id AS event_id, e.location_id, \
                    l.name AS location_name, l.code AS location_code, \
                    e.direction, e.scanned_at \
             FROM scan_events e \
             JOIN locations l ON l.id = e.location_id \
             WHERE e.student_id = ? \
             ORDER BY e.scanned_at DESC, e.id DESC \
             LIMIT 1",
        )
        .bind(student_id)
        .fetch_optional(pool)
        .await
    }

    /// Students whose latest event at `location_id` is an entry.
    ///
    /// Ranks each student's events at the location, keeps rank one, and
    /// filters to entries. Ordered by that event's time, newest first.
    /// Recomputed from the full log on every call.
    pub async fn list_occupants(
        pool: &SqlitePool,
        location_id: DbId,
    ) -> Result<Vec<Occupant>, sqlx::Error> {
        sqlx::query_as::<_, Occupant>(
            "WITH ranked AS ( \
                 SELECT e.student_id, e.direction, e.scanned_at, e.id, \
                        ROW_NUMBER() OVER ( \
                            PARTITION BY e.student_id \
                            ORDER BY e.scanned_at DESC, e.id DESC \
                        ) AS rn \
                 FROM scan_events e \
                 WHERE e.location_id = ? \
             ) \
             SELECT s.id AS student_id, s.full_name, s.school_id, \
                    r.direction, r.scanned_at \
             FROM ranked r \
             JOIN students s ON s.id = r.student_id \
             WHERE r.rn = 1 AND r.direction = ? \
             ORDER BY r.scanned_at DESC, r.id DESC",
        )
        .bind(location_id)
        .bind(Direction::Entry.as_str())
        .fetch_all(pool)
        .await
    }

    /// A student's events across all locations, newest first.
    pub async fn list_for_student(
        pool: &SqlitePool,
        student_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ScanEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scan_events \
             WHERE student_id = ? \
             ORDER BY scanned_at DESC, id DESC \
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, ScanEvent>(&query)
            .bind(student_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}

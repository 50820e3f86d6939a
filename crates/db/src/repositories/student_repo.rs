//! Repository for the `students` table.
//!
//! Students are enrolled elsewhere; the only write here is card assignment.

use hallpass_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::student::Student;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, school_id, qr_value, card_uid, created_at, updated_at";

/// Provides lookups and card assignment for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Find a student by its internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = ?");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a student by exact QR credential value.
    pub async fn find_by_qr_value(
        pool: &SqlitePool,
        qr_value: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE qr_value = ?");
        sqlx::query_as::<_, Student>(&query)
            .bind(qr_value)
            .fetch_optional(pool)
            .await
    }

    /// Find a student by exact NFC card UID.
    pub async fn find_by_card_uid(
        pool: &SqlitePool,
        card_uid: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE card_uid = ?");
        sqlx::query_as::<_, Student>(&query)
            .bind(card_uid)
            .fetch_optional(pool)
            .await
    }

    /// Find whoever other than `excluding_id` currently holds `card_uid`.
    pub async fn find_card_holder(
        pool: &SqlitePool,
        card_uid: &str,
        excluding_id: DbId,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE card_uid = ? AND id <> ?");
        sqlx::query_as::<_, Student>(&query)
            .bind(card_uid)
            .bind(excluding_id)
            .fetch_optional(pool)
            .await
    }

    /// Set a student's card UID.
    ///
    /// Returns `None` if no row with the given `id` exists. A UID already
    /// held by another student fails with a unique violation.
    pub async fn assign_card(
        pool: &SqlitePool,
        id: DbId,
        card_uid: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET \
                card_uid = ?, \
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
             WHERE id = ? \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(card_uid)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

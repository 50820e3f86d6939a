//! Repository for the `locations` table.

use hallpass_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::location::Location;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, school_id, code, name, is_active, created_at";

/// Provides read access to locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Find a location by ID regardless of its active flag.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = ?");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active location by ID.
    pub async fn find_active_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = ? AND is_active = 1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active location by code within one school.
    pub async fn find_active_by_school_code(
        pool: &SqlitePool,
        school_id: DbId,
        code: &str,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations \
             WHERE school_id = ? AND code = ? AND is_active = 1"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(school_id)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Find an active location by code across all schools.
    ///
    /// Codes are only unique per school, so this may match several rows;
    /// the lowest ID wins.
    pub async fn find_active_by_code(
        pool: &SqlitePool,
        code: &str,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations \
             WHERE code = ? AND is_active = 1 \
             ORDER BY id \
             LIMIT 1"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List locations, optionally scoped to a school and including inactive ones.
    ///
    /// Ordered by school, then code.
    pub async fn list(
        pool: &SqlitePool,
        school_id: Option<DbId>,
        include_inactive: bool,
    ) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations \
             WHERE (?1 IS NULL OR school_id = ?1) \
               AND (?2 = 1 OR is_active = 1) \
             ORDER BY school_id, code"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(school_id)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }
}

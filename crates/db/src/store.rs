//! The store seam handed to the attendance service.
//!
//! [`AttendanceStore`] names every read and write the service performs.
//! [`SqliteStore`] delegates to the repositories; [`MemoryStore`] keeps the
//! same semantics in process for tests.
//!
//! [`MemoryStore`]: crate::memory::MemoryStore

use async_trait::async_trait;
use hallpass_core::types::DbId;

use crate::models::location::Location;
use crate::models::scan_event::{CreateScanEvent, LatestScan, Occupant, ScanEvent};
use crate::models::student::Student;
use crate::repositories::{LocationRepo, ScanEventRepo, StudentRepo};
use crate::DbPool;

/// Storage operations required by the attendance service.
///
/// Implementations must treat `scan_events` as append-only and order
/// "latest" by timestamp, then insertion order.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn find_student(&self, id: DbId) -> Result<Option<Student>, sqlx::Error>;

    async fn find_student_by_qr(&self, qr_value: &str) -> Result<Option<Student>, sqlx::Error>;

    async fn find_student_by_card(&self, card_uid: &str) -> Result<Option<Student>, sqlx::Error>;

    /// Student other than `excluding_id` holding `card_uid`, if any.
    async fn find_card_holder(
        &self,
        card_uid: &str,
        excluding_id: DbId,
    ) -> Result<Option<Student>, sqlx::Error>;

    /// Set a student's card UID; `None` if the student does not exist.
    async fn assign_card(&self, student_id: DbId, card_uid: &str)
        -> Result<Option<Student>, sqlx::Error>;

    /// Location by ID regardless of its active flag.
    async fn find_location(&self, id: DbId) -> Result<Option<Location>, sqlx::Error>;

    async fn find_active_location(&self, id: DbId) -> Result<Option<Location>, sqlx::Error>;

    /// Active location by code, scoped to `school_id` when given.
    async fn find_active_location_by_code(
        &self,
        code: &str,
        school_id: Option<DbId>,
    ) -> Result<Option<Location>, sqlx::Error>;

    async fn list_locations(
        &self,
        school_id: Option<DbId>,
        include_inactive: bool,
    ) -> Result<Vec<Location>, sqlx::Error>;

    async fn latest_event_for_pair(
        &self,
        student_id: DbId,
        location_id: DbId,
    ) -> Result<Option<ScanEvent>, sqlx::Error>;

    async fn append_event(&self, input: &CreateScanEvent) -> Result<ScanEvent, sqlx::Error>;

    async fn latest_event_for_student(
        &self,
        student_id: DbId,
    ) -> Result<Option<LatestScan>, sqlx::Error>;

    async fn occupants(&self, location_id: DbId) -> Result<Vec<Occupant>, sqlx::Error>;

    async fn events_for_student(
        &self,
        student_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ScanEvent>, sqlx::Error>;

    async fn health_check(&self) -> Result<(), sqlx::Error>;
}

/// [`AttendanceStore`] backed by a SQLite pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for SqliteStore {
    async fn find_student(&self, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        StudentRepo::find_by_id(&self.pool, id).await
    }

    async fn find_student_by_qr(&self, qr_value: &str) -> Result<Option<Student>, sqlx::Error> {
        StudentRepo::find_by_qr_value(&self.pool, qr_value).await
    }

    async fn find_student_by_card(&self, card_uid: &str) -> Result<Option<Student>, sqlx::Error> {
        StudentRepo::find_by_card_uid(&self.pool, card_uid).await
    }

    async fn find_card_holder(
        &self,
        card_uid: &str,
        excluding_id: DbId,
    ) -> Result<Option<Student>, sqlx::Error> {
        StudentRepo::find_card_holder(&self.pool, card_uid, excluding_id).await
    }

    async fn assign_card(
        &self,
        student_id: DbId,
        card_uid: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        StudentRepo::assign_card(&self.pool, student_id, card_uid).await
    }

    async fn find_location(&self, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        LocationRepo::find_by_id(&self.pool, id).await
    }

    async fn find_active_location(&self, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        LocationRepo::find_active_by_id(&self.pool, id).await
    }

    async fn find_active_location_by_code(
        &self,
        code: &str,
        school_id: Option<DbId>,
    ) -> Result<Option<Location>, sqlx::Error> {
        match school_id {
            Some(school_id) => {
                LocationRepo::find_active_by_school_code(&self.pool, school_id, code).await
            }
            None => LocationRepo::find_active_by_code(&self.pool, code).await,
        }
    }

    async fn list_locations(
        &self,
        school_id: Option<DbId>,
        include_inactive: bool,
    ) -> Result<Vec<Location>, sqlx::Error> {
        LocationRepo::list(&self.pool, school_id, include_inactive).await
    }

    async fn latest_event_for_pair(
        &self,
        student_id: DbId,
        location_id: DbId,
    ) -> Result<Option<ScanEvent>, sqlx::Error> {
        ScanEventRepo::find_latest_for_pair(&self.pool, student_id, location_id).await
    }

    async fn append_event(&self, input: &CreateScanEvent) -> Result<ScanEvent, sqlx::Error> {
        ScanEventRepo::create(&self.pool, input).await
    }

    async fn latest_event_for_student(
        &self,
        student_id: DbId,
    ) -> Result<Option<LatestScan>, sqlx::Error> {
        ScanEventRepo::find_latest_for_student(&self.pool, student_id).await
    }

    async fn occupants(&self, location_id: DbId) -> Result<Vec<Occupant>, sqlx::Error> {
        ScanEventRepo::list_occupants(&self.pool, location_id).await
    }

    async fn events_for_student(
        &self,
        student_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ScanEvent>, sqlx::Error> {
        ScanEventRepo::list_for_student(&self.pool, student_id, limit, offset).await
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}

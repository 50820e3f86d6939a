//! Read-only views over the event log: where a student is, who is in a
//! location, and supporting lookups.
//!
//! Nothing here is cached. Each call recomputes from the latest events, which
//! is fine at campus scale but scans the log for the location/student on
//! every request.

use hallpass_core::attendance::PresenceStatus;
use hallpass_core::error::CoreError;
use hallpass_core::types::{DbId, Timestamp};
use hallpass_core::validation::{
    clamp_limit, clamp_offset, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT,
};
use hallpass_db::models::location::{Location, LocationSummary};
use hallpass_db::models::scan_event::{Occupant, ScanEvent};
use hallpass_db::models::student::Student;
use serde::Serialize;

use super::AttendanceService;
use crate::error::AppResult;

/// A student's presence derived from their latest scan anywhere.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentLocation {
    pub student_id: DbId,
    pub status: PresenceStatus,
    /// Current location when inside, last-known location when out.
    pub location: Option<LocationSummary>,
    pub scanned_at: Option<Timestamp>,
}

/// Students currently inside a location.
#[derive(Debug, Clone, Serialize)]
pub struct OccupancyReport {
    pub location_id: DbId,
    pub count: usize,
    pub occupants: Vec<Occupant>,
}

impl AttendanceService {
    /// Fetch a student or fail with not-found.
    pub async fn student(&self, student_id: DbId) -> AppResult<Student> {
        let student = self
            .store
            .find_student(student_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Student",
                id: student_id,
            })?;
        Ok(student)
    }

    /// Where a student is now.
    ///
    /// `UNKNOWN` iff the student has no scans at all.
    pub async fn current_location(&self, student_id: DbId) -> AppResult<CurrentLocation> {
        self.student(student_id).await?;

        let latest = self.store.latest_event_for_student(student_id).await?;
        let status = PresenceStatus::from_latest(latest.as_ref().map(|l| l.direction));

        Ok(CurrentLocation {
            student_id,
            status,
            location: latest.as_ref().map(|l| LocationSummary {
                id: l.location_id,
                name: l.location_name.clone(),
                code: l.location_code.clone(),
            }),
            scanned_at: latest.map(|l| l.scanned_at),
        })
    }

    /// Who is inside a location now.
    ///
    /// The location may be inactive; its history is still readable.
    pub async fn occupants(&self, location_id: DbId) -> AppResult<OccupancyReport> {
        if self.store.find_location(location_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "Location",
                id: location_id,
            }
            .into());
        }

        let occupants = self.store.occupants(location_id).await?;
        tracing::debug!(location_id, count = occupants.len(), "Computed occupancy");

        Ok(OccupancyReport {
            location_id,
            count: occupants.len(),
            occupants,
        })
    }

    /// A student's scans, newest first.
    pub async fn scan_history(
        &self,
        student_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> AppResult<Vec<ScanEvent>> {
        self.student(student_id).await?;
        let limit = clamp_limit(limit, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT);
        let offset = clamp_offset(offset);
        Ok(self
            .store
            .events_for_student(student_id, limit, offset)
            .await?)
    }

    /// Locations, optionally for one school.
    pub async fn locations(
        &self,
        school_id: Option<DbId>,
        include_inactive: bool,
    ) -> AppResult<Vec<Location>> {
        Ok(self.store.list_locations(school_id, include_inactive).await?)
    }
}

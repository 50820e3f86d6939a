//! In-process [`AttendanceStore`] for tests.
//!
//! Mirrors the SQLite semantics:
//!
//! - timestamps are assigned on append and never go backwards;
//! - "latest" ties break on ID;
//! - lookups by code honour the active flag;
//! - a card UID belongs to at most one student.
//!
//! Seeding methods stand in for the external enrollment process.

use std::collections::HashMap;
use std::error::Error as StdError;

use async_trait::async_trait;
use chrono::Utc;
use hallpass_core::attendance::Direction;
use hallpass_core::types::{DbId, Timestamp};
use sqlx::error::{DatabaseError, ErrorKind};
use tokio::sync::RwLock;

use crate::models::location::Location;
use crate::models::scan_event::{CreateScanEvent, LatestScan, Occupant, ScanEvent};
use crate::models::student::Student;
use crate::store::AttendanceStore;

#[derive(Default)]
struct Inner {
    students: Vec<Student>,
    locations: Vec<Location>,
    events: Vec<ScanEvent>,
    last_scanned_at: Option<Timestamp>,
    unavailable: bool,
}

impl Inner {
    fn check_available(&self) -> Result<(), sqlx::Error> {
        if self.unavailable {
            Err(sqlx::Error::PoolClosed)
        } else {
            Ok(())
        }
    }

    fn location(&self, id: DbId) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    fn student(&self, id: DbId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Events matching `keep`, newest first.
    fn latest_first<F>(&self, keep: F) -> Vec<&ScanEvent>
    where
        F: Fn(&ScanEvent) -> bool,
    {
        let mut events: Vec<&ScanEvent> = self.events.iter().filter(|e| keep(*e)).collect();
        events.sort_by(|a, b| (b.scanned_at, b.id).cmp(&(a.scanned_at, a.id)));
        events
    }
}

/// Rejection matching SQLite's unique index on the named column.
#[derive(Debug, thiserror::Error)]
#[error("UNIQUE constraint failed: {0}")]
pub struct UniqueViolation(pub &'static str);

impl DatabaseError for UniqueViolation {
    fn message(&self) -> &str {
        "UNIQUE constraint failed"
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::UniqueViolation
    }
}

/// Vec-backed store guarded by a `tokio` `RwLock`.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enroll a student.
    pub async fn add_student(
        &self,
        full_name: &str,
        school_id: DbId,
        qr_value: Option<&str>,
        card_uid: Option<&str>,
    ) -> Student {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let student = Student {
            id: inner.students.len() as DbId + 1,
            full_name: full_name.to_string(),
            school_id,
            qr_value: qr_value.map(str::to_string),
            card_uid: card_uid.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        inner.students.push(student.clone());
        student
    }

    /// Register a location.
    pub async fn add_location(
        &self,
        school_id: DbId,
        code: &str,
        name: &str,
        is_active: bool,
    ) -> Location {
        let mut inner = self.inner.write().await;
        let location = Location {
            id: inner.locations.len() as DbId + 1,
            school_id,
            code: code.to_string(),
            name: name.to_string(),
            is_active,
            created_at: Utc::now(),
        };
        inner.locations.push(location.clone());
        location
    }

    /// Make every subsequent call fail as if the store were unreachable.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.inner.write().await.unavailable = unavailable;
    }

    /// Number of events in the log.
    pub async fn event_count(&self) -> usize {
        self.inner.read().await.events.len()
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn find_student(&self, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let inner = self.inner.read().await;
        inner.check_available()?;
        Ok(inner.student(id).cloned())
    }

    async fn find_student_by_qr(&self, qr_value: &str) -> Result<Option<Student>, sqlx::Error> {
        let inner = self.inner.read().await;
        inner.check_available()?;
        Ok(inner
            .students
            .iter()
            .find(|s| s.qr_value.as_deref() == Some(qr_value))
            .cloned())
    }

    async fn find_student_by_card(&self, card_uid: &str) -> Result<Option<Student>, sqlx::Error> {
        let inner = self.inner.read().await;
        inner.check_available()?;
        Ok(inner
            .students
            .iter()
            .find(|s| s.card_uid.as_deref() == Some(card_uid))
            .cloned())
    }

    async fn find_card_holder(
        &self,
        card_uid: &str,
        excluding_id: DbId,
    ) -> Result<Option<Student>, sqlx::Error> {
        let inner = self.inner.read().await;
        inner.check_available()?;
        Ok(inner
            .students
            .iter()
            .find(|s| s.id != excluding_id && s.card_uid.as_deref() == Some(card_uid))
            .cloned())
    }

    async fn assign_card(
        &self,
        student_id: DbId,
        card_uid: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        let mut inner = self.inner.write().await;
        inner.check_available()?;
        if inner
            .students
            .iter()
            .any(|s| s.id != student_id && s.card_uid.as_deref() == Some(card_uid))
        {
            return Err(sqlx::Error::Database(Box::new(UniqueViolation(
                "students.card_uid",
            ))));
        }
        let Some(student) = inner.students.iter_mut().find(|s| s.id == student_id) else {
            return Ok(None);
        };
        student.card_uid = Some(card_uid.to_string());
        student.updated_at = Utc::now();
        Ok(Some(student.clone()))
    }

    async fn find_location(&self, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let inner = self.inner.read().await;
        inner.check_available()?;
        Ok(inner.location(id).cloned())
    }

    async fn find_active_location(&self, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let inner = self.inner.read().await;
        inner.check_available()?;
        Ok(inner.location(id).filter(|l| l.is_active).cloned())
    }

    async fn find_active_location_by_code(
        &self,
        code: &str,
        school_id: Option<DbId>,
    ) -> Result<Option<Location>, sqlx::Error> {
        let inner = self.inner.read().await;
        inner.check_available()?;
        Ok(inner
            .locations
            .iter()
            .filter(|l| l.is_active && l.code == code)
            .filter(|l| school_id.map_or(true, |school| l.school_id == school))
            .min_by_key(|l| l.id)
            .cloned())
    }

    async fn list_locations(
        &self,
        school_id: Option<DbId>,
        include_inactive: bool,
    ) -> Result<Vec<Location>, sqlx::Error> {
        let inner = self.inner.read().await;
        inner.check_available()?;
        let mut locations: Vec<Location> = inner
            .locations
            .iter()
            .filter(|l| include_inactive || l.is_active)
            .filter(|l| school_id.map_or(true, |school| l.school_id == school))
            .cloned()
            .collect();
        locations.sort_by(|a, b| (a.school_id, &a.code).cmp(&(b.school_id, &b.code)));
        Ok(locations)
    }

    async fn latest_event_for_pair(
        &self,
        student_id: DbId,
        location_id: DbId,
    ) -> Result<Option<ScanEvent>, sqlx::Error> {
        let inner = self.inner.read().await;
        inner.check_available()?;
        Ok(inner
            .latest_first(|e| e.student_id == student_id && e.location_id == location_id)
            .first()
            .map(|e| (*e).clone()))
    }

    async fn append_event(&self, input: &CreateScanEvent) -> Result<ScanEvent, sqlx::Error> {
        let mut inner = self.inner.write().await;
        inner.check_available()?;
        if inner.student(input.student_id).is_none() || inner.location(input.location_id).is_none() {
            return Err(sqlx::Error::Protocol(
                "scan event references a missing student or location".to_string(),
            ));
        }

        let now = Utc::now();
        let scanned_at = match inner.last_scanned_at {
            Some(last) if last > now => last,
            _ => now,
        };
        let event = ScanEvent {
            id: inner.events.len() as DbId + 1,
            student_id: input.student_id,
            location_id: input.location_id,
            direction: input.direction,
            source: input.source,
            device_label: input.device_label.clone(),
            scanned_at,
        };
        inner.last_scanned_at = Some(scanned_at);
        inner.events.push(event.clone());
        Ok(event)
    }

    async fn latest_event_for_student(
        &self,
        student_id: DbId,
    ) -> Result<Option<LatestScan>, sqlx::Error> {
        let inner = self.inner.read().await;
        inner.check_available()?;
        let latest = inner
            .latest_first(|e| e.student_id == student_id)
            .into_iter()
            .find_map(|e| {
                inner.location(e.location_id).map(|l| LatestScan {
                    event_id: e.id,
                    location_id: l.id,
                    location_name: l.name.clone(),
                    location_code: l.code.clone(),
                    direction: e.direction,
                    scanned_at: e.scanned_at,
                })
            });
        Ok(latest)
    }

    async fn occupants(&self, location_id: DbId) -> Result<Vec<Occupant>, sqlx::Error> {
        let inner = self.inner.read().await;
        inner.check_available()?;

        // Newest-first, so the first event seen per student is their latest.
        let mut latest: HashMap<DbId, &ScanEvent> = HashMap::new();
        let ordered = inner.latest_first(|e| e.location_id == location_id);
        for event in &ordered {
            latest.entry(event.student_id).or_insert(*event);
        }

        let occupants = ordered
            .iter()
            .filter(|e| latest.get(&e.student_id).is_some_and(|l| l.id == e.id))
            .filter(|e| e.direction == Direction::Entry)
            .filter_map(|e| {
                inner.student(e.student_id).map(|s| Occupant {
                    student_id: s.id,
                    full_name: s.full_name.clone(),
                    school_id: s.school_id,
                    direction: e.direction,
                    scanned_at: e.scanned_at,
                })
            })
            .collect();
        Ok(occupants)
    }

    async fn events_for_student(
        &self,
        student_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ScanEvent>, sqlx::Error> {
        let inner = self.inner.read().await;
        inner.check_available()?;
        Ok(inner
            .latest_first(|e| e.student_id == student_id)
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        self.inner.read().await.check_available()
    }
}

//! Scan ingestion: the single write path into the event log.
//!
//! Identity lookup, location resolution, and validation all happen before
//! anything is written, so a failed scan never leaves a partial event.

use hallpass_core::attendance::{Direction, ScanSource};
use hallpass_core::error::CoreError;
use hallpass_core::types::{DbId, Timestamp};
use hallpass_core::validation::require_non_blank;
use hallpass_db::models::location::LocationSummary;
use hallpass_db::models::scan_event::CreateScanEvent;
use hallpass_db::models::student::{Student, StudentSummary};
use serde::Serialize;

use super::resolver::LocationSelector;
use super::AttendanceService;
use crate::error::{AppError, AppResult};

/// The credential presented at the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Qr(String),
    Nfc(String),
}

impl Credential {
    /// QR credential from a request field; blank or missing is rejected.
    /// The value is kept verbatim so lookup is an exact match.
    pub fn qr(value: Option<&str>) -> Result<Self, CoreError> {
        require_non_blank("qr_value", value).map(|v| Self::Qr(v.to_string()))
    }

    /// NFC credential from a request field; blank or missing is rejected.
    /// The value is kept verbatim so lookup is an exact match.
    pub fn nfc(value: Option<&str>) -> Result<Self, CoreError> {
        require_non_blank("card_uid", value).map(|v| Self::Nfc(v.to_string()))
    }

    pub fn source(&self) -> ScanSource {
        match self {
            Self::Qr(_) => ScanSource::Qr,
            Self::Nfc(_) => ScanSource::Nfc,
        }
    }

    fn not_found(&self) -> CoreError {
        let (field, value) = match self {
            Self::Qr(v) => ("qr_value", v),
            Self::Nfc(v) => ("card_uid", v),
        };
        CoreError::NotFoundByKey {
            entity: "Student",
            field,
            value: value.clone(),
        }
    }
}

/// A validated scan ready for ingestion.
#[derive(Debug, Clone)]
pub struct ScanCommand {
    pub credential: Credential,
    pub location: LocationSelector,
    /// Manual override; `None` means infer from the pair's history.
    pub direction: Option<Direction>,
    pub device_label: Option<String>,
}

/// What the caller gets back for a recorded scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReceipt {
    pub event_id: DbId,
    pub student: StudentSummary,
    pub location: LocationSummary,
    pub direction: Direction,
    pub source: ScanSource,
    pub device_label: Option<String>,
    pub scanned_at: Timestamp,
}

impl AttendanceService {
    /// Record a scan.
    ///
    /// 1. Find the student by exact credential match.
    /// 2. Resolve the location, scoped to the student's school unless the
    ///    command names one.
    /// 3. Under the pair's lock, infer the direction and append the event.
    pub async fn ingest_scan(&self, command: ScanCommand) -> AppResult<ScanReceipt> {
        let source = command.credential.source();
        let student = self.find_by_credential(&command.credential).await?;

        let selector = command.location.scoped_to(student.school_id);
        let location = self
            .resolve_location(&selector)
            .await?
            .ok_or_else(|| selector.not_found())?;

        let event = {
            let _pair = self.locks.acquire(student.id, location.id).await;
            let direction = self
                .infer_direction(student.id, location.id, command.direction)
                .await?;
            self.store
                .append_event(&CreateScanEvent {
                    student_id: student.id,
                    location_id: location.id,
                    direction,
                    source,
                    device_label: command.device_label,
                })
                .await?
        };

        tracing::info!(
            event_id = event.id,
            student_id = student.id,
            location_id = location.id,
            direction = %event.direction,
            source = %event.source,
            explicit = command.direction.is_some(),
            "Scan recorded"
        );

        Ok(ScanReceipt {
            event_id: event.id,
            student: StudentSummary::from(&student),
            location: LocationSummary::from(&location),
            direction: event.direction,
            source: event.source,
            device_label: event.device_label,
            scanned_at: event.scanned_at,
        })
    }

    async fn find_by_credential(&self, credential: &Credential) -> AppResult<Student> {
        let student = match credential {
            Credential::Qr(value) => self.store.find_student_by_qr(value).await?,
            Credential::Nfc(value) => self.store.find_student_by_card(value).await?,
        };
        student.ok_or_else(|| AppError::from(credential.not_found()))
    }
}

//! Student entity model and projections.

use hallpass_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `students` table.
///
/// Not serializable: `qr_value` and `card_uid` are enough to scan as the
/// student, so responses use one of the projections below.
#[derive(Debug, Clone, FromRow)]
pub struct Student {
    pub id: DbId,
    pub full_name: String,
    pub school_id: DbId,
    pub qr_value: Option<String>,
    pub card_uid: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Identity snapshot embedded in scan receipts and occupancy listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentSummary {
    pub id: DbId,
    pub full_name: String,
    pub school_id: DbId,
}

impl From<&Student> for StudentSummary {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            full_name: student.full_name.clone(),
            school_id: student.school_id,
        }
    }
}

/// Public record of a student: credentials reduced to presence flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentProfile {
    pub id: DbId,
    pub full_name: String,
    pub school_id: DbId,
    pub has_qr: bool,
    pub has_card: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Student> for StudentProfile {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            full_name: student.full_name.clone(),
            school_id: student.school_id,
            has_qr: student.qr_value.is_some(),
            has_card: student.card_uid.is_some(),
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}

/// Response payload after a card assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentCard {
    pub id: DbId,
    pub full_name: String,
    pub card_uid: Option<String>,
}

impl From<Student> for StudentCard {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            full_name: student.full_name,
            card_uid: student.card_uid,
        }
    }
}

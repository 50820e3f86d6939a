//! Location entity model.
//!
//! Locations are keyed by a human code (e.g. `ROOM-101`) that is unique
//! within a school but may repeat across schools.

use hallpass_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub school_id: DbId,
    pub code: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Location snapshot embedded in scan receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationSummary {
    pub id: DbId,
    pub name: String,
    pub code: String,
}

impl From<&Location> for LocationSummary {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
            code: location.code.clone(),
        }
    }
}

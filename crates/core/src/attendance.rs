//! Scan direction, credential source, and presence rules.
//!
//! The event log is the only source of truth: a student's containment state
//! at a location is whatever the latest scan there says. These helpers turn
//! that latest scan into the next direction or a presence status without
//! touching storage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Whether a scan records an arrival at or a departure from a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Entry,
    Exit,
}

impl Direction {
    /// Column value stored in `scan_events.direction`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Entry => "ENTRY",
            Direction::Exit => "EXIT",
        }
    }

    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Direction::Entry => Direction::Exit,
            Direction::Exit => Direction::Entry,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ENTRY" => Ok(Direction::Entry),
            "EXIT" => Ok(Direction::Exit),
            other => Err(CoreError::Validation(format!(
                "Invalid direction '{other}'. Must be one of: ENTRY, EXIT"
            ))),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// ScanSource
// ---------------------------------------------------------------------------

/// Credential modality used for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScanSource {
    Qr,
    Nfc,
}

impl ScanSource {
    /// Column value stored in `scan_events.source`.
    pub fn as_str(self) -> &'static str {
        match self {
            ScanSource::Qr => "QR",
            ScanSource::Nfc => "NFC",
        }
    }
}

impl fmt::Display for ScanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "QR" => Ok(ScanSource::Qr),
            "NFC" => Ok(ScanSource::Nfc),
            other => Err(CoreError::Validation(format!(
                "Invalid scan source '{other}'. Must be one of: QR, NFC"
            ))),
        }
    }
}

impl TryFrom<String> for ScanSource {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

/// Where a student is, derived from their latest scan anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresenceStatus {
    /// Latest scan was an entry; the student is at that location.
    InLocation,
    /// Latest scan was an exit; the location is the last one they left.
    OutOfLocation,
    /// The student has never been scanned.
    Unknown,
}

impl PresenceStatus {
    /// Map the direction of a student's latest scan (if any) to a status.
    pub fn from_latest(latest: Option<Direction>) -> Self {
        match latest {
            None => PresenceStatus::Unknown,
            Some(Direction::Entry) => PresenceStatus::InLocation,
            Some(Direction::Exit) => PresenceStatus::OutOfLocation,
        }
    }
}

// ---------------------------------------------------------------------------
// Toggle inference
// ---------------------------------------------------------------------------

/// Next direction for a (student, location) pair given the pair's latest
/// recorded direction.
///
/// No prior event or a prior exit means the student is arriving; a prior
/// entry means they are leaving.
pub fn next_direction(last: Option<Direction>) -> Direction {
    match last {
        Some(dir) => dir.flipped(),
        None => Direction::Entry,
    }
}

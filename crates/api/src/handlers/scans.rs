//! Handlers for scan ingestion.
//!
//! QR and NFC kiosks post to separate endpoints; both share one request
//! shape and the same ingestion path.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hallpass_core::attendance::Direction;
use hallpass_core::types::DbId;
use hallpass_core::validation::normalize_optional;
use serde::Deserialize;
use validator::Validate;

use crate::attendance::ingest::{Credential, ScanCommand};
use crate::attendance::resolver::LocationSelector;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /scans/qr` and `POST /scans/nfc`.
///
/// Only the credential field matching the endpoint is read.
#[derive(Debug, Deserialize, Validate)]
pub struct ScanRequest {
    pub qr_value: Option<String>,
    pub card_uid: Option<String>,
    pub location_code: Option<String>,
    pub location_id: Option<DbId>,
    pub school_id: Option<DbId>,
    /// `ENTRY` or `EXIT`, any case. Omit to infer.
    pub direction: Option<String>,
    #[validate(length(max = 100))]
    pub device_label: Option<String>,
}

impl ScanRequest {
    /// Validate every field and build the command. Runs before any store
    /// access.
    fn into_command(self, credential: Credential) -> AppResult<ScanCommand> {
        self.validate()?;

        let location = LocationSelector::from_parts(
            self.location_id,
            self.location_code.as_deref(),
            self.school_id,
        )?;
        let direction = normalize_optional(self.direction.as_deref())
            .map(|d| d.parse::<Direction>())
            .transpose()?;

        Ok(ScanCommand {
            credential,
            location,
            direction,
            device_label: normalize_optional(self.device_label.as_deref()),
        })
    }
}

/// POST /api/v1/scans/qr
pub async fn scan_qr(
    State(state): State<AppState>,
    Json(input): Json<ScanRequest>,
) -> AppResult<impl IntoResponse> {
    let credential = Credential::qr(input.qr_value.as_deref())?;
    let command = input.into_command(credential)?;
    let receipt = state.attendance.ingest_scan(command).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}

/// POST /api/v1/scans/nfc
pub async fn scan_nfc(
    State(state): State<AppState>,
    Json(input): Json<ScanRequest>,
) -> AppResult<impl IntoResponse> {
    let credential = Credential::nfc(input.card_uid.as_deref())?;
    let command = input.into_command(credential)?;
    let receipt = state.attendance.ingest_scan(command).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}

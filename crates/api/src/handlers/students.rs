//! Handlers for student lookups, card assignment, and presence.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use hallpass_core::types::DbId;
use hallpass_db::models::student::StudentProfile;
use serde::Deserialize;

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `PUT /students/{id}/card`.
#[derive(Debug, Deserialize)]
pub struct CardRequest {
    pub card_uid: Option<String>,
}

/// GET /api/v1/students/{id}
///
/// Credentials are reported only as `has_qr` / `has_card`.
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let student = state.attendance.student(student_id).await?;
    Ok(Json(DataResponse {
        data: StudentProfile::from(&student),
    }))
}

/// PUT /api/v1/students/{id}/card
///
/// Assign an NFC card UID. 409 if another student holds it.
pub async fn assign_card(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
    Json(input): Json<CardRequest>,
) -> AppResult<impl IntoResponse> {
    let card = state
        .attendance
        .assign_card(student_id, input.card_uid.as_deref())
        .await?;
    Ok(Json(DataResponse { data: card }))
}

/// GET /api/v1/students/{id}/current-location
pub async fn current_location(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = state.attendance.current_location(student_id).await?;
    tracing::debug!(student_id, status = ?current.status, "Current location requested");
    Ok(Json(DataResponse { data: current }))
}

/// GET /api/v1/students/{id}/scans
///
/// Newest first. `limit` defaults to 50 and is capped at 200.
pub async fn scan_history(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let events = state
        .attendance
        .scan_history(student_id, params.limit, params.offset)
        .await?;
    Ok(Json(DataResponse { data: events }))
}

//! Handlers for location listing, code resolution, and occupancy.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use hallpass_core::types::DbId;

use crate::attendance::resolver::LocationSelector;
use crate::error::AppResult;
use crate::query::{LocationListParams, ResolveParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/locations
pub async fn list_locations(
    State(state): State<AppState>,
    Query(params): Query<LocationListParams>,
) -> AppResult<impl IntoResponse> {
    let locations = state
        .attendance
        .locations(params.school_id, params.include_inactive)
        .await?;
    Ok(Json(DataResponse { data: locations }))
}

/// GET /api/v1/locations/resolve?code=&school_id=
///
/// Resolve a kiosk's configured code the same way a scan would. Only active
/// locations match.
pub async fn resolve_location(
    State(state): State<AppState>,
    Query(params): Query<ResolveParams>,
) -> AppResult<impl IntoResponse> {
    let selector = LocationSelector::from_parts(None, params.code.as_deref(), params.school_id)?;
    let location = state
        .attendance
        .resolve_location(&selector)
        .await?
        .ok_or_else(|| selector.not_found())?;
    Ok(Json(DataResponse { data: location }))
}

/// GET /api/v1/locations/{id}/occupants
pub async fn list_occupants(
    State(state): State<AppState>,
    Path(location_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let report = state.attendance.occupants(location_id).await?;
    Ok(Json(DataResponse { data: report }))
}

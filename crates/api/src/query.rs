//! Query parameter types shared by handlers.

use hallpass_core::types::DbId;
use serde::Deserialize;

/// Pagination parameters (`?limit=&offset=`).
///
/// Values are clamped by the service via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /locations?school_id=&include_inactive=`
#[derive(Debug, Deserialize)]
pub struct LocationListParams {
    pub school_id: Option<DbId>,
    #[serde(default)]
    pub include_inactive: bool,
}

/// `GET /locations/resolve?code=&school_id=`
#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub code: Option<String>,
    pub school_id: Option<DbId>,
}

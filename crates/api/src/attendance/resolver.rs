//! Location resolution from a direct ID or a (school-scoped) code.

use hallpass_core::error::CoreError;
use hallpass_core::types::DbId;
use hallpass_db::models::location::Location;

use super::AttendanceService;
use crate::error::AppResult;

/// How a caller identifies the location being scanned at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSelector {
    /// Direct location ID; takes precedence over any code.
    Id(DbId),
    /// Human code, optionally scoped to a school.
    Code { code: String, school_id: Option<DbId> },
}

impl LocationSelector {
    /// Build a selector from optional request fields.
    ///
    /// An ID wins over a code. Neither present is a validation error.
    pub fn from_parts(
        location_id: Option<DbId>,
        location_code: Option<&str>,
        school_id: Option<DbId>,
    ) -> Result<Self, CoreError> {
        if let Some(id) = location_id {
            return Ok(Self::Id(id));
        }
        match location_code.map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) => Ok(Self::Code {
                code: code.to_string(),
                school_id,
            }),
            None => Err(CoreError::Validation(
                "location_code or location_id is required".to_string(),
            )),
        }
    }

    /// Fill in the school scope when the caller did not give one.
    pub fn scoped_to(self, default_school: DbId) -> Self {
        match self {
            Self::Code {
                code,
                school_id: None,
            } => Self::Code {
                code,
                school_id: Some(default_school),
            },
            other => other,
        }
    }

    /// Error reported when nothing matches this selector.
    pub fn not_found(&self) -> CoreError {
        match self {
            Self::Id(id) => CoreError::NotFound {
                entity: "Location",
                id: *id,
            },
            Self::Code { code, .. } => CoreError::NotFoundByKey {
                entity: "Location",
                field: "code",
                value: code.clone(),
            },
        }
    }
}

impl AttendanceService {
    /// Resolve a selector to an active location.
    ///
    /// `Ok(None)` means no active location matched; only store failures are
    /// errors. An unscoped code is matched across all schools, and if the
    /// code repeats the lowest ID wins.
    pub async fn resolve_location(&self, selector: &LocationSelector) -> AppResult<Option<Location>> {
        let location = match selector {
            LocationSelector::Id(id) => self.store.find_active_location(*id).await?,
            LocationSelector::Code { code, school_id } => {
                if school_id.is_none() {
                    tracing::debug!(code = %code, "Resolving location code without school scope");
                }
                self.store
                    .find_active_location_by_code(code, *school_id)
                    .await?
            }
        };
        Ok(location)
    }
}

use axum::routing::get;
use axum::Router;

use crate::handlers::locations;
use crate::state::AppState;

/// Location routes mounted at `/locations`.
///
/// ```text
/// GET    /                  -> list_locations
/// GET    /resolve           -> resolve_location
/// GET    /{id}/occupants    -> list_occupants
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(locations::list_locations))
        .route("/resolve", get(locations::resolve_location))
        .route("/{id}/occupants", get(locations::list_occupants))
}

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Student routes mounted at `/students`.
///
/// ```text
/// GET    /{id}                    -> get_student
/// PUT    /{id}/card               -> assign_card
/// GET    /{id}/current-location   -> current_location
/// GET    /{id}/scans              -> scan_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(students::get_student))
        .route("/{id}/card", put(students::assign_card))
        .route("/{id}/current-location", get(students::current_location))
        .route("/{id}/scans", get(students::scan_history))
}

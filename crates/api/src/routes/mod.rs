pub mod health;
pub mod locations;
pub mod scans;
pub mod students;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /scans/qr                          record a QR scan (POST)
/// /scans/nfc                         record an NFC scan (POST)
///
/// /students/{id}                     get
/// /students/{id}/card                assign card UID (PUT)
/// /students/{id}/current-location    presence status
/// /students/{id}/scans               scan history
///
/// /locations                         list
/// /locations/resolve                 resolve a code
/// /locations/{id}/occupants          who is inside
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/scans", scans::router())
        .nest("/students", students::router())
        .nest("/locations", locations::router())
}

use axum::routing::post;
use axum::Router;

use crate::handlers::scans;
use crate::state::AppState;

/// Scan routes mounted at `/scans`.
///
/// ```text
/// POST   /qr    -> scan_qr
/// POST   /nfc   -> scan_nfc
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/qr", post(scans::scan_qr))
        .route("/nfc", post(scans::scan_nfc))
}

//! Direction inference for a single (student, location) pair.

use hallpass_core::attendance::{self, Direction};
use hallpass_core::types::DbId;

use super::AttendanceService;
use crate::error::AppResult;

impl AttendanceService {
    /// Decide whether the next scan for the pair is an entry or an exit.
    ///
    /// An explicit direction is returned unchanged without touching the
    /// store. Otherwise the pair's latest event is toggled; no history
    /// means entry. Other locations never influence the result.
    ///
    /// Callers that append the inferred event must hold the pair's lock
    /// across this call and the append.
    pub async fn infer_direction(
        &self,
        student_id: DbId,
        location_id: DbId,
        explicit: Option<Direction>,
    ) -> AppResult<Direction> {
        if let Some(direction) = explicit {
            return Ok(direction);
        }

        let last = self
            .store
            .latest_event_for_pair(student_id, location_id)
            .await?
            .map(|event| event.direction);
        let direction = attendance::next_direction(last);

        tracing::debug!(
            student_id,
            location_id,
            last = ?last,
            inferred = %direction,
            "Inferred scan direction"
        );
        Ok(direction)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hallpass_core::attendance::ScanSource;
    use hallpass_db::memory::MemoryStore;
    use hallpass_db::models::scan_event::CreateScanEvent;
    use hallpass_db::store::AttendanceStore;

    use super::*;

    async fn setup() -> (Arc<MemoryStore>, AttendanceService) {
        let store = Arc::new(MemoryStore::new());
        store.add_student("Ada Lovelace", 1, Some("QR-ADA"), None).await;
        store.add_location(1, "ROOM-101", "Room 101", true).await;
        store.add_location(1, "LIB", "Library", true).await;
        let service = AttendanceService::new(store.clone());
        (store, service)
    }

    async fn record(store: &MemoryStore, location_id: DbId, direction: Direction) {
        store
            .append_event(&CreateScanEvent {
                student_id: 1,
                location_id,
                direction,
                source: ScanSource::Qr,
                device_label: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn no_history_infers_entry() {
        let (_, service) = setup().await;
        assert_eq!(service.infer_direction(1, 1, None).await.unwrap(), Direction::Entry);
    }

    #[tokio::test]
    async fn toggles_from_latest_event() {
        let (store, service) = setup().await;
        record(&store, 1, Direction::Entry).await;
        assert_eq!(service.infer_direction(1, 1, None).await.unwrap(), Direction::Exit);

        record(&store, 1, Direction::Exit).await;
        assert_eq!(service.infer_direction(1, 1, None).await.unwrap(), Direction::Entry);
    }

    #[tokio::test]
    async fn other_locations_do_not_count() {
        let (store, service) = setup().await;
        record(&store, 2, Direction::Entry).await;
        assert_eq!(service.infer_direction(1, 1, None).await.unwrap(), Direction::Entry);
    }

    #[tokio::test]
    async fn explicit_direction_skips_the_store() {
        let (store, service) = setup().await;
        store.set_unavailable(true).await;
        let direction = service
            .infer_direction(1, 1, Some(Direction::Exit))
            .await
            .unwrap();
        assert_eq!(direction, Direction::Exit);
    }
}

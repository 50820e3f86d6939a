//! Attendance service: location resolution, direction inference, scan
//! ingestion, card assignment, and the presence/occupancy views.
//!
//! Every operation goes through an injected [`AttendanceStore`], so the same
//! code runs against SQLite in production and [`MemoryStore`] in tests.
//!
//! [`MemoryStore`]: hallpass_db::memory::MemoryStore

pub mod cards;
pub mod inference;
pub mod ingest;
pub mod locks;
pub mod resolver;
pub mod status;

use std::sync::Arc;

use hallpass_db::store::AttendanceStore;

use self::locks::PairLocks;

/// Shared handle to the attendance operations.
///
/// Cheaply cloneable; clones share the store and the per-pair lock table.
#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn AttendanceStore>,
    locks: Arc<PairLocks>,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn AttendanceStore>) -> Self {
        Self {
            store,
            locks: Arc::new(PairLocks::new()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &dyn AttendanceStore {
        self.store.as_ref()
    }
}

//! Per-(student, location) serialization for direction inference.
//!
//! Inference reads the pair's latest event and then appends the next one.
//! Holding the pair's lock across both steps keeps two concurrent scans in
//! this process from inferring the same direction. Scans from other
//! processes sharing the database file are not covered.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use hallpass_core::types::DbId;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type PairKey = (DbId, DbId);

/// Lock table keyed by `(student_id, location_id)`.
///
/// Entries are held weakly and pruned once no scan holds or waits on them.
#[derive(Default)]
pub struct PairLocks {
    slots: Mutex<HashMap<PairKey, Weak<AsyncMutex<()>>>>,
}

/// Held for the duration of a read-then-append sequence.
pub struct PairGuard {
    _guard: OwnedMutexGuard<()>,
}

impl PairLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to the pair.
    pub async fn acquire(&self, student_id: DbId, location_id: DbId) -> PairGuard {
        let slot = self.slot((student_id, location_id));
        PairGuard {
            _guard: slot.lock_owned().await,
        }
    }

    /// Number of pairs with a live lock.
    pub fn active_pairs(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|w| w.strong_count() > 0).count()
    }

    fn slot(&self, key: PairKey) -> Arc<AsyncMutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = slots.get(&key).and_then(Weak::upgrade) {
            return existing;
        }
        slots.retain(|_, w| w.strong_count() > 0);
        let fresh = Arc::new(AsyncMutex::new(()));
        slots.insert(key, Arc::downgrade(&fresh));
        fresh
    }
}

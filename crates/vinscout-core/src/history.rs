//! Bounded, deduplicated, newest-first lookup history.
//!
//! Store failures are logged and swallowed. A failed load reads as an empty
//! list.

use std::sync::{Mutex, MutexGuard};

use crate::metrics::METRICS;
use crate::obs::{emit_history_recorded, emit_history_store_error};
use crate::storage_traits::HistoryStore;
use crate::vehicle::Vehicle;

/// History over a [`HistoryStore`] backend.
///
/// `record` and `clear` are load-mutate-save sequences. They run under a
/// mutex owned by the cache, so concurrent callers sharing one cache cannot
/// break the cap or the uniqueness invariant whatever the store's own locking.
pub struct HistoryCache<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S> HistoryCache<S>
where
    S: HistoryStore,
{
    /// Maximum number of entries kept.
    pub const MAX_ITEMS: usize = 5;

    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Put `vehicle` at the front, dropping any entry with the same VIN
    /// (case-insensitive) and anything past [`Self::MAX_ITEMS`].
    pub fn record(&self, vehicle: Vehicle) {
        self.record_if(vehicle, || true);
    }

    /// Like [`Self::record`], but `still_wanted` is evaluated while the write
    /// lock is held and nothing is written if it returns `false`. Returns
    /// whether the vehicle was recorded.
    pub fn record_if(&self, vehicle: Vehicle, still_wanted: impl FnOnce() -> bool) -> bool {
        let _guard = self.lock();
        if !still_wanted() {
            return false;
        }

        let mut current = self.load_or_empty();
        current.retain(|existing| !existing.same_vin(&vehicle));
        let vin = vehicle.vin.clone();
        current.insert(0, vehicle);
        current.truncate(Self::MAX_ITEMS);

        if self.save_or_log(&current) {
            emit_history_recorded(&vin, current.len());
        }
        true
    }

    /// Stored entries, newest first. Empty if the store cannot be read.
    pub fn history(&self) -> Vec<Vehicle> {
        self.load_or_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let _guard = self.lock();
        self.save_or_log(&[]);
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load_or_empty(&self) -> Vec<Vehicle> {
        match self.store.load() {
            Ok(vehicles) => vehicles,
            Err(err) => {
                emit_history_store_error("load", &err);
                Vec::new()
            }
        }
    }

    fn save_or_log(&self, vehicles: &[Vehicle]) -> bool {
        match self.store.save(vehicles) {
            Ok(()) => {
                METRICS.inc_history_writes();
                true
            }
            Err(err) => {
                emit_history_store_error("save", &err);
                false
            }
        }
    }
}

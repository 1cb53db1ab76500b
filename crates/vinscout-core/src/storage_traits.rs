//! Persistence seam for the lookup history.
//!
//! A `HistoryStore` overwrites and reads back one whole list of vehicles.
//! Backends must never expose a partially written list. In-memory fakes live
//! in the `fakes` module; the file-backed store lives in `store::fs`.

use std::sync::Arc;

use crate::error::StorageError;
use crate::vehicle::Vehicle;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Whole-list vehicle persistence.
pub trait HistoryStore: Send + Sync {
    /// Replace the stored list with `vehicles`.
    fn save(&self, vehicles: &[Vehicle]) -> StorageResult<()>;

    /// Read the stored list. Empty if nothing was ever saved.
    fn load(&self) -> StorageResult<Vec<Vehicle>>;
}

impl<S: HistoryStore + ?Sized> HistoryStore for Arc<S> {
    fn save(&self, vehicles: &[Vehicle]) -> StorageResult<()> {
        (**self).save(vehicles)
    }

    fn load(&self) -> StorageResult<Vec<Vehicle>> {
        (**self).load()
    }
}

impl<S: HistoryStore + ?Sized> HistoryStore for Box<S> {
    fn save(&self, vehicles: &[Vehicle]) -> StorageResult<()> {
        (**self).save(vehicles)
    }

    fn load(&self) -> StorageResult<Vec<Vehicle>> {
        (**self).load()
    }
}

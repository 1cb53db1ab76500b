//! In-memory fakes for the transport and persistence seams (testing only)
//!
//! Provides `MemoryHistoryStore`, `FailingHistoryStore` and `StaticTransport`
//! that satisfy the trait contracts without any external dependencies.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{StorageError, TransportError};
use crate::storage_traits::{HistoryStore, StorageResult};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::vehicle::Vehicle;

// ---------------------------------------------------------------------------
// MemoryHistoryStore
// ---------------------------------------------------------------------------

/// In-memory history store backed by a mutex-guarded `Vec`.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    vehicles: Mutex<Vec<Vehicle>>,
    saves: AtomicUsize,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn save(&self, vehicles: &[Vehicle]) -> StorageResult<()> {
        let mut stored = self
            .vehicles
            .lock()
            .map_err(|_| StorageError::LockPoisoned)?;
        *stored = vehicles.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn load(&self) -> StorageResult<Vec<Vehicle>> {
        let stored = self
            .vehicles
            .lock()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(stored.clone())
    }
}

// ---------------------------------------------------------------------------
// FailingHistoryStore
// ---------------------------------------------------------------------------

/// A store whose every operation fails with an I/O error.
#[derive(Debug, Default)]
pub struct FailingHistoryStore;

impl FailingHistoryStore {
    pub fn new() -> Self {
        Self
    }

    fn failure() -> StorageError {
        StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "store unavailable",
        ))
    }
}

impl HistoryStore for FailingHistoryStore {
    fn save(&self, _vehicles: &[Vehicle]) -> StorageResult<()> {
        Err(Self::failure())
    }

    fn load(&self) -> StorageResult<Vec<Vehicle>> {
        Err(Self::failure())
    }
}

// ---------------------------------------------------------------------------
// StaticTransport
// ---------------------------------------------------------------------------

/// Transport that answers every request with the same canned outcome and
/// remembers what it was asked.
#[derive(Debug)]
pub struct StaticTransport {
    outcome: Result<HttpResponse, TransportError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<HttpRequest>>,
}

impl StaticTransport {
    /// Answer with `status` and `body`.
    pub fn respond(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::with_outcome(Ok(HttpResponse {
            status,
            body: body.into(),
        }))
    }

    /// Answer `200 OK` with a JSON body.
    pub fn json(body: &str) -> Self {
        Self::respond(200, body.as_bytes().to_vec())
    }

    /// Fail every request with `error`.
    pub fn fail(error: TransportError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<HttpResponse, TransportError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of requests received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.last_request.lock().ok().and_then(|last| last.clone())
    }
}

#[async_trait]
impl HttpTransport for StaticTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request);
        }
        self.outcome.clone()
    }
}

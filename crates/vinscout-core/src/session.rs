//! Application context: one lookup service plus one history cache.
//!
//! A `Session` is built once and shared by reference (or `Arc`) with every
//! caller. It owns the "only the latest request counts" policy through a
//! generation counter; the pipeline itself knows nothing about it.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::error::Result;
use crate::history::HistoryCache;
use crate::service::VehicleService;
use crate::storage_traits::HistoryStore;
use crate::transport::HttpTransport;
use crate::vehicle::Vehicle;

/// What a call to [`Session::decode`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The lookup succeeded and was recorded in history.
    Decoded(Vehicle),
    /// A newer decode started while this one was in flight; its result was
    /// discarded and history left untouched.
    Superseded,
    /// The input was blank after trimming; nothing was sent.
    Empty,
}

/// Trim and uppercase user input. `None` if nothing is left.
pub fn normalize_input(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

pub struct Session<T, S> {
    service: VehicleService<T>,
    history: HistoryCache<S>,
    generation: AtomicU64,
}

impl<T, S> Session<T, S>
where
    T: HttpTransport,
    S: HistoryStore,
{
    pub fn new(service: VehicleService<T>, history: HistoryCache<S>) -> Self {
        Self {
            service,
            history,
            generation: AtomicU64::new(0),
        }
    }

    pub fn service(&self) -> &VehicleService<T> {
        &self.service
    }

    pub fn history(&self) -> &HistoryCache<S> {
        &self.history
    }

    /// Decode user input and record the vehicle if this is still the latest
    /// request when the lookup returns.
    ///
    /// A superseded call reports `Superseded` whether its lookup succeeded or
    /// failed. The final currency check runs under the history write lock, so
    /// a newer decode that records first always stays at the front.
    pub async fn decode(&self, input: &str) -> Result<DecodeOutcome> {
        let Some(vin) = normalize_input(input) else {
            return Ok(DecodeOutcome::Empty);
        };

        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.service.lookup(&vin).await;

        if !self.is_current(ticket) {
            debug!(vin = %vin, ticket, "discarding superseded lookup");
            return Ok(DecodeOutcome::Superseded);
        }

        let vehicle = result?;
        if !self
            .history
            .record_if(vehicle.clone(), || self.is_current(ticket))
        {
            debug!(vin = %vin, ticket, "superseded before recording");
            return Ok(DecodeOutcome::Superseded);
        }
        Ok(DecodeOutcome::Decoded(vehicle))
    }

    /// Invalidate every in-flight decode without starting a new one.
    pub fn cancel_pending(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Recent vehicles, newest first.
    pub fn recent(&self) -> Vec<Vehicle> {
        self.history.history()
    }

    pub fn clear_history(&self) {
        self.history.clear();
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }
}

//! Global atomic counters for VINScout observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. before the CLI exits).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics instance.
pub static METRICS: Metrics = Metrics::new();

/// Lookup and history counters.
pub struct Metrics {
    lookups_started: AtomicU64,
    lookups_succeeded: AtomicU64,
    lookups_failed: AtomicU64,
    validation_rejections: AtomicU64,
    history_writes: AtomicU64,
}

impl Metrics {
    const fn new() -> Self {
        Self {
            lookups_started: AtomicU64::new(0),
            lookups_succeeded: AtomicU64::new(0),
            lookups_failed: AtomicU64::new(0),
            validation_rejections: AtomicU64::new(0),
            history_writes: AtomicU64::new(0),
        }
    }

    pub fn inc_lookups_started(&self) {
        self.lookups_started.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "lookups_started", "counter incremented");
    }

    pub fn inc_lookups_succeeded(&self) {
        self.lookups_succeeded.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "lookups_succeeded", "counter incremented");
    }

    /// Failures past validation (network, API, decoding).
    pub fn inc_lookups_failed(&self) {
        self.lookups_failed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "lookups_failed", "counter incremented");
    }

    pub fn inc_validation_rejections(&self) {
        self.validation_rejections.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "validation_rejections", "counter incremented");
    }

    pub fn inc_history_writes(&self) {
        self.history_writes.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "history_writes", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            lookups_started = self.lookups_started(),
            lookups_succeeded = self.lookups_succeeded(),
            lookups_failed = self.lookups_failed(),
            validation_rejections = self.validation_rejections(),
            history_writes = self.history_writes(),
        );
    }

    pub fn lookups_started(&self) -> u64 {
        self.lookups_started.load(Ordering::Relaxed)
    }

    pub fn lookups_succeeded(&self) -> u64 {
        self.lookups_succeeded.load(Ordering::Relaxed)
    }

    pub fn lookups_failed(&self) -> u64 {
        self.lookups_failed.load(Ordering::Relaxed)
    }

    pub fn validation_rejections(&self) -> u64 {
        self.validation_rejections.load(Ordering::Relaxed)
    }

    pub fn history_writes(&self) -> u64 {
        self.history_writes.load(Ordering::Relaxed)
    }
}

//! Structured observability hooks for lookups and history writes.
//!
//! Events are emitted at `info!` level, store failures at `warn!`.
//! Filter with `VINSCOUT_LOG` (or `RUST_LOG`); pass `--json` to the CLI for
//! JSON lines.

use tracing::{info, warn};

/// Lookup-scoped span. Attach it to the lookup future with
/// `tracing::Instrument` so it is entered on every poll.
///
/// ```ignore
/// self.fetch(vin).instrument(lookup_span(vin)).await
/// // every event logged inside carries vin = "1HGCM82633A004352"
/// ```
pub fn lookup_span(vin: &str) -> tracing::Span {
    tracing::info_span!("vinscout.lookup", vin = %vin)
}

pub fn emit_lookup_started(vin: &str) {
    info!(event = "lookup.started", vin = %vin);
}

/// `outcome` is `"ok"` or a short failure kind such as `"timeout"`.
pub fn emit_lookup_finished(vin: &str, duration_ms: u64, outcome: &str) {
    info!(
        event = "lookup.finished",
        vin = %vin,
        duration_ms = duration_ms,
        outcome = %outcome,
    );
}

pub fn emit_history_recorded(vin: &str, entries: usize) {
    info!(event = "history.recorded", vin = %vin, entries = entries);
}

/// A swallowed history store failure.
pub fn emit_history_store_error(operation: &str, error: &dyn std::fmt::Display) {
    warn!(event = "history.store_error", operation = %operation, error = %error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_span_create() {
        let _span = lookup_span("1HGCM82633A004352").entered();
        emit_lookup_started("1HGCM82633A004352");
        emit_lookup_finished("1HGCM82633A004352", 12, "ok");
    }
}

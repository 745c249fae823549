//! Observability: executor metrics and the sink boundary that feeds them.

pub mod metrics;
pub mod sink;

pub use metrics::{EntityCounters, EventOps, EventState};

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> EventState {
    metrics::with_state(Clone::clone)
}

/// Reset all counters.
pub fn metrics_reset() {
    metrics::reset();
}

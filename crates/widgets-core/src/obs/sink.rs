//! Metrics sink boundary.
//!
//! Executors MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsTarget.
use crate::{obs::metrics, traits::EntityKind};
use std::marker::PhantomData;

///
/// ExecKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecKind {
    Load,
    Save,
    Delete,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MetricsEvent {
    ExecStart {
        kind: ExecKind,
        entity_path: &'static str,
    },
    ExecFinish {
        kind: ExecKind,
        entity_path: &'static str,
        rows_touched: u64,
    },
    RowsScanned {
        entity_path: &'static str,
        rows_scanned: u64,
    },
    ValidationFailed {
        entity_path: &'static str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

///
/// GlobalMetricsSink
/// Default process-local sink that writes into the thread-local metrics state.
///

pub struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::ExecStart { kind, entity_path } => {
                metrics::with_state_mut(|m| {
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    match kind {
                        ExecKind::Load => {
                            m.ops.load_calls = m.ops.load_calls.saturating_add(1);
                            entry.load_calls = entry.load_calls.saturating_add(1);
                        }
                        ExecKind::Save => {
                            m.ops.save_calls = m.ops.save_calls.saturating_add(1);
                            entry.save_calls = entry.save_calls.saturating_add(1);
                        }
                        ExecKind::Delete => {
                            m.ops.delete_calls = m.ops.delete_calls.saturating_add(1);
                            entry.delete_calls = entry.delete_calls.saturating_add(1);
                        }
                    }
                });
            }

            MetricsEvent::ExecFinish {
                kind,
                entity_path,
                rows_touched,
            } => {
                metrics::with_state_mut(|m| {
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    match kind {
                        ExecKind::Load => {
                            m.ops.rows_loaded = m.ops.rows_loaded.saturating_add(rows_touched);
                            entry.rows_loaded = entry.rows_loaded.saturating_add(rows_touched);
                        }
                        ExecKind::Save => {
                            m.ops.rows_saved = m.ops.rows_saved.saturating_add(rows_touched);
                            entry.rows_saved = entry.rows_saved.saturating_add(rows_touched);
                        }
                        ExecKind::Delete => {
                            m.ops.rows_deleted = m.ops.rows_deleted.saturating_add(rows_touched);
                            entry.rows_deleted = entry.rows_deleted.saturating_add(rows_touched);
                        }
                    }
                });
            }

            MetricsEvent::RowsScanned {
                entity_path,
                rows_scanned,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_scanned = m.ops.rows_scanned.saturating_add(rows_scanned);
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.rows_scanned = entry.rows_scanned.saturating_add(rows_scanned);
                });
            }

            MetricsEvent::ValidationFailed { entity_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.validation_failures = m.ops.validation_failures.saturating_add(1);
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.validation_failures = entry.validation_failures.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

///
/// MetricsTarget
/// Where a session routes its executor events.
///

#[derive(Clone, Copy, Default)]
pub enum MetricsTarget {
    Off,
    #[default]
    Global,
    Sink(&'static dyn MetricsSink),
}

impl MetricsTarget {
    pub(crate) fn record(self, event: MetricsEvent) {
        match self {
            Self::Off => {}
            Self::Global => GLOBAL_METRICS_SINK.record(event),
            Self::Sink(sink) => sink.record(event),
        }
    }
}

///
/// Span
/// Brackets one executor call; the finish event is recorded on drop.
///

pub(crate) struct Span<E: EntityKind> {
    target: MetricsTarget,
    kind: ExecKind,
    rows: u64,
    _marker: PhantomData<E>,
}

impl<E: EntityKind> Span<E> {
    /// Start a metrics span for a specific entity and executor kind.
    pub(crate) fn new(target: MetricsTarget, kind: ExecKind) -> Self {
        target.record(MetricsEvent::ExecStart {
            kind,
            entity_path: E::PATH,
        });

        Self {
            target,
            kind,
            rows: 0,
            _marker: PhantomData,
        }
    }

    pub(crate) const fn set_rows(&mut self, rows: u64) {
        self.rows = rows;
    }
}

impl<E: EntityKind> Drop for Span<E> {
    fn drop(&mut self) {
        self.target.record(MetricsEvent::ExecFinish {
            kind: self.kind,
            entity_path: E::PATH,
            rows_touched: self.rows,
        });
    }
}

///
/// TESTS
///

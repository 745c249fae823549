use crate::{
    db::{Db, executor::decode_row, query::Query, store::DataKey},
    error::InternalError,
    obs::sink::{ExecKind, MetricsEvent, MetricsTarget, Span},
    traits::EntityKind,
};
use std::marker::PhantomData;

///
/// LoadExecutor
///

pub(crate) struct LoadExecutor<'a, E: EntityKind> {
    db: &'a Db,
    debug: bool,
    metrics: MetricsTarget,
    _marker: PhantomData<E>,
}

impl<'a, E: EntityKind> LoadExecutor<'a, E> {
    #[must_use]
    pub(crate) const fn new(db: &'a Db, debug: bool, metrics: MetricsTarget) -> Self {
        Self {
            db,
            debug,
            metrics,
            _marker: PhantomData,
        }
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            log::debug!("{}", s.as_ref());
        }
    }

    /// Matching entities in key order.
    pub(crate) fn execute(&self, query: &Query) -> Result<Vec<E>, InternalError> {
        query.validate_for::<E>()?;

        let mut span = Span::<E>::new(self.metrics, ExecKind::Load);
        let store = self.db.store()?;
        let mut scanned = 0u64;
        let mut out = Vec::new();

        if let Some(id) = query.key {
            let key = DataKey::new(E::PATH, id);
            if let Some(row) = store.get(&key) {
                scanned = 1;
                let entity = decode_row::<E>(&key, row)?;
                if query.matches(&entity) {
                    out.push(entity);
                }
            }
        } else {
            for (key, row) in store.entity_rows(E::PATH) {
                scanned = scanned.saturating_add(1);
                let entity = decode_row::<E>(key, row)?;
                if query.matches(&entity) {
                    out.push(entity);
                }
            }
        }

        self.metrics.record(MetricsEvent::RowsScanned {
            entity_path: E::PATH,
            rows_scanned: scanned,
        });
        span.set_rows(out.len() as u64);

        self.debug_log(format!(
            "load {} scanned={scanned} matched={} filters={}",
            E::PATH,
            out.len(),
            query.filters.len(),
        ));

        Ok(out)
    }
}

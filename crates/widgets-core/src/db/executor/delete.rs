use crate::{
    db::{Db, executor::decode_row, query::Query, store::DataKey},
    error::InternalError,
    obs::sink::{ExecKind, MetricsEvent, MetricsTarget, Span},
    traits::EntityKind,
};
use std::marker::PhantomData;

///
/// DeleteExecutor
///
/// Matching keys are collected and every row decoded before the first
/// removal, so a corrupt row aborts the delete without partial effects.
///

pub(crate) struct DeleteExecutor<'a, E: EntityKind> {
    db: &'a Db,
    debug: bool,
    metrics: MetricsTarget,
    _marker: PhantomData<E>,
}

impl<'a, E: EntityKind> DeleteExecutor<'a, E> {
    #[must_use]
    pub(crate) const fn new(db: &'a Db, debug: bool, metrics: MetricsTarget) -> Self {
        Self {
            db,
            debug,
            metrics,
            _marker: PhantomData,
        }
    }

    fn debug_log(&self, s: impl Into<String>) {
        if self.debug {
            log::debug!("{}", s.into());
        }
    }

    /// Remove matching rows, returning the count removed.
    pub(crate) fn execute(&self, query: &Query) -> Result<u64, InternalError> {
        query.validate_for::<E>()?;

        let mut span = Span::<E>::new(self.metrics, ExecKind::Delete);
        let mut store = self.db.store_mut()?;

        let candidates: Vec<DataKey> = match query.key {
            Some(id) => {
                let key = DataKey::new(E::PATH, id);
                if store.contains_key(&key) {
                    vec![key]
                } else {
                    Vec::new()
                }
            }
            None => store.entity_rows(E::PATH).map(|(key, _)| *key).collect(),
        };

        let mut doomed = Vec::with_capacity(candidates.len());
        for key in &candidates {
            let Some(row) = store.get(key) else {
                continue;
            };
            let entity = decode_row::<E>(key, row)?;
            if query.matches(&entity) {
                doomed.push(*key);
            }
        }

        self.metrics.record(MetricsEvent::RowsScanned {
            entity_path: E::PATH,
            rows_scanned: candidates.len() as u64,
        });

        for key in &doomed {
            store.remove(key);
        }

        let removed = doomed.len() as u64;
        span.set_rows(removed);

        self.debug_log(format!("delete {} removed={removed}", E::PATH));

        Ok(removed)
    }
}

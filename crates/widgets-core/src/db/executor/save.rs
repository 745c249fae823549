use crate::{
    db::{
        Db,
        store::{DataKey, DataStore, RawRow},
    },
    error::InternalError,
    obs::sink::{ExecKind, MetricsEvent, MetricsTarget, Span},
    sanitize::sanitize,
    traits::EntityKind,
    validate::validate,
};
use std::{collections::BTreeSet, marker::PhantomData};

///
/// SaveMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaveMode {
    /// Fail if the key already exists.
    Insert,
    /// Fail if the key does not exist.
    Update,
    /// Insert or overwrite.
    Replace,
}

///
/// SaveExecutor
///
/// Every entity is sanitized and validated before its row is staged.
/// Nothing is written to the store until staging succeeds.
///

pub(crate) struct SaveExecutor<'a, E: EntityKind> {
    db: &'a Db,
    debug: bool,
    metrics: MetricsTarget,
    _marker: PhantomData<E>,
}

impl<'a, E: EntityKind> SaveExecutor<'a, E> {
    // Debug is session-scoped via DbSession and propagated into executors;
    // executors do not expose independent debug control.
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

    // ======================================================================
    // Single-entity save operations
    // ======================================================================

    pub(crate) fn insert(&self, entity: E) -> Result<E, InternalError> {
        self.save_entity(SaveMode::Insert, entity)
    }

    pub(crate) fn update(&self, entity: E) -> Result<E, InternalError> {
        self.save_entity(SaveMode::Update, entity)
    }

    pub(crate) fn replace(&self, entity: E) -> Result<E, InternalError> {
        self.save_entity(SaveMode::Replace, entity)
    }

    fn save_entity(&self, mode: SaveMode, entity: E) -> Result<E, InternalError> {
        let mut span = Span::<E>::new(self.metrics, ExecKind::Save);
        let mut store = self.db.store_mut()?;

        let (key, row, entity) = self.prepare(&mut store, mode, entity)?;
        store.insert(key, row);
        span.set_rows(1);

        self.debug_log(format!("save {mode:?} committed {key}"));

        Ok(entity)
    }

    // ======================================================================
    // Batch save operations (explicit atomic and non-atomic lanes)
    // ======================================================================

    /// Save a batch with explicitly non-atomic semantics.
    pub(crate) fn save_batch_non_atomic(
        &self,
        mode: SaveMode,
        entities: impl IntoIterator<Item = E>,
    ) -> Result<Vec<E>, InternalError> {
        let iter = entities.into_iter();
        let mut out = Vec::with_capacity(iter.size_hint().0);
        let mut batch_index = 0usize;

        for entity in iter {
            batch_index = batch_index.saturating_add(1);
            match self.save_entity(mode, entity) {
                Ok(saved) => out.push(saved),
                Err(err) => {
                    if !out.is_empty() {
                        log::warn!(
                            "non-atomic batch partial commit: mode={mode:?} entity={} committed={} failed_at_item={} error={err}",
                            E::PATH,
                            out.len(),
                            batch_index,
                        );
                    }

                    return Err(err);
                }
            }
        }

        Ok(out)
    }

    /// Save a single-entity-type batch atomically.
    ///
    /// All entities are prevalidated first; if any entity fails, no row in
    /// this batch is persisted.
    pub(crate) fn save_batch_atomic(
        &self,
        mode: SaveMode,
        entities: impl IntoIterator<Item = E>,
    ) -> Result<Vec<E>, InternalError> {
        let mut span = Span::<E>::new(self.metrics, ExecKind::Save);
        let mut store = self.db.store_mut()?;

        let iter = entities.into_iter();
        let mut staged = Vec::with_capacity(iter.size_hint().0);
        let mut out = Vec::with_capacity(iter.size_hint().0);
        let mut seen = BTreeSet::new();

        // Validate and stage all rows before touching the store.
        for entity in iter {
            let (key, row, entity) = self.prepare(&mut store, mode, entity)?;
            if !seen.insert(key) {
                return Err(InternalError::executor_unsupported(format!(
                    "atomic save batch rejected duplicate key: {key}"
                )));
            }
            staged.push((key, row));
            out.push(entity);
        }

        let rows = staged.len();
        for (key, row) in staged {
            store.insert(key, row);
        }
        span.set_rows(rows as u64);

        self.debug_log(format!(
            "save batch {mode:?} committed {rows} row(s) for {}",
            E::PATH
        ));

        Ok(out)
    }

    // ======================================================================
    // Staging
    // ======================================================================

    // Sanitize, validate and resolve the key for one entity.
    // Does not write; identity generation is the only store mutation.
    fn prepare(
        &self,
        store: &mut DataStore,
        mode: SaveMode,
        mut entity: E,
    ) -> Result<(DataKey, RawRow, E), InternalError> {
        let checked = sanitize(&mut entity)
            .map_err(InternalError::from)
            .and_then(|()| validate(&entity).map_err(InternalError::from));

        if let Err(err) = checked {
            self.metrics
                .record(MetricsEvent::ValidationFailed { entity_path: E::PATH });
            self.debug_log(format!("save {mode:?} rejected {}: {err}", E::PATH));

            return Err(err);
        }

        let id = match (mode, entity.key()) {
            (SaveMode::Insert, Some(id)) if store.contains_key(&DataKey::new(E::PATH, id)) => {
                return Err(InternalError::store_conflict(
                    DataKey::new(E::PATH, id).to_string(),
                ));
            }
            (SaveMode::Update, Some(id)) if !store.contains_key(&DataKey::new(E::PATH, id)) => {
                return Err(InternalError::store_not_found(
                    DataKey::new(E::PATH, id).to_string(),
                ));
            }
            (SaveMode::Update, None) => {
                return Err(InternalError::store_not_found(format!(
                    "{} (entity has no key)",
                    E::PATH
                )));
            }
            (_, Some(id)) => id,
            (SaveMode::Insert | SaveMode::Replace, None) => {
                let id = store.next_id()?;
                entity.set_key(id);
                id
            }
        };

        let row = store.encode_row(&entity)?;

        Ok((DataKey::new(E::PATH, id), row, entity))
    }
}

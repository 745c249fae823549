use crate::{
    db::{
        Db, FluentDeleteQuery, FluentLoadQuery,
        executor::{SaveExecutor, SaveMode},
    },
    error::InternalError,
    obs::sink::{MetricsSink, MetricsTarget},
    traits::EntityKind,
};

///
/// DbSession
///
/// Session-scoped database handle with policy (debug, metrics) and execution routing.
///

pub struct DbSession<'a> {
    db: &'a Db,
    debug: bool,
    metrics: MetricsTarget,
}

impl<'a> DbSession<'a> {
    #[must_use]
    pub const fn new(db: &'a Db) -> Self {
        Self {
            db,
            debug: false,
            metrics: MetricsTarget::Global,
        }
    }

    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    #[must_use]
    pub const fn metrics_sink(mut self, sink: &'static dyn MetricsSink) -> Self {
        self.metrics = MetricsTarget::Sink(sink);
        self
    }

    #[must_use]
    pub const fn metrics_off(mut self) -> Self {
        self.metrics = MetricsTarget::Off;
        self
    }

    #[must_use]
    pub const fn db(&self) -> &'a Db {
        self.db
    }

    #[must_use]
    pub const fn is_debug(&self) -> bool {
        self.debug
    }

    pub(crate) const fn metrics(&self) -> MetricsTarget {
        self.metrics
    }

    fn save_executor<E: EntityKind>(&self) -> SaveExecutor<'a, E> {
        SaveExecutor::new(self.db, self.debug, self.metrics)
    }

    // ======================================================================
    // Load / delete
    // ======================================================================

    #[must_use]
    pub fn load<E: EntityKind>(&self) -> FluentLoadQuery<'_, E> {
        FluentLoadQuery::new(self)
    }

    #[must_use]
    pub fn delete<E: EntityKind>(&self) -> FluentDeleteQuery<'_, E> {
        FluentDeleteQuery::new(self)
    }

    // ======================================================================
    // Save
    // ======================================================================

    /// Insert a brand-new entity (errors if the key already exists).
    pub fn insert<E: EntityKind>(&self, entity: E) -> Result<E, InternalError> {
        self.save_executor::<E>().insert(entity)
    }

    /// Update an existing entity (errors if it does not exist).
    pub fn update<E: EntityKind>(&self, entity: E) -> Result<E, InternalError> {
        self.save_executor::<E>().update(entity)
    }

    /// Replace an entity, inserting if missing.
    pub fn replace<E: EntityKind>(&self, entity: E) -> Result<E, InternalError> {
        self.save_executor::<E>().replace(entity)
    }

    /// Insert a batch atomically: nothing is written unless every entity
    /// passes sanitization and validation.
    pub fn insert_many<E: EntityKind>(
        &self,
        entities: impl IntoIterator<Item = E>,
    ) -> Result<Vec<E>, InternalError> {
        self.save_executor::<E>()
            .save_batch_atomic(SaveMode::Insert, entities)
    }

    /// Save a batch with explicitly non-atomic semantics.
    ///
    /// WARNING: fail-fast and non-atomic. If one element fails, earlier
    /// elements in the batch remain committed.
    pub fn save_batch_non_atomic<E: EntityKind>(
        &self,
        mode: SaveMode,
        entities: impl IntoIterator<Item = E>,
    ) -> Result<Vec<E>, InternalError> {
        self.save_executor::<E>()
            .save_batch_non_atomic(mode, entities)
    }
}

pub mod executor;
pub mod query;
pub mod session;
pub mod store;

pub use executor::SaveMode;
pub use query::{Filter, FluentDeleteQuery, FluentLoadQuery, Query};
pub use session::DbSession;

use crate::{config::DbConfig, db::store::DataStore, error::InternalError};
use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

///
/// Db
///
/// Shared handle to one in-memory store. Clones share the same rows.
/// The handle is single-threaded by construction (`Rc<RefCell<_>>`).
///

#[derive(Clone, Debug, Default)]
pub struct Db {
    store: Rc<RefCell<DataStore>>,
    config: Rc<DbConfig>,
}

impl Db {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a validated configuration.
    pub fn with_config(config: DbConfig) -> Result<Self, InternalError> {
        config.validate()?;

        Ok(Self {
            store: Rc::new(RefCell::new(DataStore::new(config.max_row_bytes))),
            config: Rc::new(config),
        })
    }

    #[must_use]
    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Open a session with the policy defaults from the configuration.
    #[must_use]
    pub fn session(&self) -> DbSession<'_> {
        let session = DbSession::new(self);
        let session = if self.config.debug {
            session.debug()
        } else {
            session
        };

        if self.config.metrics {
            session
        } else {
            session.metrics_off()
        }
    }

    /// Borrow the store for reading.
    pub fn store(&self) -> Result<Ref<'_, DataStore>, InternalError> {
        self.store
            .try_borrow()
            .map_err(|_| InternalError::store_invariant("store is mutably borrowed"))
    }

    /// Borrow the store for writing.
    ///
    /// Writes through this handle bypass sanitization and validation.
    pub fn store_mut(&self) -> Result<RefMut<'_, DataStore>, InternalError> {
        self.store
            .try_borrow_mut()
            .map_err(|_| InternalError::store_invariant("store is already borrowed"))
    }

    /// Remove every row. Identity generation keeps advancing.
    pub fn clear(&self) -> Result<(), InternalError> {
        self.store_mut()?.clear();

        Ok(())
    }
}

use crate::{
    Ulid,
    db::store::{DataKey, MAX_ROW_BYTES},
    error::{ErrorClass, ErrorOrigin, InternalError},
    serialize::serialize,
    traits::EntityKind,
};
use derive_more::{Deref, DerefMut};
use std::{
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};
use thiserror::Error as ThisError;

///
/// DataStore
///
/// In-memory ordered row map. The store enforces row size limits and owns
/// identity generation; it does not validate entity contents.
///

#[derive(Debug, Deref, DerefMut)]
pub struct DataStore {
    #[deref]
    #[deref_mut]
    rows: BTreeMap<DataKey, RawRow>,
    last_id: Ulid,
    max_row_bytes: u32,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new(MAX_ROW_BYTES)
    }
}

impl DataStore {
    #[must_use]
    pub const fn new(max_row_bytes: u32) -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: Ulid::nil(),
            max_row_bytes,
        }
    }

    #[must_use]
    pub const fn max_row_bytes(&self) -> u32 {
        self.max_row_bytes
    }

    /// Generate the next identity.
    ///
    /// Identities are strictly increasing for the lifetime of the store,
    /// even if the clock stalls or runs backwards.
    pub fn next_id(&mut self) -> Result<Ulid, InternalError> {
        let now = now_millis();

        let next = if now > self.last_id.timestamp_ms() {
            Ulid::from_parts(now, 0)
        } else {
            self.last_id
                .increment()
                .ok_or_else(|| InternalError::store_invariant("identity space exhausted"))?
        };
        self.last_id = next;

        Ok(next)
    }

    /// Encode a row, enforcing the configured size limit.
    pub fn encode_row<E: EntityKind>(&self, entity: &E) -> Result<RawRow, InternalError> {
        let bytes = serialize(entity)?;

        Ok(RawRow::try_new(bytes, self.max_row_bytes)?)
    }

    /// Write an entity without sanitizing or validating it.
    ///
    /// Assigns an identity when the entity has none and overwrites any
    /// existing row with the same key.
    pub fn insert_raw<E: EntityKind>(&mut self, mut entity: E) -> Result<E, InternalError> {
        let id = match entity.key() {
            Some(id) => id,
            None => {
                let id = self.next_id()?;
                entity.set_key(id);
                id
            }
        };
        let row = self.encode_row(&entity)?;
        self.rows.insert(DataKey::new(E::PATH, id), row);

        Ok(entity)
    }

    /// Rows stored under one entity path, in key order.
    pub fn entity_rows(
        &self,
        entity: &'static str,
    ) -> impl Iterator<Item = (&DataKey, &RawRow)> + '_ {
        self.rows
            .range(DataKey::lower_bound(entity)..=DataKey::upper_bound(entity))
    }

    /// Number of rows stored under one entity path.
    #[must_use]
    pub fn entity_len(&self, entity: &'static str) -> usize {
        self.entity_rows(entity).count()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

///
/// RawRowError
///

#[derive(Debug, ThisError)]
pub enum RawRowError {
    #[error("row exceeds max size: {len} bytes (limit {limit})")]
    TooLarge { len: usize, limit: u32 },
}

impl RawRowError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Unsupported
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Store
    }
}

impl From<RawRowError> for InternalError {
    fn from(err: RawRowError) -> Self {
        Self::new(err.class(), err.origin(), err.to_string())
    }
}

///
/// RawRow
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawRow(Vec<u8>);

impl RawRow {
    pub fn try_new(bytes: Vec<u8>, limit: u32) -> Result<Self, RawRowError> {
        if bytes.len() > limit as usize {
            return Err(RawRowError::TooLarge {
                len: bytes.len(),
                limit,
            });
        }

        Ok(Self(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

///
/// TESTS
///

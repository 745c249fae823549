use crate::Ulid;
use std::fmt::{self, Display};

///
/// DataKey
/// Row address: entity path plus the identity the store assigned.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DataKey {
    pub entity: &'static str,
    pub id: Ulid,
}

impl DataKey {
    #[must_use]
    pub const fn new(entity: &'static str, id: Ulid) -> Self {
        Self { entity, id }
    }

    /// Lowest key for an entity path.
    #[must_use]
    pub const fn lower_bound(entity: &'static str) -> Self {
        Self::new(entity, Ulid::nil())
    }

    /// Highest key for an entity path.
    #[must_use]
    pub const fn upper_bound(entity: &'static str) -> Self {
        Self::new(entity, Ulid(u128::MAX))
    }
}

impl Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.entity, self.id)
    }
}

use derive_more::Deref;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display};

///
/// FormData
///
/// Raw submitted input, field name to text. Values are kept exactly as
/// submitted; trimming and coercion happen when a form is bound.
///
/// Mutation goes through `insert` / `with`; there is no `DerefMut`.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder form of [`FormData::insert`].
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Display) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field, replacing any earlier value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Display) {
        self.0.insert(field.into(), value.to_string());
    }

    /// Raw value of a field, if it was submitted.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (field, value) in iter {
            data.insert(field, value);
        }

        data
    }
}

///
/// TESTS
///

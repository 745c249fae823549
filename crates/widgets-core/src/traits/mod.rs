mod visitor;

pub use visitor::*;

use crate::{Ulid, value::Value, visitor::VisitorContext};
use serde::{Serialize, de::DeserializeOwned};

/// ============================================================================
/// ENTITY
/// ============================================================================

///
/// Path
/// Fully qualified, stable name of a stored type.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// EntityKind
///
/// A persisted record type. The store owns identity: `key` is `None` until
/// the entity has been inserted, and `set_key` is only called by the store.
///

pub trait EntityKind: Path + Visitable + Clone + Serialize + DeserializeOwned + 'static {
    /// Field names in declaration order, excluding the key.
    const FIELDS: &'static [&'static str];

    fn key(&self) -> Option<Ulid>;

    fn set_key(&mut self, key: Ulid);

    /// Value of a named field, or `None` if the entity has no such field.
    fn field_value(&self, field: &str) -> Option<Value>;
}

/// ============================================================================
/// SANITIZATION / VALIDATION
/// ============================================================================

///
/// Sanitizer
///
/// Transforms a value into a sanitized version.
///
pub trait Sanitizer<T: ?Sized> {
    fn sanitize(&self, value: &mut T) -> Result<(), String>;
}

///
/// Validator
///
/// Allows a node to validate values.
///
pub trait Validator<T: ?Sized> {
    fn validate(&self, value: &T, ctx: &mut dyn VisitorContext);
}

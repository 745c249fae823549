//! Core runtime for widgets: entity traits, values, the in-memory store and
//! its executors, field passes, and the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod obs;
pub mod sanitize;
pub mod serialize;
pub mod traits;
pub mod validate;
pub mod value;
pub mod visitor;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use ulid::Ulid;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, executors, stores, serializers, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        Ulid,
        traits::{EntityKind, Path, Sanitize, Sanitizer, Validate, Validator, Visitable},
        value::Value,
        visitor::{ScopedContext, VisitorContext},
    };
}

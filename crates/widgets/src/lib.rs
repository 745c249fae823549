//! ## Crate layout
//! - `core`: the runtime (store, sessions, visitors, values, config, metrics).
//! - `error`: the public error surface.
//! - `form`: binds raw submitted input to a `Widget`.
//! - `sanitizer` / `validator`: field rules applied by the visitor pass.
//! - `widget`: the `Widget` entity.
//!
//! The `prelude` module carries what application code needs to bind a form
//! and persist the result.
#![warn(unreachable_pub)]

pub use widgets_core as core;

pub mod error;
pub mod form;
pub mod sanitizer;
pub mod validator;
pub mod widget;

pub use error::Error;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        core::{
            Ulid,
            config::DbConfig,
            db::{Db, DbSession},
            traits::{EntityKind as _, Path as _},
            value::Value,
        },
        form::{FormData, FormErrors, WidgetForm},
        validator::validate_weight,
        widget::{Widget, WidgetDraft},
    };
}

//! Field passes over a record.
//!
//! Sanitizers rewrite fields in place; validators report every problem they
//! find. Both report through a [`VisitorContext`], and the pass collects the
//! reports into an [`Issues`] map keyed by field name.

mod context;
pub mod sanitize;
pub mod validate;

pub use context::{IssueCollector, ScopedContext, VisitorContext};
pub use sanitize::{SanitizeError, SanitizeIssue};
pub use validate::ValidateError;

use std::collections::BTreeMap;

///
/// Issues
/// Field name to messages, in report order.
///

pub type Issues = BTreeMap<String, Vec<String>>;

///
/// TESTS
///

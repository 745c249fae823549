use crate::visitor::{SanitizeIssue, VisitorContext};

///
/// Sanitize
///
/// Field rewrites applied before a record is validated or stored.
/// Returning a `SanitizeIssue` aborts the save; anything reported to `ctx`
/// fails it once the pass is over.
///

pub trait Sanitize {
    fn sanitize_fields(&mut self, _ctx: &mut dyn VisitorContext) -> Result<(), SanitizeIssue> {
        Ok(())
    }
}

///
/// Validate
/// The record's field rules. Reports every problem, never stops early.
///

pub trait Validate {
    fn validate_fields(&self, ctx: &mut dyn VisitorContext);
}

///
/// Visitable
/// Anything that can go through the sanitize and validate passes.
///

pub trait Visitable: Sanitize + Validate {}

impl<T> Visitable for T where T: Sanitize + Validate {}

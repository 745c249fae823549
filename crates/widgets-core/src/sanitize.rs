use crate::{
    traits::Visitable,
    visitor::{IssueCollector, SanitizeError},
};

///
/// sanitize
/// Run a record's field sanitizers in place.
///
/// Reported issues are collected by field; a `SanitizeIssue` returned by the
/// record aborts the pass immediately.
///
pub fn sanitize(node: &mut dyn Visitable) -> Result<(), SanitizeError> {
    let mut collector = IssueCollector::new();
    node.sanitize_fields(&mut collector)?;

    let issues = collector.into_issues();

    if issues.is_empty() {
        Ok(())
    } else {
        Err(SanitizeError::Reported(issues))
    }
}

///
/// TESTS
///

use crate::{
    traits::Visitable,
    visitor::{IssueCollector, ValidateError},
};

///
/// validate
/// Run a record's field rules, collecting issues by field.
///
/// Every rule runs; the pass fails once, at the end, if any reported.
///
pub fn validate(node: &dyn Visitable) -> Result<(), ValidateError> {
    let mut collector = IssueCollector::new();
    node.validate_fields(&mut collector);

    let issues = collector.into_issues();

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::new(issues))
    }
}

///
/// TESTS
///

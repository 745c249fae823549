use crate::visitor::Issues;

///
/// VisitorContext
///
/// Sink that field rules report into while a record is checked.
/// `field` is `None` for record-level problems.
///

pub trait VisitorContext {
    fn report(&mut self, field: Option<&'static str>, message: String);
}

impl dyn VisitorContext + '_ {
    pub fn issue(&mut self, msg: impl Into<String>) {
        self.report(None, msg.into());
    }

    pub fn issue_at(&mut self, field: &'static str, msg: impl Into<String>) {
        self.report(Some(field), msg.into());
    }
}

///
/// ScopedContext
/// Hands a rule a view of the context that files everything under one field.
///

pub struct ScopedContext<'a> {
    parent: &'a mut dyn VisitorContext,
    field: &'static str,
}

impl<'a> ScopedContext<'a> {
    #[must_use]
    pub fn new(parent: &'a mut dyn VisitorContext, field: &'static str) -> Self {
        Self { parent, field }
    }
}

impl VisitorContext for ScopedContext<'_> {
    fn report(&mut self, _field: Option<&'static str>, message: String) {
        self.parent.report(Some(self.field), message);
    }
}

///
/// IssueCollector
///
/// Root context of a pass. Record-level problems are kept under the
/// empty key.
///

#[derive(Debug, Default)]
pub struct IssueCollector {
    issues: Issues,
}

impl IssueCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn into_issues(self) -> Issues {
        self.issues
    }
}

impl VisitorContext for IssueCollector {
    fn report(&mut self, field: Option<&'static str>, message: String) {
        self.issues
            .entry(field.unwrap_or_default().to_string())
            .or_default()
            .push(message);
    }
}

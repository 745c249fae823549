use crate::{error::InternalError, visitor::Issues};
use thiserror::Error as ThisError;

///
/// ValidateError
/// A validation pass that found at least one problem.
///

#[derive(Debug, ThisError)]
#[error("validation failed for {} field(s)", .0.len())]
pub struct ValidateError(Issues);

impl ValidateError {
    #[must_use]
    pub const fn new(issues: Issues) -> Self {
        Self(issues)
    }

    #[must_use]
    pub const fn issues(&self) -> &Issues {
        &self.0
    }

    #[must_use]
    pub fn into_issues(self) -> Issues {
        self.0
    }
}

impl From<ValidateError> for InternalError {
    fn from(err: ValidateError) -> Self {
        Self::validation(err.0)
    }
}

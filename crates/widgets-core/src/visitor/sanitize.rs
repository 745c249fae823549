use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    visitor::Issues,
};
use thiserror::Error as ThisError;

///
/// SanitizeError
///

#[derive(Debug, ThisError)]
pub enum SanitizeError {
    #[error("sanitization reported {} field(s)", .0.len())]
    Reported(Issues),

    #[error("sanitizer aborted: {0}")]
    Aborted(#[from] SanitizeIssue),
}

impl From<SanitizeError> for InternalError {
    fn from(err: SanitizeError) -> Self {
        match err {
            SanitizeError::Reported(issues) => Self::validation(issues),
            SanitizeError::Aborted(issue) => {
                Self::new(ErrorClass::Unsupported, ErrorOrigin::Visitor, issue.message)
            }
        }
    }
}

///
/// SanitizeIssue
/// A value the sanitizer cannot repair. Stops the pass.
///

#[derive(Clone, Debug, ThisError)]
#[error("{message}")]
pub struct SanitizeIssue {
    pub message: String,
}

impl SanitizeIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

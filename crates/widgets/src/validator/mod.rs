pub mod len;
pub mod num;

pub use len::{HasLen, MaxLen};
pub use num::{WeightRange, validate_weight};

use thiserror::Error as ThisError;

///
/// ValidationError
///
/// A single, user-correctable rule violation.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}

use crate::{core::error::InternalError, form::FormError};
use thiserror::Error as ThisError;

///
/// Error
/// Public error surface of the `widgets` crate.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl Error {
    /// Field errors, if a form submission was rejected.
    #[must_use]
    pub const fn form_errors(&self) -> Option<&crate::form::FormErrors> {
        match self {
            Self::Form(err) => err.form_errors(),
            _ => None,
        }
    }
}

use std::{collections::BTreeMap, fmt};
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError with optional origin-specific detail.
    /// Store invariant and corruption errors carry a default `StoreError`.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        let message = message.into();

        let detail = match (class, origin) {
            (ErrorClass::Corruption, ErrorOrigin::Store) => {
                Some(ErrorDetail::Store(StoreError::Corrupt {
                    message: message.clone(),
                }))
            }
            (ErrorClass::InvariantViolation, ErrorOrigin::Store) => {
                Some(ErrorDetail::Store(StoreError::InvariantViolation {
                    message: message.clone(),
                }))
            }
            _ => None,
        };

        Self {
            class,
            origin,
            message,
            detail,
        }
    }

    /// Construct a store-origin invariant violation.
    pub(crate) fn store_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Store,
            message.into(),
        )
    }

    /// Construct a store-origin corruption error.
    pub(crate) fn store_corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Corruption, ErrorOrigin::Store, message.into())
    }

    /// Construct an executor-origin unsupported error.
    pub(crate) fn executor_unsupported(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::Unsupported,
            ErrorOrigin::Executor,
            message.into(),
        )
    }

    pub fn store_not_found(key: impl Into<String>) -> Self {
        let key = key.into();

        Self {
            class: ErrorClass::NotFound,
            origin: ErrorOrigin::Store,
            message: format!("data key not found: {key}"),
            detail: Some(ErrorDetail::Store(StoreError::NotFound { key })),
        }
    }

    pub fn store_conflict(key: impl Into<String>) -> Self {
        let key = key.into();

        Self {
            class: ErrorClass::Conflict,
            origin: ErrorOrigin::Store,
            message: format!("data key already exists: {key}"),
            detail: Some(ErrorDetail::Store(StoreError::Conflict { key })),
        }
    }

    /// Construct a validation failure carrying the issue map.
    pub fn validation(issues: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            class: ErrorClass::Validation,
            origin: ErrorOrigin::Visitor,
            message: format!("validation failed: {}", render_issues(&issues)),
            detail: Some(ErrorDetail::Validation(issues)),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self.detail,
            Some(ErrorDetail::Store(StoreError::NotFound { .. }))
        )
    }

    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self.class, ErrorClass::Conflict)
    }

    /// Issues collected by a failed visitor pass, keyed by field path.
    #[must_use]
    pub const fn issues(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match &self.detail {
            Some(ErrorDetail::Validation(issues)) => Some(issues),
            _ => None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

// Render an issue map as `path: msg; path: msg` for log lines.
fn render_issues(issues: &BTreeMap<String, Vec<String>>) -> String {
    issues
        .iter()
        .flat_map(|(path, msgs)| {
            msgs.iter().map(move |msg| {
                if path.is_empty() {
                    msg.clone()
                } else {
                    format!("{path}: {msg}")
                }
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Store(StoreError),

    #[error("{} field(s) failed validation", .0.len())]
    Validation(BTreeMap<String, Vec<String>>),
}

///
/// StoreError
///
/// Store-specific structured error detail.
/// Never returned directly; always wrapped in [`ErrorDetail::Store`].
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("key not found: {key}")]
    NotFound { key: String },

    #[error("key already exists: {key}")]
    Conflict { key: String },

    #[error("store corruption: {message}")]
    Corrupt { message: String },

    #[error("store invariant violation: {message}")]
    InvariantViolation { message: String },
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Corruption,
    NotFound,
    Internal,
    Conflict,
    Unsupported,
    InvariantViolation,
    Validation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Corruption => "corruption",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
            Self::Conflict => "conflict",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
            Self::Validation => "validation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Config,
    Executor,
    Query,
    Serialize,
    Store,
    Visitor,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Config => "config",
            Self::Executor => "executor",
            Self::Query => "query",
            Self::Serialize => "serialize",
            Self::Store => "store",
            Self::Visitor => "visitor",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_carries_key_detail() {
        let err = InternalError::store_not_found("01ARZ3NDEKTSV4RRFFQ69G5FAV");

        assert!(err.is_not_found());
        assert_eq!(err.class, ErrorClass::NotFound);
        assert_eq!(
            err.display_with_class(),
            "store:not_found: data key not found: 01ARZ3NDEKTSV4RRFFQ69G5FAV"
        );
    }

    #[test]
    fn store_corruption_gets_default_detail() {
        let err = InternalError::store_corruption("row truncated");

        assert!(matches!(
            err.detail,
            Some(ErrorDetail::Store(StoreError::Corrupt { .. }))
        ));
        assert!(!err.is_not_found());
    }

    #[test]
    fn validation_error_keeps_issue_map() {
        let mut issues = BTreeMap::new();
        issues.insert("weight".to_string(), vec!["Weight must be positive.".to_string()]);

        let err = InternalError::validation(issues);

        assert_eq!(err.class, ErrorClass::Validation);
        assert_eq!(
            err.issues().and_then(|m| m.get("weight")).map(Vec::len),
            Some(1)
        );
        assert_eq!(
            err.to_string(),
            "validation failed: weight: Weight must be positive."
        );
    }
}

mod data;
mod errors;
mod field;

pub use data::FormData;
pub use errors::FormErrors;
pub use field::{FloatField, INVALID_NUMBER, REQUIRED, TextField};

use crate::{
    core::{db::DbSession, error::InternalError, traits::Path, validate::validate},
    validator::{ValidationError, validate_weight},
    widget::{NAME_MAX_LEN, Widget, WidgetDraft},
};
use thiserror::Error as ThisError;

///
/// FormError
///

#[derive(Debug, ThisError)]
pub enum FormError {
    #[error("form is invalid: {0}")]
    Invalid(FormErrors),

    #[error(transparent)]
    Store(#[from] InternalError),
}

impl FormError {
    /// Field errors, when the form itself was rejected.
    #[must_use]
    pub const fn form_errors(&self) -> Option<&FormErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Store(_) => None,
        }
    }
}

///
/// WidgetForm
///
/// Binds raw input to a `Widget`. Cleaning runs once, when the form is
/// built: each field is coerced in declaration order, the weight rule
/// runs on the coerced value, and once every field is clean the entity
/// validators run over the candidate widget.
///

#[derive(Clone, Debug)]
pub struct WidgetForm {
    data: FormData,
    instance: Option<Widget>,
    cleaned: Option<WidgetDraft>,
    errors: FormErrors,
}

impl WidgetForm {
    const NAME: TextField = TextField {
        max_len: Some(NAME_MAX_LEN),
    };

    /// Bind input for a new widget.
    #[must_use]
    pub fn new(data: FormData) -> Self {
        Self::bind(data, None)
    }

    /// Bind input that edits an existing widget.
    #[must_use]
    pub fn for_instance(instance: Widget, data: FormData) -> Self {
        Self::bind(data, Some(instance))
    }

    fn bind(data: FormData, instance: Option<Widget>) -> Self {
        let mut errors = FormErrors::new();

        let name = Self::NAME.clean(data.value("name"));
        let name = keep_clean(&mut errors, "name", name);

        // the weight rule only sees a coerced value
        let weight = FloatField
            .clean(data.value("weight"))
            .and_then(|w| validate_weight(Some(w)));
        let weight = keep_clean(&mut errors, "weight", weight).flatten();

        let cleaned = match (name, weight) {
            (Some(name), Some(weight)) => {
                let draft = WidgetDraft { name, weight };
                Self::validate_candidate(&draft, &mut errors);
                errors.is_empty().then_some(draft)
            }
            _ => None,
        };

        Self {
            data,
            instance,
            cleaned,
            errors,
        }
    }

    // entity validators over the would-be record
    fn validate_candidate(draft: &WidgetDraft, errors: &mut FormErrors) {
        let candidate = Widget::from(draft.clone());

        if let Err(err) = validate(&candidate) {
            errors.merge(err.into_issues());
        }
    }

    #[must_use]
    pub const fn data(&self) -> &FormData {
        &self.data
    }

    #[must_use]
    pub const fn instance(&self) -> Option<&Widget> {
        self.instance.as_ref()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub const fn errors(&self) -> &FormErrors {
        &self.errors
    }

    #[must_use]
    pub const fn cleaned(&self) -> Option<&WidgetDraft> {
        self.cleaned.as_ref()
    }

    pub fn into_result(self) -> Result<WidgetDraft, FormErrors> {
        match self.cleaned {
            Some(draft) if self.errors.is_empty() => Ok(draft),
            _ => Err(self.errors),
        }
    }

    /// Persist the cleaned widget. A bound instance that already has an id
    /// is updated in place; anything else is inserted. An invalid form
    /// writes nothing.
    pub fn save(self, session: &DbSession<'_>) -> Result<Widget, FormError> {
        let Self {
            instance,
            cleaned,
            errors,
            ..
        } = self;

        let draft = match cleaned {
            Some(draft) if errors.is_empty() => draft,
            _ => {
                if session.is_debug() {
                    log::debug!("form rejected for {}: {errors}", Widget::PATH);
                }
                return Err(FormError::Invalid(errors));
            }
        };

        let saved = match instance {
            Some(mut widget) if widget.id.is_some() => {
                widget.apply(draft);
                session.update(widget)?
            }
            Some(mut widget) => {
                widget.apply(draft);
                session.insert(widget)?
            }
            None => session.insert(Widget::from(draft))?,
        };

        Ok(saved)
    }
}

// Keep a clean value, or record its error against the field.
fn keep_clean<T>(
    errors: &mut FormErrors,
    field: &str,
    result: Result<T, ValidationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.add(field, err.into_message());
            None
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, weight: impl std::fmt::Display) -> WidgetForm {
        WidgetForm::new(FormData::new().with("name", name).with("weight", weight))
    }

    #[test]
    fn negative_weight_is_invalid() {
        let form = form("Test Widget", -10);

        assert!(!form.is_valid());
        assert_eq!(form.errors().field("weight"), ["Weight must be positive."]);
        assert!(form.cleaned().is_none());
    }

    #[test]
    fn valid_weight_is_cleaned_unchanged() {
        let form = form("Test Widget", 50);

        assert!(form.is_valid());
        assert_eq!(
            form.cleaned(),
            Some(&WidgetDraft {
                name: "Test Widget".to_string(),
                weight: 50.0,
            })
        );
    }

    #[test]
    fn heavy_weight_is_invalid() {
        let form = form("Test Widget", 150);

        assert_eq!(form.errors().field("weight"), ["Weight must be 100 or less."]);
    }

    #[test]
    fn name_limit_counts_trimmed_text() {
        let padded = format!("  {}  ", "x".repeat(NAME_MAX_LEN));
        let form = form(&padded, 1);

        assert!(form.is_valid());
        assert_eq!(form.cleaned().map(|d| d.name.len()), Some(NAME_MAX_LEN));
    }

    #[test]
    fn missing_fields_are_required() {
        let form = WidgetForm::new(FormData::new());

        assert_eq!(form.errors().field("name"), [REQUIRED]);
        assert_eq!(form.errors().field("weight"), [REQUIRED]);
    }

    #[test]
    fn every_field_is_reported() {
        let form = form(&"x".repeat(NAME_MAX_LEN + 1), "heavy");

        assert_eq!(
            form.errors().field("name"),
            ["Ensure this value has at most 100 characters (it has 101)."]
        );
        assert_eq!(form.errors().field("weight"), [INVALID_NUMBER]);
    }

    #[test]
    fn into_result_yields_draft_or_errors() {
        assert!(form("Test Widget", 100).into_result().is_ok());

        let errors = form("Test Widget", 100.0001).into_result().unwrap_err();
        assert!(errors.contains("weight", "Weight must be 100 or less."));
    }
}

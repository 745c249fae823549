use crate::{
    core::{
        Ulid,
        traits::{EntityKind, Path, Sanitize, Sanitizer, Validate, Validator},
        value::Value,
        visitor::{SanitizeIssue, ScopedContext, VisitorContext},
    },
    sanitizer::Trim,
    validator::{MaxLen, WeightRange},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted name, in characters.
pub const NAME_MAX_LEN: usize = 100;

///
/// Widget
///
/// The persisted entity. `id` is assigned by the store on insert.
/// Whenever a widget is written through a session, `0 < weight <= 100`.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Widget {
    pub id: Option<Ulid>,
    pub name: String,
    pub weight: f64,
}

impl Widget {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            weight,
        }
    }

    /// Overwrite the editable fields from a cleaned draft, keeping identity.
    pub fn apply(&mut self, draft: WidgetDraft) {
        self.name = draft.name;
        self.weight = draft.weight;
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<WidgetDraft> for Widget {
    fn from(draft: WidgetDraft) -> Self {
        Self::new(draft.name, draft.weight)
    }
}

impl Path for Widget {
    const PATH: &'static str = "widgets::Widget";
}

impl Sanitize for Widget {
    fn sanitize_fields(&mut self, ctx: &mut dyn VisitorContext) -> Result<(), SanitizeIssue> {
        if let Err(msg) = Trim.sanitize(&mut self.name) {
            ctx.issue_at("name", msg);
        }

        Ok(())
    }
}

impl Validate for Widget {
    fn validate_fields(&self, ctx: &mut dyn VisitorContext) {
        MaxLen::new(NAME_MAX_LEN)
            .validate(self.name.as_str(), &mut ScopedContext::new(ctx, "name"));
        WeightRange.validate(&self.weight, &mut ScopedContext::new(ctx, "weight"));
    }
}

impl EntityKind for Widget {
    const FIELDS: &'static [&'static str] = &["name", "weight"];

    fn key(&self) -> Option<Ulid> {
        self.id
    }

    fn set_key(&mut self, key: Ulid) {
        self.id = Some(key);
    }

    fn field_value(&self, field: &str) -> Option<Value> {
        match field {
            "name" => Some(Value::from(self.name.as_str())),
            "weight" => Some(Value::from(self.weight)),
            _ => None,
        }
    }
}

///
/// WidgetDraft
/// A cleaned `(name, weight)` pair, ready to be persisted.
///

#[derive(Clone, Debug, PartialEq)]
pub struct WidgetDraft {
    pub name: String,
    pub weight: f64,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{sanitize::sanitize, validate::validate};

    #[test]
    fn display_is_name_verbatim() {
        assert_eq!(Widget::new("Test Widget", 50.0).to_string(), "Test Widget");
    }

    #[test]
    fn validate_reports_weight_under_its_field() {
        let err = validate(&Widget::new("Test Widget", -10.0)).unwrap_err();

        assert_eq!(
            err.issues().get("weight"),
            Some(&vec!["Weight must be positive.".to_string()])
        );
    }

    #[test]
    fn validate_collects_every_field() {
        let err = validate(&Widget::new("x".repeat(NAME_MAX_LEN + 1), 150.0)).unwrap_err();
        let issues = err.into_issues();

        assert_eq!(
            issues["name"],
            vec!["Ensure this value has at most 100 characters (it has 101).".to_string()]
        );
        assert_eq!(issues["weight"], vec!["Weight must be 100 or less.".to_string()]);
    }

    #[test]
    fn sanitize_trims_name() {
        let mut widget = Widget::new("  Test Widget  ", 50.0);
        sanitize(&mut widget).unwrap();

        assert_eq!(widget.name, "Test Widget");
    }

    #[test]
    fn field_values_project_for_filters() {
        let widget = Widget::new("Test Widget", 50.0);

        assert_eq!(widget.field_value("name"), Some(Value::from("Test Widget")));
        assert_eq!(widget.field_value("weight"), Some(Value::Float(50.0)));
        assert_eq!(widget.field_value("colour"), None);
    }

    #[test]
    fn apply_keeps_identity() {
        let id = Ulid::from_parts(1, 1);
        let mut widget = Widget {
            id: Some(id),
            ..Widget::new("old", 1.0)
        };

        widget.apply(WidgetDraft {
            name: "new".into(),
            weight: 2.0,
        });

        assert_eq!(widget.id, Some(id));
        assert_eq!(widget.name, "new");
    }
}

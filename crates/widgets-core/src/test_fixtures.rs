//! Small visitable types shared by the unit tests in this crate.

use crate::{
    Ulid,
    traits::{EntityKind, Path, Sanitize, Validate},
    value::Value,
    visitor::{SanitizeIssue, VisitorContext},
};
use serde::{Deserialize, Serialize};

///
/// Bounded
/// Clamps negatives to zero; values above 10 are invalid.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct Bounded {
    pub(crate) value: i64,
}

impl Sanitize for Bounded {
    fn sanitize_fields(&mut self, _ctx: &mut dyn VisitorContext) -> Result<(), SanitizeIssue> {
        if self.value == i64::MIN {
            return Err(SanitizeIssue::new("value cannot be clamped"));
        }
        self.value = self.value.max(0);

        Ok(())
    }
}

impl Validate for Bounded {
    fn validate_fields(&self, ctx: &mut dyn VisitorContext) {
        if self.value > 10 {
            ctx.issue_at("value", "value must be <= 10");
        }
    }
}

///
/// Gadget
/// Minimal entity: trimmed label, size at most 10.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct Gadget {
    pub(crate) id: Option<Ulid>,
    pub(crate) label: String,
    pub(crate) size: u32,
}

impl Gadget {
    pub(crate) fn new(label: &str, size: u32) -> Self {
        Self {
            id: None,
            label: label.to_string(),
            size,
        }
    }
}

impl Path for Gadget {
    const PATH: &'static str = "widgets_core::test::Gadget";
}

impl Sanitize for Gadget {
    fn sanitize_fields(&mut self, _ctx: &mut dyn VisitorContext) -> Result<(), SanitizeIssue> {
        let trimmed = self.label.trim();
        if trimmed.len() != self.label.len() {
            self.label = trimmed.to_string();
        }

        Ok(())
    }
}

impl Validate for Gadget {
    fn validate_fields(&self, ctx: &mut dyn VisitorContext) {
        if self.size > 10 {
            ctx.issue_at("size", "size must be <= 10");
        }
    }
}

impl EntityKind for Gadget {
    const FIELDS: &'static [&'static str] = &["label", "size"];

    fn key(&self) -> Option<Ulid> {
        self.id
    }

    fn set_key(&mut self, key: Ulid) {
        self.id = Some(key);
    }

    fn field_value(&self, field: &str) -> Option<Value> {
        match field {
            "label" => Some(Value::from(self.label.as_str())),
            "size" => Some(Value::from(self.size)),
            _ => None,
        }
    }
}

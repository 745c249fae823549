use derive_more::Deref;
use serde::Serialize;
use std::{collections::BTreeMap, fmt};

///
/// FormErrors
///
/// Field name to the messages reported for it, in the order they were
/// found. A message appears at most once per field.
///

#[derive(Clone, Debug, Default, Deref, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record a message against a field, ignoring exact repeats.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let message = message.into();
        let messages = self.0.entry(field.into()).or_default();

        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    /// Messages for a field; empty when the field is clean.
    #[must_use]
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, field: &str, message: &str) -> bool {
        self.field(field).iter().any(|m| m == message)
    }

    /// Fold an issue map from a visitor pass into these errors.
    pub fn merge(&mut self, issues: BTreeMap<String, Vec<String>>) {
        for (field, messages) in issues {
            for message in messages {
                self.add(field.clone(), message);
            }
        }
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                first = false;
                write!(f, "{field}: {message}")?;
            }
        }

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_order_and_drops_repeats() {
        let mut errors = FormErrors::new();
        errors.add("weight", "b");
        errors.add("weight", "a");
        errors.add("weight", "b");

        assert_eq!(errors.field("weight"), ["b", "a"]);
        assert!(errors.field("name").is_empty());
    }

    #[test]
    fn merge_skips_messages_already_reported() {
        let mut errors = FormErrors::new();
        errors.add("weight", "Weight must be positive.");

        let mut issues = BTreeMap::new();
        issues.insert(
            "weight".to_string(),
            vec!["Weight must be positive.".to_string()],
        );
        issues.insert("name".to_string(), vec!["too long".to_string()]);
        errors.merge(issues);

        assert_eq!(errors.field("weight").len(), 1);
        assert!(errors.contains("name", "too long"));
    }

    #[test]
    fn renders_as_json_object_of_lists() {
        let mut errors = FormErrors::new();
        errors.add("weight", "Enter a number.");

        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"weight":["Enter a number."]}"#
        );
        assert_eq!(errors.to_string(), "weight: Enter a number.");
    }
}

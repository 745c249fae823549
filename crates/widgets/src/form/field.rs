use crate::validator::{MaxLen, ValidationError};

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_NUMBER: &str = "Enter a number.";

///
/// TextField
/// Required text, trimmed, with an optional character limit.
///

#[derive(Clone, Copy, Debug)]
pub struct TextField {
    pub max_len: Option<usize>,
}

impl TextField {
    pub fn clean(self, raw: Option<&str>) -> Result<String, ValidationError> {
        let value = required(raw)?;

        if let Some(max) = self.max_len {
            MaxLen::new(max).check(value)?;
        }

        Ok(value.to_string())
    }
}

///
/// FloatField
/// Required finite floating-point number.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct FloatField;

impl FloatField {
    pub fn clean(self, raw: Option<&str>) -> Result<f64, ValidationError> {
        let value = required(raw)?;

        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(ValidationError::new(INVALID_NUMBER)),
        }
    }
}

// missing and whitespace-only input are both empty
fn required(raw: Option<&str>) -> Result<&str, ValidationError> {
    match raw.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::new(REQUIRED)),
    }
}

///
/// TESTS
///

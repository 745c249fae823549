use crate::{
    core::{traits::Validator, visitor::VisitorContext},
    validator::ValidationError,
};

/// Largest accepted weight (inclusive).
pub const WEIGHT_MAX: f64 = 100.0;

pub const WEIGHT_NOT_POSITIVE: &str = "Weight must be positive.";
pub const WEIGHT_TOO_LARGE: &str = "Weight must be 100 or less.";

///
/// validate_weight
///
/// Accepts `0 < weight <= 100` and returns the value unchanged.
/// An absent weight passes; requiring it is the caller's concern, and
/// neither bound is compared against a missing value.
///
/// The lower bound is checked first. NaN is not positive.
///
pub fn validate_weight(weight: Option<f64>) -> Result<Option<f64>, ValidationError> {
    let Some(w) = weight else {
        return Ok(None);
    };

    if w.is_nan() || w <= 0.0 {
        return Err(ValidationError::new(WEIGHT_NOT_POSITIVE));
    }
    if w > WEIGHT_MAX {
        return Err(ValidationError::new(WEIGHT_TOO_LARGE));
    }

    Ok(weight)
}

///
/// WeightRange
/// Visitor-facing form of [`validate_weight`].
///

#[derive(Clone, Copy, Debug, Default)]
pub struct WeightRange;

impl WeightRange {
    pub fn check(self, weight: f64) -> Result<f64, ValidationError> {
        validate_weight(Some(weight)).map(|_| weight)
    }
}

impl Validator<f64> for WeightRange {
    fn validate(&self, value: &f64, ctx: &mut dyn VisitorContext) {
        if let Err(err) = self.check(*value) {
            ctx.issue(err.into_message());
        }
    }
}

///
/// TESTS
///

use crate::Ulid;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Value
///
/// Dynamic field value used by query filters.
/// Entities project their fields into `Value` via `EntityKind::field_value`.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Float(f64),
    Int(i64),
    Null,
    Text(String),
    Uint(u64),
    Ulid(Ulid),
}

impl Value {
    /// Filter equality.
    ///
    /// Numeric variants compare by value across `Int`, `Uint` and `Float`;
    /// every other pairing requires the same variant.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::Uint(v) => Some(*v as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Null => write!(f, "null"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Ulid(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from_value {
    ( $( $ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_value!(
    bool => Bool,
    f32 => Float,
    f64 => Float,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    String => Text,
    &str => Text,
    Ulid => Ulid,
);

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn numeric_values_match_across_variants() {
        assert!(Value::from(50.0).matches(&Value::from(50)));
        assert!(Value::from(50u32).matches(&Value::from(50.0)));
        assert!(!Value::from(50.5).matches(&Value::from(50)));
    }

    #[test]
    fn text_matches_exactly() {
        assert!(Value::from("Test Widget").matches(&Value::from("Test Widget".to_string())));
        assert!(!Value::from("Test Widget").matches(&Value::from("test widget")));
        assert!(!Value::from("1").matches(&Value::from(1)));
    }

    #[test]
    fn none_converts_to_null() {
        assert!(Value::from(None::<f64>).is_null());
        assert_eq!(Value::from(Some("x")).as_text(), Some("x"));
    }

    proptest! {
        #[test]
        fn integers_match_their_float_form(n in -1_000_000i64..1_000_000) {
            #[allow(clippy::cast_precision_loss)]
            let f = n as f64;

            prop_assert!(Value::from(n).matches(&Value::from(f)));
            prop_assert!(!Value::from(n).matches(&Value::from(f + 0.5)));
        }
    }
}

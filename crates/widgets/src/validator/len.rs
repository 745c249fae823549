use crate::{
    core::{traits::Validator, visitor::VisitorContext},
    validator::ValidationError,
};

///
/// HasLen
/// Length as a user would count it: characters for text, items otherwise.
///

#[allow(clippy::len_without_is_empty)]
pub trait HasLen {
    fn len(&self) -> usize;
}

impl HasLen for str {
    fn len(&self) -> usize {
        self.chars().count()
    }
}

impl HasLen for String {
    fn len(&self) -> usize {
        self.as_str().chars().count()
    }
}

impl<T> HasLen for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T> HasLen for Vec<T> {
    fn len(&self) -> usize {
        Self::len(self)
    }
}

///
/// MaxLen
///

#[derive(Clone, Copy, Debug)]
pub struct MaxLen {
    target: usize,
}

impl MaxLen {
    #[must_use]
    pub const fn new(target: usize) -> Self {
        Self { target }
    }

    pub fn check<T: HasLen + ?Sized>(self, value: &T) -> Result<(), ValidationError> {
        let len = value.len();

        if len <= self.target {
            Ok(())
        } else {
            Err(ValidationError::new(format!(
                "Ensure this value has at most {} characters (it has {len}).",
                self.target
            )))
        }
    }
}

impl<T: HasLen + ?Sized> Validator<T> for MaxLen {
    fn validate(&self, value: &T, ctx: &mut dyn VisitorContext) {
        if let Err(err) = self.check(value) {
            ctx.issue(err.into_message());
        }
    }
}

///
/// TESTS
///

use crate::core::traits::Sanitizer;

///
/// Trim
/// Strips leading and trailing whitespace.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Trim;

impl Sanitizer<String> for Trim {
    fn sanitize(&self, value: &mut String) -> Result<(), String> {
        let trimmed = value.trim();
        if trimmed.len() != value.len() {
            *value = trimmed.to_string();
        }

        Ok(())
    }
}

///
/// TESTS
///

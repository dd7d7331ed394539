//! Text validators: plain strings, email addresses and phone numbers.
//!
//! Lengths count Unicode scalar values, not bytes. Numbers are measured by
//! their text form so a number field rendered into a text input behaves the
//! same as the string the user typed.

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::{SchemaError, StepOutcome, Validate, ValidationError, ValidationResult};
use crate::messages;
use crate::validators::ValidatorBuilder;
use crate::validators::base::{Base, Comparison};
use crate::value::Value;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^.+@.+$").unwrap());

/// Which text input this validator describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFlavor {
    Plain,
    Email,
    Phone,
}

/// Validates text input.
#[derive(Debug, Clone)]
pub struct StringValidator {
    pub(crate) base: Base,
    flavor: TextFlavor,
}

impl StringValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::with_flavor(TextFlavor::Plain, "text")
    }

    /// Permissive email check: something, `@`, something.
    #[must_use]
    pub fn email() -> Self {
        Self::with_flavor(TextFlavor::Email, "email").custom(messages::EMAIL.code, |value, _, _| {
            text_step(value, |text| EMAIL_REGEX.is_match(text), || messages::EMAIL.error())
        })
    }

    /// Phone input. No format is imposed; only the input hint differs.
    #[must_use]
    pub fn phone() -> Self {
        Self::with_flavor(TextFlavor::Phone, "tel")
    }

    fn with_flavor(flavor: TextFlavor, input_type: &'static str) -> Self {
        Self {
            base: Base::new(input_type, Comparison::Lexical),
            flavor,
        }
    }

    #[must_use]
    pub fn flavor(&self) -> TextFlavor {
        self.flavor
    }

    /// Compiles `pattern` and requires the text to match it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPattern`] when the pattern does not
    /// compile.
    pub fn regex(self, pattern: &str) -> Result<Self, SchemaError> {
        let regex = Regex::new(pattern).map_err(|error| SchemaError::pattern(pattern, &error))?;
        Ok(self.pattern(regex))
    }

    /// Requires the text to match an already compiled expression.
    #[must_use = "builder methods must be chained or built"]
    pub fn pattern(self, regex: Regex) -> Self {
        self.custom(messages::PATTERN.code, move |value, _, _| {
            text_step(value, |text| regex.is_match(text), || {
                messages::PATTERN
                    .error()
                    .with_param("pattern", regex.as_str().to_owned())
            })
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn min_length(mut self, min: usize) -> Self {
        self.base.meta.min_length = Some(min);
        self.custom(messages::MIN_LENGTH.code, move |value, _, _| {
            text_step(value, |text| text.chars().count() >= min, || {
                messages::MIN_LENGTH.error().with_param("num", min.to_string())
            })
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max_length(mut self, max: usize) -> Self {
        self.base.meta.max_length = Some(max);
        self.custom(messages::MAX_LENGTH.code, move |value, _, _| {
            text_step(value, |text| text.chars().count() <= max, || {
                messages::MAX_LENGTH.error().with_param("num", max.to_string())
            })
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn exact_length(mut self, len: usize) -> Self {
        self.base.meta.min_length = Some(len);
        self.base.meta.max_length = Some(len);
        self.custom(messages::EXACT_LENGTH.code, move |value, _, _| {
            text_step(value, |text| text.chars().count() == len, || {
                messages::EXACT_LENGTH.error().with_param("num", len.to_string())
            })
        })
    }

    /// Inclusive length range.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidRange`] when `min > max`.
    pub fn length_range(mut self, min: usize, max: usize) -> Result<Self, SchemaError> {
        if min > max {
            return Err(SchemaError::range(min, max));
        }
        self.base.meta.min_length = Some(min);
        self.base.meta.max_length = Some(max);
        Ok(self.custom(messages::LENGTH_RANGE.code, move |value, _, _| {
            text_step(value, |text| (min..=max).contains(&text.chars().count()), || {
                messages::LENGTH_RANGE
                    .error()
                    .with_param("min", min.to_string())
                    .with_param("max", max.to_string())
            })
        }))
    }
}

impl Default for StringValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for StringValidator {
    fn validate(&self, value: &Value, all: &Value, siblings: &Value) -> ValidationResult {
        self.base.evaluate(value, all, siblings)
    }

    fn default_value(&self) -> Value {
        self.base
            .default_value
            .clone()
            .unwrap_or_else(|| Value::from(""))
    }
}

/// Runs a text predicate; values without a text form fail.
fn text_step(
    value: &Value,
    ok: impl FnOnce(&str) -> bool,
    error: impl FnOnce() -> ValidationError,
) -> StepOutcome {
    match value.as_text() {
        Some(text) => StepOutcome::check(ok(&text), error),
        None => StepOutcome::fail(error()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn run(v: &StringValidator, value: impl Into<Value>) -> ValidationResult {
        v.validate(&value.into(), &Value::Null, &Value::Null)
    }

    #[rstest]
    #[case("ab", false)]
    #[case("abc", true)]
    #[case("äöü", true)]
    fn min_length_counts_chars(#[case] input: &str, #[case] ok: bool) {
        let v = StringValidator::new().min_length(3);
        assert_eq!(run(&v, input).is_valid(), ok);
    }

    #[test]
    fn numbers_are_measured_by_text() {
        let v = StringValidator::new().max_length(3);
        assert!(run(&v, 123).is_valid());
        assert!(run(&v, 1234).is_invalid());
    }

    #[test]
    fn min_length_message_carries_num() {
        let v = StringValidator::new().min_length(5);
        let result = run(&v, "abc");
        let error = result.message().unwrap();
        assert_eq!(error.code, "min_length");
        assert_eq!(error.render(), "Must be at least 5 characters");
    }

    #[test]
    fn optional_empty_string_skips_length() {
        let v = StringValidator::new().min_length(5);
        assert_eq!(run(&v, ""), ValidationResult::Valid(Value::from("")));
    }

    #[test]
    fn invalid_regex_is_a_schema_error() {
        let err = StringValidator::new().regex("(unclosed").unwrap_err();
        assert_eq!(err.code(), "SCHEMA_INVALID_PATTERN");
    }

    #[test]
    fn regex_matches() {
        let v = StringValidator::new().regex(r"^\d{4}$").unwrap();
        assert!(run(&v, "1234").is_valid());
        assert_eq!(run(&v, "12a4").message().unwrap().code, "pattern");
    }

    #[rstest]
    #[case("a@b", true)]
    #[case("user@example.com", true)]
    #[case("@example.com", false)]
    #[case("user@", false)]
    #[case("plain", false)]
    fn email_is_permissive(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(run(&StringValidator::email(), input).is_valid(), ok);
    }

    #[test]
    fn flavors_set_input_type() {
        assert_eq!(StringValidator::new().base.meta.input_type, "text");
        assert_eq!(StringValidator::email().base.meta.input_type, "email");
        assert_eq!(StringValidator::phone().base.meta.input_type, "tel");
        assert_eq!(StringValidator::phone().flavor(), TextFlavor::Phone);
    }

    #[test]
    fn length_range_rejects_inverted_bounds() {
        assert!(StringValidator::new().length_range(5, 2).is_err());
        let v = StringValidator::new().length_range(2, 3).unwrap();
        assert!(run(&v, "ab").is_valid());
        assert!(run(&v, "abcd").is_invalid());
    }
}

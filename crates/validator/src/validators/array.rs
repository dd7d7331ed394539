//! Homogeneous lists: every element is validated by the same item
//! validator.

use crate::foundation::{Failure, SchemaError, StepOutcome, Validate, ValidationResult};
use crate::messages;
use crate::validators::{Validator, ValidatorBuilder};
use crate::validators::base::{Base, Comparison, Gate};
use crate::value::Value;

/// Validates a list whose elements all share one validator.
///
/// A failure carries one result per element, passing elements included, so
/// index `i` of the failure always describes index `i` of the input.
#[derive(Debug, Clone)]
pub struct ArrayValidator {
    pub(crate) base: Base,
    of: Box<Validator>,
}

impl ArrayValidator {
    #[must_use]
    pub fn new(of: impl Into<Validator>) -> Self {
        Self {
            base: Base::new("array", Comparison::Lexical),
            of: Box::new(of.into()),
        }
    }

    /// The element validator.
    #[must_use]
    pub fn item(&self) -> &Validator {
        &self.of
    }

    /// At least `min` elements. A positive minimum also makes the list
    /// required, so an empty list reports the required message.
    #[must_use = "builder methods must be chained or built"]
    pub fn min_length(mut self, min: usize) -> Self {
        self.base.meta.min_child_count = Some(min);
        if min > 0 {
            self.base.is_required = true;
        }
        self.custom(messages::MIN_ITEMS.code, move |value, _, _| {
            StepOutcome::check(value.len().unwrap_or(0) >= min, || {
                messages::MIN_ITEMS.error().with_param("num", min.to_string())
            })
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max_length(mut self, max: usize) -> Self {
        self.base.meta.max_child_count = Some(max);
        self.custom(messages::MAX_ITEMS.code, move |value, _, _| {
            StepOutcome::check(value.len().unwrap_or(0) <= max, || {
                messages::MAX_ITEMS.error().with_param("num", max.to_string())
            })
        })
    }

    /// Inclusive element-count range.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidRange`] when `min > max`.
    pub fn length_range(mut self, min: usize, max: usize) -> Result<Self, SchemaError> {
        if min > max {
            return Err(SchemaError::range(min, max));
        }
        self.base.meta.min_child_count = Some(min);
        self.base.meta.max_child_count = Some(max);
        if min > 0 {
            self.base.is_required = true;
        }
        Ok(self.custom(messages::ITEMS_RANGE.code, move |value, _, _| {
            StepOutcome::check(
                (min..=max).contains(&value.len().unwrap_or(0)),
                || {
                    messages::ITEMS_RANGE
                        .error()
                        .with_param("min", min.to_string())
                        .with_param("max", max.to_string())
                },
            )
        }))
    }

    pub(crate) fn validate_with(
        &self,
        value: &Value,
        all: &Value,
        siblings: &Value,
        recurse: bool,
    ) -> ValidationResult {
        if let Some(result) = self.base.delegate(value, all, siblings, recurse) {
            return self.base.finish(value, all, siblings, result);
        }
        let result = match self.base.gate(value.is_empty_input()) {
            Gate::Skip => ValidationResult::Valid(value.clone()),
            Gate::Missing => ValidationResult::error(self.base.required_error()),
            Gate::Proceed => self.validate_items(value, all, siblings, recurse),
        };
        self.base.finish(value, all, siblings, result)
    }

    fn validate_items(&self, value: &Value, all: &Value, siblings: &Value, recurse: bool) -> ValidationResult {
        if !matches!(value, Value::Array(_)) {
            return ValidationResult::error(messages::NOT_AN_ARRAY.error());
        }
        let checked = match self.base.run_steps(value, all, siblings) {
            Ok(checked) => checked,
            Err(error) => return ValidationResult::error(error),
        };
        let Value::Array(items) = checked.as_ref() else {
            return ValidationResult::error(messages::NOT_AN_ARRAY.error());
        };

        let results: Vec<ValidationResult> = items
            .iter()
            .map(|item| self.of.validate_mode(item, all, siblings, recurse))
            .collect();

        if results.iter().all(ValidationResult::is_valid) {
            let output = results
                .into_iter()
                .filter_map(|result| result.into_result().ok())
                .collect();
            ValidationResult::Valid(Value::Array(output))
        } else {
            tracing::trace!(len = results.len(), "array has failing elements");
            ValidationResult::Invalid(Failure::Items(results))
        }
    }
}

impl Validate for ArrayValidator {
    fn validate(&self, value: &Value, all: &Value, siblings: &Value) -> ValidationResult {
        self.validate_with(value, all, siblings, true)
    }

    fn validate_shallow(&self, value: &Value, all: &Value, siblings: &Value) -> ValidationResult {
        self.validate_with(value, all, siblings, false)
    }

    /// `min_length` copies of the element default, each built fresh.
    fn default_value(&self) -> Value {
        if let Some(value) = &self.base.default_value {
            return value.clone();
        }
        let count = self.base.meta.min_child_count.unwrap_or(0);
        Value::Array((0..count).map(|_| self.of.default_value()).collect())
    }
}

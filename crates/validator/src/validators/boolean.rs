//! Checkbox-style boolean validator.

use crate::foundation::{CheckStep, StepOutcome, Validate, ValidationResult};
use crate::messages;
use crate::validators::base::{Base, Comparison};
use crate::value::Value;

/// Accepts `true`/`false` as booleans or as their text form.
///
/// By default the output is the canonical text (`"true"`/`"false"`), which
/// is what a form posts back; [`real_bool`](Self::real_bool) switches the
/// output to a native boolean.
#[derive(Debug, Clone)]
pub struct BooleanValidator {
    pub(crate) base: Base,
    real_bool: bool,
}

impl BooleanValidator {
    #[must_use]
    pub fn new() -> Self {
        let mut base = Base::new("checkbox", Comparison::Lexical);
        base.push_step(coerce_step(false));
        Self {
            base,
            real_bool: false,
        }
    }

    /// Output native booleans instead of text.
    #[must_use = "builder methods must be chained or built"]
    pub fn real_bool(mut self) -> Self {
        self.real_bool = true;
        // The coercion step is always first.
        if let Some(step) = self.base.steps.first_mut() {
            *step = coerce_step(true);
        }
        self
    }

    #[must_use]
    pub fn is_real_bool(&self) -> bool {
        self.real_bool
    }
}

impl Default for BooleanValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for BooleanValidator {
    fn validate(&self, value: &Value, all: &Value, siblings: &Value) -> ValidationResult {
        self.base.evaluate(value, all, siblings)
    }

    fn default_value(&self) -> Value {
        match &self.base.default_value {
            Some(value) => value.clone(),
            None if self.real_bool => Value::Bool(false),
            None => Value::from("false"),
        }
    }
}

fn coerce_step(real_bool: bool) -> CheckStep {
    CheckStep::new("boolean", move |value, _, _| {
        let parsed = match value {
            Value::Bool(flag) => Some(*flag),
            Value::String(text) if text == "true" => Some(true),
            Value::String(text) if text == "false" => Some(false),
            _ => None,
        };
        match parsed {
            Some(flag) if real_bool => StepOutcome::Replace(Value::Bool(flag)),
            Some(flag) => StepOutcome::Replace(Value::from(flag.to_string())),
            None => StepOutcome::fail(messages::NOT_BOOLEAN.error()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::ValidatorBuilder;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Bool(true), Value::from("true"))]
    #[case(Value::from("false"), Value::from("false"))]
    fn canonical_text_output(#[case] input: Value, #[case] expected: Value) {
        let result = BooleanValidator::new().validate(&input, &Value::Null, &Value::Null);
        assert_eq!(result, ValidationResult::Valid(expected));
    }

    #[test]
    fn real_bool_outputs_native() {
        let v = BooleanValidator::new().real_bool();
        let result = v.validate(&Value::from("true"), &Value::Null, &Value::Null);
        assert_eq!(result, ValidationResult::Valid(Value::Bool(true)));
        assert_eq!(v.default_value(), Value::Bool(false));
    }

    #[test]
    fn rejects_other_text() {
        let result = BooleanValidator::new().validate(&Value::from("yes"), &Value::Null, &Value::Null);
        assert_eq!(result.message().unwrap().code, "not_boolean");
    }

    #[test]
    fn false_satisfies_required() {
        let v = BooleanValidator::new().required();
        assert!(v.validate(&Value::Bool(false), &Value::Null, &Value::Null).is_valid());
    }
}

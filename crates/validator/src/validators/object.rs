//! Objects with a declared shape.
//!
//! Fields are validated in declaration order. Each field sees the object's
//! working copy as its siblings, with every earlier field already replaced
//! by its normalised value, so `"end" => number().greater_than_sibling("start")`
//! compares against the parsed `start`, not its raw text.

use indexmap::IndexMap;

use crate::foundation::{Failure, Validate, ValidationResult};
use crate::messages;
use crate::validators::Validator;
use crate::validators::base::{Base, Comparison};
use crate::value::{Map, NULL, Value};

/// Declared fields of an object validator, in declaration order.
pub type Fields = IndexMap<String, Validator>;

/// Validates an object against a declared set of fields.
#[derive(Debug, Clone)]
pub struct ObjectValidator {
    pub(crate) base: Base,
    fields: Fields,
    drop_empty: bool,
    drop_not_in_shape: bool,
    really_not_required: bool,
}

impl ObjectValidator {
    #[must_use]
    pub fn new(fields: Fields) -> Self {
        Self {
            base: Base::new("object", Comparison::Lexical),
            fields,
            drop_empty: true,
            drop_not_in_shape: false,
            really_not_required: false,
        }
    }

    /// Validator declared for `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Validator> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Keep `""` values and lists of only `""` in the output. By default
    /// they are removed.
    #[must_use = "builder methods must be chained or built"]
    pub fn keep_empty(mut self) -> Self {
        self.drop_empty = false;
        self
    }

    /// On success, remove keys that are not declared fields.
    #[must_use = "builder methods must be chained or built"]
    pub fn drop_not_in_shape(mut self) -> Self {
        self.drop_not_in_shape = true;
        self
    }

    /// An object with no keys passes without validating its fields.
    #[must_use = "builder methods must be chained or built"]
    pub fn really_not_required(mut self) -> Self {
        self.really_not_required = true;
        self
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
        let keyless = has_no_keys(value);
        let result = if self.really_not_required && keyless {
            ValidationResult::Valid(value.clone())
        } else if !self.base.is_required && value.is_empty_input() {
            ValidationResult::Valid(value.clone())
        } else if self.base.is_required && keyless {
            ValidationResult::error(self.base.required_error())
        } else {
            self.validate_fields(value, all, siblings, recurse)
        };
        self.base.finish(value, all, siblings, result)
    }

    fn validate_fields(&self, value: &Value, all: &Value, siblings: &Value, recurse: bool) -> ValidationResult {
        if !matches!(value, Value::Object(_)) {
            return ValidationResult::error(messages::NOT_AN_OBJECT.error());
        }
        let checked = match self.base.run_steps(value, all, siblings) {
            Ok(checked) => checked,
            Err(error) => return ValidationResult::error(error),
        };
        let Value::Object(input) = checked.as_ref() else {
            return ValidationResult::error(messages::NOT_AN_OBJECT.error());
        };

        let mut working = Value::Object(input.clone());
        let mut results = IndexMap::with_capacity(self.fields.len());
        let mut failed = false;

        for (name, validator) in &self.fields {
            if !recurse && validator.is_composite() {
                continue;
            }
            let present = input.get(name);
            let result = validator.validate(present.unwrap_or(&NULL), all, &working);
            match &result {
                ValidationResult::Valid(normalised) => {
                    if let Value::Object(map) = &mut working
                        && (present.is_some() || !normalised.is_null())
                    {
                        map.insert(name.clone(), normalised.clone());
                    }
                }
                ValidationResult::Invalid(_) => failed = true,
            }
            results.insert(name.clone(), result);
        }

        if failed {
            tracing::trace!(fields = results.len(), "object has failing fields");
            return ValidationResult::Invalid(Failure::Fields(results));
        }

        let Value::Object(mut output) = working else {
            return ValidationResult::error(messages::NOT_AN_OBJECT.error());
        };
        if self.drop_empty {
            drop_empty_fields(&mut output, &results);
        }
        if self.drop_not_in_shape {
            output.retain(|key, _| self.fields.contains_key(key));
        }
        ValidationResult::Valid(Value::Object(output))
    }
}

impl Validate for ObjectValidator {
    fn validate(&self, value: &Value, all: &Value, siblings: &Value) -> ValidationResult {
        self.validate_with(value, all, siblings, true)
    }

    fn validate_shallow(&self, value: &Value, all: &Value, siblings: &Value) -> ValidationResult {
        self.validate_with(value, all, siblings, false)
    }

    fn default_value(&self) -> Value {
        if let Some(value) = &self.base.default_value {
            return value.clone();
        }
        Value::Object(
            self.fields
                .iter()
                .map(|(name, validator)| (name.clone(), validator.default_value()))
                .collect(),
        )
    }
}

fn has_no_keys(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        other => other.is_empty_input(),
    }
}

/// Removes validated fields whose output is `""`, or a list that is empty
/// once its `""` entries are ignored.
fn drop_empty_fields(output: &mut Map, validated: &IndexMap<String, ValidationResult>) {
    for name in validated.keys() {
        let empty = match output.get(name) {
            Some(Value::String(text)) => text.is_empty(),
            Some(Value::Array(items)) => items.iter().all(|item| item.as_str() == Some("")),
            _ => false,
        };
        if empty {
            output.shift_remove(name);
        }
    }
}

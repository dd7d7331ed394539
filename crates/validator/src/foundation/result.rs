//! Validation results
//!
//! A [`ValidationResult`] is either the (possibly normalised) value or a
//! [`Failure`]. Composite validators shape their failure like their input:
//! one nested result per object field or per array index, passing entries
//! included, so a failure can always be traced back to the exact sub-path
//! that produced it.

use indexmap::IndexMap;

use crate::foundation::ValidationError;
use crate::value::Value;

/// Outcome of validating one value against one validator node.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// The value passed; carries the normalised output.
    Valid(Value),
    /// The value failed.
    Invalid(Failure),
}

/// Payload of a failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// A leaf failure.
    Message(ValidationError),
    /// An object failed; one result per declared field, in declaration order.
    Fields(IndexMap<String, ValidationResult>),
    /// An array failed; one result per element, positionally aligned.
    Items(Vec<ValidationResult>),
}

impl ValidationResult {
    /// Builds a leaf failure.
    #[must_use]
    pub fn error(error: ValidationError) -> Self {
        Self::Invalid(Failure::Message(error))
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// The output value, if validation passed.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }

    /// The failure payload, if validation failed.
    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(failure) => Some(failure),
        }
    }

    /// The leaf message, if this is a leaf failure.
    #[must_use]
    pub fn message(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(Failure::Message(error)) => Some(error),
            _ => None,
        }
    }

    /// Converts into a standard `Result`.
    pub fn into_result(self) -> Result<Value, Failure> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Invalid(failure) => Err(failure),
        }
    }
}

impl From<Result<Value, Failure>> for ValidationResult {
    fn from(result: Result<Value, Failure>) -> Self {
        match result {
            Ok(value) => Self::Valid(value),
            Err(failure) => Self::Invalid(failure),
        }
    }
}

impl From<ValidationError> for Failure {
    fn from(error: ValidationError) -> Self {
        Self::Message(error)
    }
}

impl Failure {
    /// Counts leaf messages reachable from this failure.
    #[must_use]
    pub fn error_count(&self) -> usize {
        match self {
            Self::Message(_) => 1,
            Self::Fields(fields) => fields.values().filter_map(nested_count).sum(),
            Self::Items(items) => items.iter().filter_map(nested_count).sum(),
        }
    }
}

fn nested_count(result: &ValidationResult) -> Option<usize> {
    result.failure().map(Failure::error_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_count_skips_passing_entries() {
        let mut fields = IndexMap::new();
        fields.insert("a".to_string(), ValidationResult::Valid(Value::from(1)));
        fields.insert(
            "b".to_string(),
            ValidationResult::error(ValidationError::new("x", "bad")),
        );
        fields.insert(
            "c".to_string(),
            ValidationResult::Invalid(Failure::Items(vec![
                ValidationResult::error(ValidationError::new("y", "bad")),
                ValidationResult::Valid(Value::Null),
                ValidationResult::error(ValidationError::new("z", "bad")),
            ])),
        );
        assert_eq!(Failure::Fields(fields).error_count(), 3);
    }

    #[test]
    fn into_result_round_trip() {
        let ok = ValidationResult::Valid(Value::from("x"));
        assert_eq!(ok.clone().into_result(), Ok(Value::from("x")));
        assert_eq!(ValidationResult::from(ok.clone().into_result()), ok);
    }
}

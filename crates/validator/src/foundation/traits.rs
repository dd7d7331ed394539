//! Core traits for the validation system
//!
//! This module defines the capability set that every validator node
//! implements.

use crate::foundation::ValidationResult;
use crate::value::Value;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The capability set shared by every validator node.
///
/// `all` is the whole value tree the form is validating and `siblings` is
/// the object that immediately encloses `value`; both feed dependent lookups
/// and cross-field comparisons. Validation never mutates its inputs: the
/// result carries a fresh, possibly normalised, copy.
///
/// # Examples
///
/// ```
/// use nebula_form_validator::prelude::*;
///
/// let validator = number();
/// let result = validator.validate(&Value::from("1,23"), &Value::Null, &Value::Null);
/// assert_eq!(result, ValidationResult::Valid(Value::from(1.23)));
/// ```
pub trait Validate {
    /// Validates `value`, recursing into nested composites.
    fn validate(&self, value: &Value, all: &Value, siblings: &Value) -> ValidationResult;

    /// Validates `value` without recursing into nested composites: only the
    /// immediate scalar children of an array or object are checked.
    ///
    /// Scalar validators behave exactly like [`validate`](Self::validate).
    fn validate_shallow(&self, value: &Value, all: &Value, siblings: &Value) -> ValidationResult {
        self.validate(value, all, siblings)
    }

    /// Whole-tree validation: `value` doubles as the `all` context.
    fn validate_root(&self, value: &Value) -> ValidationResult {
        self.validate(value, value, &Value::Null)
    }

    /// Synthesises the default value tree for this node.
    fn default_value(&self) -> Value;
}

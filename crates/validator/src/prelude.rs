//! Prelude module for convenient imports.
//!
//! Provides a single `use nebula_form_validator::prelude::*;` import that
//! brings in the traits, validator kinds, factory functions and result types
//! needed to declare and run a schema.
//!
//! # Examples
//!
//! ```
//! use nebula_form_validator::prelude::*;
//!
//! let age = integer().required().min(18.0);
//! assert!(age.validate_root(&Value::from("21")).is_valid());
//! ```

// ============================================================================
// FOUNDATION: Core traits, results, errors
// ============================================================================

pub use crate::foundation::{
    Failure, PathError, SchemaError, StepOutcome, Validate, ValidationError, ValidationResult,
};

// ============================================================================
// VALIDATORS: Kinds, builder trait, factories
// ============================================================================

pub use crate::validators::{
    AnyOfValidator, ArrayValidator, BaseValidator, BooleanValidator, DateOnlyValidator,
    DateTimeValidator, Fields, Kind, Meta, NumberValidator, ObjectValidator, StringValidator,
    TextFlavor, Validator, ValidatorBuilder, any_of, array, base, boolean, date_only, date_time,
    email, integer, number, object, phone, string,
};

// ============================================================================
// MACROS & VALUES
// ============================================================================

pub use crate::value::{Map, Value};
pub use crate::{any_of, fields};

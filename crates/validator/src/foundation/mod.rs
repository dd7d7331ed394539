//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the engine:
//!
//! - **Traits**: [`Validate`], the capability set every validator node offers
//! - **Results**: [`ValidationResult`], [`Failure`]
//! - **Errors**: [`ValidationError`], [`SchemaError`], [`PathError`]
//! - **Steps**: [`CheckStep`], [`StepOutcome`] and the callback aliases
//!
//! # Architecture
//!
//! Every validator kind shares one evaluation loop (dependent delegation,
//! required gate, ordered check-steps, post-processing). A kind is a thin
//! factory that pre-populates check-steps and metadata; composites add a
//! recursive walk over their children on top of the loop.
//!
//! ```
//! use nebula_form_validator::prelude::*;
//! use serde_json::json;
//!
//! let schema = ObjectValidator::new(fields! {
//!     "name" => string().required(),
//!     "age" => integer().min(18.0),
//! });
//! let result = schema.validate_root(&Value::from(json!({"name": "", "age": 12})));
//! assert_eq!(result.failure().map(Failure::error_count), Some(2));
//! ```

pub mod error;
pub mod result;
pub mod step;
pub mod traits;

pub use error::{Params, PathError, SchemaError, ValidationError};
pub use result::{Failure, ValidationResult};
pub use step::{CheckFn, CheckStep, ErrorHook, MutationFn, Predicate, StepOutcome};
pub use traits::Validate;

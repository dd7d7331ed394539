//! # nebula-form-validator
//!
//! A declarative, composable validation engine for nested form data.
//!
//! A schema is a tree of validator nodes (string, number, boolean, dates,
//! arrays, objects, any-of). Validating a value tree against it yields the
//! normalised output or a failure shaped like the input, which
//! [`unpack_errors`](unpack::unpack_errors) turns into a sparse tree of
//! display messages.
//!
//! ## Quick Start
//!
//! ```
//! use nebula_form_validator::prelude::*;
//! use nebula_form_validator::unpack::unpack_errors;
//! use serde_json::json;
//!
//! let schema = object(fields! {
//!     "email" => email().required(),
//!     "start" => date_only().required(),
//!     "end" => date_only().greater_or_equal_to_sibling("start"),
//!     "guests" => array(object(fields! {
//!         "name" => string().required(),
//!         "age" => integer().min(0.0),
//!     })),
//! });
//!
//! let input = Value::from(json!({
//!     "email": "ada@example.com",
//!     "start": "2025-06-10",
//!     "end": "2025-06-01",
//!     "guests": [{"name": "Bob", "age": "41"}, {"name": "", "age": "x"}],
//! }));
//! let result = schema.validate_root(&input);
//!
//! let errors = unpack_errors(&result).unwrap();
//! assert_eq!(
//!     errors.to_json(),
//!     json!({
//!         "end": "Must be greater than or equal to start",
//!         "guests": {"1": {"name": "This field is required", "age": "Must be a whole number"}},
//!     })
//! );
//! ```
//!
//! ## Building Blocks
//!
//! - [`validators`]: the validator kinds and [`ValidatorBuilder`](validators::ValidatorBuilder)
//! - [`foundation`]: [`Validate`](foundation::Validate), results, errors, check-steps
//! - [`path`]: dotted key paths over values and schemas
//! - [`defaults`]: merging user values over synthesised defaults
//! - [`unpack`]: sparse error trees for display
//! - [`messages`]: message names, templates and the process-wide catalog

pub mod defaults;
pub mod foundation;
mod macros;
pub mod messages;
pub mod path;
pub mod prelude;
pub mod unpack;
pub mod validators;
pub mod value;

pub use value::{Map, Value};

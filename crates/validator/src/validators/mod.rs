//! Validator kinds
//!
//! Every kind is a thin factory over the shared [`Base`] loop:
//!
//! - **Scalars**: [`StringValidator`] (plain, email, phone),
//!   [`NumberValidator`] (decimal, integer), [`BooleanValidator`],
//!   [`DateTimeValidator`], [`DateOnlyValidator`], [`BaseValidator`]
//! - **Composites**: [`ArrayValidator`], [`ObjectValidator`]
//! - **Alternation**: [`AnyOfValidator`]
//!
//! [`Validator`] is the closed set of kinds, used wherever a schema tree
//! holds children of mixed kind.
//!
//! # Examples
//!
//! ```
//! use nebula_form_validator::prelude::*;
//! use serde_json::json;
//!
//! let schema = object(fields! {
//!     "name" => string().required().min_length(2),
//!     "age" => integer().min(18.0),
//! });
//!
//! let input = Value::from(json!({"name": "Ada", "age": "36"}));
//! let output = schema.validate_root(&input).into_result().unwrap();
//! assert_eq!(output, Value::from(json!({"name": "Ada", "age": 36})));
//! ```

pub mod any_of;
pub mod array;
pub mod base;
pub mod boolean;
pub mod date;
pub mod number;
pub mod object;
pub mod string;

pub use any_of::AnyOfValidator;
pub use array::ArrayValidator;
pub use base::{Base, BaseValidator, Meta, ValidatorBuilder};
pub use boolean::BooleanValidator;
pub use date::{DateOnlyValidator, DateTimeValidator};
pub use number::NumberValidator;
pub use object::{Fields, ObjectValidator};
pub use string::{StringValidator, TextFlavor};

use crate::foundation::{Validate, ValidationResult};
use crate::value::Value;

// ============================================================================
// VALIDATOR
// ============================================================================

/// Any validator node.
#[derive(Debug, Clone)]
pub enum Validator {
    Base(BaseValidator),
    String(StringValidator),
    Number(NumberValidator),
    Boolean(BooleanValidator),
    DateTime(DateTimeValidator),
    DateOnly(DateOnlyValidator),
    Array(ArrayValidator),
    Object(ObjectValidator),
    AnyOf(AnyOfValidator),
}

/// Kind tag of a validator node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Base,
    String,
    Email,
    Phone,
    Number,
    Integer,
    Boolean,
    DateTime,
    DateOnly,
    Array,
    Object,
    AnyOf,
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Validator::Base($inner) => $body,
            Validator::String($inner) => $body,
            Validator::Number($inner) => $body,
            Validator::Boolean($inner) => $body,
            Validator::DateTime($inner) => $body,
            Validator::DateOnly($inner) => $body,
            Validator::Array($inner) => $body,
            Validator::Object($inner) => $body,
            Validator::AnyOf($inner) => $body,
        }
    };
}

impl Validator {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Base(_) => Kind::Base,
            Self::String(v) => match v.flavor() {
                TextFlavor::Plain => Kind::String,
                TextFlavor::Email => Kind::Email,
                TextFlavor::Phone => Kind::Phone,
            },
            Self::Number(v) if v.is_integer() => Kind::Integer,
            Self::Number(_) => Kind::Number,
            Self::Boolean(_) => Kind::Boolean,
            Self::DateTime(_) => Kind::DateTime,
            Self::DateOnly(_) => Kind::DateOnly,
            Self::Array(_) => Kind::Array,
            Self::Object(_) => Kind::Object,
            Self::AnyOf(_) => Kind::AnyOf,
        }
    }

    /// Arrays and objects: skipped by non-recursive validation.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    #[must_use]
    pub fn base(&self) -> &Base {
        dispatch!(self, v => &v.base)
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.base().is_required
    }

    #[must_use]
    pub fn meta(&self) -> &Meta {
        &self.base().meta
    }

    /// Declared field `name`, for object validators.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Validator> {
        match self {
            Self::Object(object) => object.field(name),
            _ => None,
        }
    }

    /// Element validator, for array validators.
    #[must_use]
    pub fn item(&self) -> Option<&Validator> {
        match self {
            Self::Array(array) => Some(array.item()),
            _ => None,
        }
    }

    pub(crate) fn validate_mode(
        &self,
        value: &Value,
        all: &Value,
        siblings: &Value,
        recurse: bool,
    ) -> ValidationResult {
        if recurse {
            self.validate(value, all, siblings)
        } else {
            self.validate_shallow(value, all, siblings)
        }
    }
}

impl Validate for Validator {
    fn validate(&self, value: &Value, all: &Value, siblings: &Value) -> ValidationResult {
        dispatch!(self, v => v.validate(value, all, siblings))
    }

    fn validate_shallow(&self, value: &Value, all: &Value, siblings: &Value) -> ValidationResult {
        dispatch!(self, v => v.validate_shallow(value, all, siblings))
    }

    fn default_value(&self) -> Value {
        dispatch!(self, v => v.default_value())
    }
}

impl ValidatorBuilder for Validator {
    fn base_ref(&self) -> &Base {
        dispatch!(self, v => &v.base)
    }

    fn base_mut(&mut self) -> &mut Base {
        dispatch!(self, v => &mut v.base)
    }
}

// ============================================================================
// BUILDER IMPLS & CONVERSIONS
// ============================================================================

macro_rules! impl_kind {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl ValidatorBuilder for $ty {
                fn base_ref(&self) -> &Base {
                    &self.base
                }

                fn base_mut(&mut self) -> &mut Base {
                    &mut self.base
                }
            }

            impl From<$ty> for Validator {
                fn from(validator: $ty) -> Self {
                    Self::$variant(validator)
                }
            }
        )*
    };
}

impl_kind! {
    Base => BaseValidator,
    String => StringValidator,
    Number => NumberValidator,
    Boolean => BooleanValidator,
    DateTime => DateTimeValidator,
    DateOnly => DateOnlyValidator,
    Array => ArrayValidator,
    Object => ObjectValidator,
    AnyOf => AnyOfValidator,
}

// ============================================================================
// FACTORY FUNCTIONS
// ============================================================================

#[must_use]
pub fn base() -> BaseValidator {
    BaseValidator::new()
}

#[must_use]
pub fn string() -> StringValidator {
    StringValidator::new()
}

#[must_use]
pub fn email() -> StringValidator {
    StringValidator::email()
}

#[must_use]
pub fn phone() -> StringValidator {
    StringValidator::phone()
}

#[must_use]
pub fn number() -> NumberValidator {
    NumberValidator::new()
}

#[must_use]
pub fn integer() -> NumberValidator {
    NumberValidator::integer()
}

#[must_use]
pub fn boolean() -> BooleanValidator {
    BooleanValidator::new()
}

#[must_use]
pub fn date_time() -> DateTimeValidator {
    DateTimeValidator::new()
}

#[must_use]
pub fn date_only() -> DateOnlyValidator {
    DateOnlyValidator::new()
}

#[must_use]
pub fn array(of: impl Into<Validator>) -> ArrayValidator {
    ArrayValidator::new(of)
}

#[must_use]
pub fn object(fields: Fields) -> ObjectValidator {
    ObjectValidator::new(fields)
}

#[must_use]
pub fn any_of(options: Vec<Validator>) -> AnyOfValidator {
    AnyOfValidator::new(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Validator::from(email()).kind(), Kind::Email);
        assert_eq!(Validator::from(integer()).kind(), Kind::Integer);
        assert_eq!(Validator::from(date_only()).kind(), Kind::DateOnly);
    }

    #[test]
    fn only_arrays_and_objects_are_composite() {
        assert!(Validator::from(array(string())).is_composite());
        assert!(Validator::from(object(Fields::new())).is_composite());
        assert!(!Validator::from(any_of(vec![object(Fields::new()).into()])).is_composite());
        assert!(!Validator::from(number()).is_composite());
    }

    #[test]
    fn builder_works_on_the_enum() {
        let v = Validator::from(string()).required();
        assert!(v.is_required());
        assert_eq!(v.meta().input_type, "text");
    }

    #[test]
    fn field_and_item_lookups() {
        let schema = Validator::from(object(crate::fields! { "list" => array(number()) }));
        let list = schema.field("list").unwrap();
        assert_eq!(list.item().map(Validator::kind), Some(Kind::Number));
        assert!(list.field("x").is_none());
    }
}

//! Macros for declaring schemas with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`fields!`]: declared fields of an object validator, in order
//! - [`any_of!`]: alternation over validators of mixed kinds
//!
//! # Examples
//!
//! ```
//! use nebula_form_validator::prelude::*;
//!
//! let address = object(fields! {
//!     "street" => string().required(),
//!     "zip" => any_of!(integer(), string().regex(r"^\d{4} ?[A-Z]{2}$").unwrap()),
//! });
//! assert_eq!(address.fields().len(), 2);
//! ```

// ============================================================================
// FIELDS MACRO
// ============================================================================

/// Builds the ordered field map of an object validator.
///
/// Each value may be any validator kind; it is converted into
/// [`Validator`](crate::validators::Validator).
#[macro_export]
macro_rules! fields {
    () => {
        $crate::validators::Fields::new()
    };
    ($($name:expr => $validator:expr),+ $(,)?) => {{
        let mut fields = $crate::validators::Fields::new();
        $(
            fields.insert(
                ::std::string::String::from($name),
                $crate::validators::Validator::from($validator),
            );
        )+
        fields
    }};
}

// ============================================================================
// ANY-OF MACRO
// ============================================================================

/// Builds an [`AnyOfValidator`](crate::validators::AnyOfValidator) from
/// candidates of mixed kinds, tried in the given order.
#[macro_export]
macro_rules! any_of {
    ($($option:expr),+ $(,)?) => {
        $crate::validators::any_of(::std::vec![
            $($crate::validators::Validator::from($option)),+
        ])
    };
}

// ============================================================================
// TESTS
// ============================================================================

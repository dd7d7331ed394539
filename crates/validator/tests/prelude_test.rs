//! Integration tests for the prelude module.
//!
//! Verifies that `use nebula_form_validator::prelude::*` brings in everything
//! a consumer needs to declare a schema, run it and read the outcome.

use nebula_form_validator::prelude::*;
use serde_json::json;

// ============================================================================
// PRELUDE IMPORT SMOKE TEST
// ============================================================================

#[test]
fn prelude_import_provides_validate_trait() {
    let v = string().min_length(3).max_length(20);
    assert!(v.validate_root(&Value::from("hello")).is_valid());
    assert!(v.validate_root(&Value::from("hi")).is_invalid());
}

#[test]
fn prelude_provides_builder_trait_on_every_kind() {
    let kinds: Vec<Validator> = vec![
        base().required().into(),
        string().required().into(),
        email().required().into(),
        phone().required().into(),
        number().required().into(),
        integer().required().into(),
        boolean().required().into(),
        date_time().required().into(),
        date_only().required().into(),
        array(string()).required().into(),
        object(Fields::new()).required().into(),
        any_of!(number(), string()).required().into(),
    ];
    assert!(kinds.iter().all(Validator::is_required));
}

// ============================================================================
// MACROS VIA PRELUDE
// ============================================================================

#[test]
fn fields_macro_builds_object_schema() {
    let schema = object(fields! {
        "email" => email().required(),
        "age" => integer().min(18.0),
    });
    let ok = Value::from(json!({"email": "a@b.c", "age": "30"}));
    assert_eq!(
        schema.validate_root(&ok),
        ValidationResult::Valid(Value::from(json!({"email": "a@b.c", "age": 30})))
    );
}

#[test]
fn any_of_macro_accepts_mixed_kinds() {
    let v = any_of!(boolean().real_bool(), number());
    assert_eq!(v.options().len(), 2);
    assert!(v.validate_root(&Value::from("true")).is_valid());
}

// ============================================================================
// ERRORS VIA PRELUDE
// ============================================================================

#[test]
fn schema_errors_are_results() {
    let err: SchemaError = number().range(5.0, 1.0).unwrap_err();
    assert_eq!(err.code(), "SCHEMA_INVALID_RANGE");
    assert!(string().regex("(").is_err());
}

#[test]
fn failures_carry_stable_codes() {
    let result = number().validate_root(&Value::from("abc"));
    let Some(Failure::Message(error)) = result.failure() else {
        panic!("expected a leaf failure");
    };
    assert_eq!(error.code, "not_a_number");
}

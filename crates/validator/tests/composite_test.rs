//! Integration tests for arrays, objects, dependents and error unpacking.

use std::sync::{Arc, Mutex};

use nebula_form_validator::prelude::*;
use nebula_form_validator::unpack::unpack_errors;
use pretty_assertions::assert_eq;
use serde_json::json;

fn tree(value: serde_json::Value) -> Value {
    Value::from(value)
}

// ============================================================================
// ARRAYS
// ============================================================================

#[test]
fn min_length_zero_does_not_require() {
    assert!(!Validator::from(array(string()).min_length(0)).is_required());
    assert!(Validator::from(array(string()).min_length(3)).is_required());
}

#[test]
fn array_default_repeats_item_default() {
    let v = array(number().with_default(1)).min_length(3);
    assert_eq!(v.default_value(), tree(json!([1, 1, 1])));
}

#[test]
fn array_default_items_are_independent() {
    let v = array(object(fields! { "n" => number().with_default(0) })).min_length(2);
    let Value::Array(items) = v.default_value() else {
        panic!("array default must be an array");
    };
    assert_eq!(items, vec![tree(json!({"n": 0})), tree(json!({"n": 0}))]);
}

// ============================================================================
// OBJECTS
// ============================================================================

#[test]
fn drop_empty_default_and_disabled() {
    let v = object(fields! { "foo" => string() });
    assert_eq!(
        v.validate_root(&tree(json!({"foo": ""}))),
        ValidationResult::Valid(tree(json!({})))
    );
    let keep = object(fields! { "foo" => string() }).keep_empty();
    assert_eq!(
        keep.validate_root(&tree(json!({"foo": ""}))),
        ValidationResult::Valid(tree(json!({"foo": ""})))
    );
}

#[test]
fn sibling_comparison_ordering() {
    let v = object(fields! {
        "foo" => number(),
        "bar" => number().greater_than_sibling("foo"),
    });

    let result = v.validate_root(&tree(json!({"foo": 2, "bar": 1})));
    let Some(Failure::Fields(fields)) = result.failure() else {
        panic!("expected per-field failure, got {result:?}");
    };
    assert_eq!(fields.keys().collect::<Vec<_>>(), ["foo", "bar"]);
    assert_eq!(fields["foo"], ValidationResult::Valid(Value::from(2)));
    assert_eq!(fields["bar"].message().unwrap().code, "greater_than");

    assert_eq!(
        v.validate_root(&tree(json!({"foo": 1, "bar": 2}))),
        ValidationResult::Valid(tree(json!({"foo": 1, "bar": 2})))
    );
}

#[test]
fn comparison_against_missing_field_passes() {
    let v = object(fields! {
        "end" => number().greater_than_sibling("start"),
    });
    assert!(v.validate_root(&tree(json!({"end": 1}))).is_valid());
}

#[test]
fn datetime_siblings_compare_as_instants() {
    let v = object(fields! {
        "from" => date_time(),
        "until" => date_time().greater_than_sibling("from"),
    });

    // Later as text, earlier as an instant.
    let early = tree(json!({"from": "2024-03-01T09:30:00.500Z", "until": "2024-03-01T09:30Z"}));
    let errors = unpack_errors(&v.validate_root(&early)).unwrap();
    assert_eq!(errors.get("until").unwrap().message().unwrap().code, "greater_than");
    assert!(errors.get("from").is_none());

    let late = tree(json!({"from": "2024-03-01T09:30:59.999Z", "until": "2024-03-01T09:31"}));
    assert!(v.validate_root(&late).is_valid());
}

#[test]
fn unparsable_datetime_sibling_fails_only_itself() {
    let v = object(fields! {
        "from" => date_time(),
        "until" => date_time().greater_than_sibling("from"),
    });
    let result = v.validate_root(&tree(json!({"from": "garbage", "until": "2024-03-01T09:30Z"})));
    assert_eq!(result.failure().map(Failure::error_count), Some(1));

    let errors = unpack_errors(&result).unwrap();
    let leaves: Vec<_> = errors
        .leaves()
        .into_iter()
        .map(|(path, error)| (path, error.code.to_string()))
        .collect();
    assert_eq!(leaves, [("from".to_owned(), "invalid_date".to_owned())]);
}

#[test]
fn whole_tree_comparison_uses_all_values() {
    let v = object(fields! {
        "limits" => object(fields! { "max" => number() }),
        "items" => array(object(fields! {
            "qty" => number().less_or_equal_to("limits.max"),
        })),
    });
    let input = tree(json!({"limits": {"max": 5}, "items": [{"qty": 3}, {"qty": 9}]}));
    let errors = unpack_errors(&v.validate_root(&input)).unwrap();
    assert_eq!(
        errors.to_json(),
        json!({"items": {"1": {"qty": "Must be less than or equal to limits.max"}}})
    );
}

#[test]
fn every_field_error_is_collected() {
    let v = object(fields! {
        "a" => string().required(),
        "b" => number(),
        "c" => email(),
    });
    let result = v.validate_root(&tree(json!({"b": "x", "c": "nope"})));
    assert_eq!(result.failure().unwrap().error_count(), 3);
}

#[test]
fn validation_does_not_touch_input() {
    let v = object(fields! {
        "price" => number().decimal_places(2),
        "tags" => array(string()),
        "nested" => object(fields! { "n" => number() }),
    });
    let input = tree(json!({"price": "1,5", "tags": ["", "a"], "nested": {"n": "2,5"}}));
    let snapshot = input.clone();
    let output = v.validate_root(&input).into_result().unwrap();
    assert_eq!(input, snapshot);
    assert_eq!(
        output,
        tree(json!({"price": "1.50", "tags": ["", "a"], "nested": {"n": 2.5}}))
    );
}

#[test]
fn shallow_validation_skips_nested_composites() {
    let v = object(fields! {
        "title" => string().required(),
        "rows" => array(number()),
    });
    let input = tree(json!({"title": "", "rows": ["bad"]}));

    let shallow = v.validate_shallow(&input, &input, &Value::Null);
    let errors = unpack_errors(&shallow).unwrap();
    assert_eq!(errors.to_json(), json!({"title": "This field is required"}));

    let deep = unpack_errors(&v.validate_root(&input)).unwrap();
    assert!(deep.get("rows.0").is_some());
}

// ============================================================================
// DEPENDENTS & HOOKS
// ============================================================================

#[test]
fn dependent_swaps_validator_by_other_field() {
    let v = object(fields! {
        "contact" => string(),
        "value" => string().dependent(
            "contact",
            |other, _| other.as_str() == Some("email"),
            email().required(),
        ),
    });

    let by_email = tree(json!({"contact": "email", "value": "not-an-address"}));
    let errors = unpack_errors(&v.validate_root(&by_email)).unwrap();
    assert_eq!(errors.get("value").unwrap().message().unwrap().code, "email");

    let by_phone = tree(json!({"contact": "phone", "value": "not-an-address"}));
    assert!(v.validate_root(&by_phone).is_valid());
}

#[test]
fn one_of_sibling_array_values() {
    let v = object(fields! {
        "options" => array(string()),
        "choice" => string().one_of_array_sibling_field_values("options"),
    });
    assert!(v.validate_root(&tree(json!({"options": ["a", "b"], "choice": "b"}))).is_valid());
    let result = v.validate_root(&tree(json!({"options": ["a", "b"], "choice": "c"})));
    let errors = unpack_errors(&result).unwrap();
    assert_eq!(errors.to_json(), json!({"choice": "Must be one of a, b"}));
}

#[test]
fn on_error_fires_for_failing_objects() {
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let v = object(fields! { "n" => number() }).on_error(move |_, _| *counter.lock().unwrap() += 1);

    assert!(v.validate_root(&tree(json!({"n": "x"}))).is_invalid());
    assert!(v.validate_root(&tree(json!({"n": 1}))).is_valid());
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn object_mutation_sees_validated_output() {
    let v = object(fields! { "n" => number() }).mutate(|value, _, _| {
        let n = value.get("n").and_then(Value::as_f64).unwrap_or_default();
        Value::from(json!({"n": n, "double": n * 2.0}))
    });
    assert_eq!(
        v.validate_root(&tree(json!({"n": "1,5"}))),
        ValidationResult::Valid(tree(json!({"n": 1.5, "double": 3.0})))
    );
}

// ============================================================================
// UNPACKING
// ============================================================================

#[test]
fn unpack_omits_passing_branches() {
    let v = object(fields! { "a" => string(), "b" => number() });
    let result = v.validate_root(&tree(json!({"a": "x", "b": "bad"})));
    let errors = unpack_errors(&result).unwrap();
    assert_eq!(errors.to_json(), json!({"b": "Must be a number"}));
    assert!(errors.get("a").is_none());
}

#[test]
fn unpack_of_any_of_pass_through_keeps_structure() {
    let v = any_of(vec![
        object(fields! { "n" => number().required() }).into(),
        number().into(),
    ])
    .pass_through(0)
    .unwrap();
    let result = v.validate_root(&tree(json!({"n": ""})));
    let errors = unpack_errors(&result).unwrap();
    assert_eq!(errors.to_json(), json!({"n": "This field is required"}));
}

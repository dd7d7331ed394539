//! Property-based tests for nebula-form-validator.

use nebula_form_validator::prelude::*;
use proptest::prelude::*;

fn run(v: &impl Validate, value: Value) -> ValidationResult {
    v.validate(&value, &Value::Null, &Value::Null)
}

// ============================================================================
// REQUIRED GATE
// ============================================================================

proptest! {
    #[test]
    fn optional_empty_is_always_valid(min in 0usize..50, pattern in "[a-z]{1,8}") {
        let v = string().min_length(min).regex(&format!("^{pattern}$")).unwrap();
        prop_assert_eq!(run(&v, Value::from("")), ValidationResult::Valid(Value::from("")));
        prop_assert_eq!(run(&v, Value::Null), ValidationResult::Valid(Value::Null));
    }

    #[test]
    fn required_empty_always_reports_required(min in 0usize..50) {
        let v = string().min_length(min).required();
        let result = run(&v, Value::from(""));
        prop_assert_eq!(result.message().map(|e| e.code.as_ref()), Some("required"));
    }
}

// ============================================================================
// DELOCALIZATION
// ============================================================================

proptest! {
    #[test]
    fn comma_and_dot_parse_alike(neg in any::<bool>(), whole in 0u32..1_000_000, frac in 0u32..1000) {
        let sign = if neg { "-" } else { "" };
        let comma = format!("{sign}{whole},{frac:03}");
        let dot = comma.replace(',', ".");
        let expected: f64 = dot.parse().unwrap();

        prop_assert_eq!(run(&number(), Value::from(comma)), ValidationResult::Valid(Value::from(expected)));
        prop_assert_eq!(run(&number(), Value::from(dot)), ValidationResult::Valid(Value::from(expected)));
    }

    #[test]
    fn integer_accepts_whole_text(n in -1_000_000i64..1_000_000) {
        let result = run(&integer(), Value::from(n.to_string()));
        prop_assert_eq!(result, ValidationResult::Valid(Value::from(n)));
    }
}

// ============================================================================
// DECIMAL FORMATTING
// ============================================================================

proptest! {
    #[test]
    fn decimal_places_is_idempotent(n in -1.0e6f64..1.0e6, places in 0usize..6) {
        let v = number().decimal_places(places);
        let first = run(&v, Value::from(n)).into_result().unwrap();
        let second = run(&v, first.clone()).into_result().unwrap();
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// NON-MUTATION
// ============================================================================

proptest! {
    #[test]
    fn object_validation_leaves_input_untouched(
        price in "[0-9]{1,4}(,[0-9]{1,2})?",
        tags in proptest::collection::vec("[a-z]{0,3}", 0..4),
    ) {
        let schema = object(fields! {
            "price" => number().decimal_places(2),
            "tags" => array(string().max_length(2)),
        });
        let input = Value::from(serde_json::json!({"price": price, "tags": tags}));
        let snapshot = input.clone();
        let _ = schema.validate_root(&input);
        let _ = schema.validate_shallow(&input, &input, &Value::Null);
        prop_assert_eq!(input, snapshot);
    }
}

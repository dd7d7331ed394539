//! Validating a nested sign-up form and printing its error tree.

use nebula_form_validator::prelude::*;
use nebula_form_validator::unpack::unpack_errors;
use serde_json::json;

fn main() {
    let schema = object(fields! {
        "email" => email().required(),
        "age" => integer().min(18.0),
        "stay" => object(fields! {
            "from" => date_only().required(),
            "until" => date_only().greater_or_equal_to_sibling("from"),
        }),
        "guests" => array(object(fields! {
            "name" => string().required(),
        }))
        .max_length(4),
    });

    let input = Value::from(json!({
        "email": "ada@example.com",
        "age": "17",
        "stay": {"from": "2024-06-10", "until": "2024-06-01"},
        "guests": [{"name": "Grace"}, {"name": ""}],
    }));

    match unpack_errors(&schema.validate_root(&input)) {
        Some(errors) => {
            println!("✗ form has errors:");
            for (path, error) in errors.leaves() {
                println!("  {path}: {error}");
            }
        }
        None => println!("✓ form is valid"),
    }

    let fixed = Value::from(json!({
        "email": "ada@example.com",
        "age": "21",
        "stay": {"from": "2024-06-01", "until": "2024-06-10"},
        "guests": [{"name": "Grace"}],
    }));
    if let ValidationResult::Valid(output) = schema.validate_root(&fixed) {
        println!("✓ normalised: {}", serde_json::Value::from(output));
    }
}

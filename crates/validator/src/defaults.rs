//! Merging caller-supplied initial values over synthesised defaults.

use crate::foundation::Validate;
use crate::validators::Validator;
use crate::value::Value;

/// Merges `user` over `defaults`.
///
/// Objects merge key by key; keys only in `defaults` are kept. Arrays merge
/// index by index and grow to the longer of the two; an entry only the user
/// supplied is completed against the item validator's default when `schema`
/// describes the array. Scalars take the user value.
///
/// # Examples
///
/// ```
/// use nebula_form_validator::prelude::*;
/// use nebula_form_validator::defaults::complete_default_values;
/// use serde_json::json;
///
/// let schema: Validator = object(fields! {
///     "contacts" => array(object(fields! {
///         "name" => string(),
///         "primary" => boolean().real_bool(),
///     })),
/// })
/// .into();
///
/// let user = Value::from(json!({"contacts": [{"name": "Ada"}, {"name": "Bob"}]}));
/// let merged = complete_default_values(&schema.default_value(), &user, Some(&schema));
/// assert_eq!(
///     merged,
///     Value::from(json!({"contacts": [
///         {"name": "Ada", "primary": false},
///         {"name": "Bob", "primary": false},
///     ]}))
/// );
/// ```
#[must_use]
pub fn complete_default_values(defaults: &Value, user: &Value, schema: Option<&Validator>) -> Value {
    match (defaults, user) {
        (Value::Object(base), Value::Object(overlay)) => {
            let mut merged = base.clone();
            for (key, value) in overlay {
                let child = schema.and_then(|schema| schema.field(key));
                let next = match base.get(key) {
                    Some(default) => complete_default_values(default, value, child),
                    None => complete_from_schema(value, child),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        (Value::Array(base), Value::Array(overlay)) => {
            let item = schema.and_then(Validator::item);
            let len = base.len().max(overlay.len());
            if overlay.len() > base.len() {
                tracing::trace!(from = base.len(), to = len, "growing array defaults");
            }
            let merged = (0..len)
                .map(|i| match (base.get(i), overlay.get(i)) {
                    (Some(default), Some(value)) => complete_default_values(default, value, item),
                    (Some(default), None) => default.clone(),
                    (None, Some(value)) => complete_from_schema(value, item),
                    (None, None) => Value::Null,
                })
                .collect();
            Value::Array(merged)
        }
        (_, user) => user.clone(),
    }
}

/// A user entry with no synthesised counterpart: complete it against the
/// validator's own default.
fn complete_from_schema(value: &Value, schema: Option<&Validator>) -> Value {
    match schema {
        Some(validator) => complete_default_values(&validator.default_value(), value, Some(validator)),
        None => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{ValidatorBuilder, array, number, object, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn merge(defaults: serde_json::Value, user: serde_json::Value) -> Value {
        complete_default_values(&Value::from(defaults), &Value::from(user), None)
    }

    #[test]
    fn user_scalars_win() {
        assert_eq!(
            merge(json!({"a": 1, "b": 2}), json!({"b": 3})),
            Value::from(json!({"a": 1, "b": 3}))
        );
    }

    #[test]
    fn arrays_grow_to_user_length() {
        assert_eq!(
            merge(json!({"list": [1]}), json!({"list": [5, 6, 7]})),
            Value::from(json!({"list": [5, 6, 7]}))
        );
        assert_eq!(
            merge(json!([1, 2, 3]), json!([9])),
            Value::from(json!([9, 2, 3]))
        );
    }

    #[test]
    fn new_entries_take_item_defaults() {
        let schema: Validator = array(object(crate::fields! {
            "qty" => number().with_default(1),
            "note" => string(),
        }))
        .into();
        let merged = complete_default_values(
            &schema.default_value(),
            &Value::from(json!([{"note": "x"}, {"qty": 4}])),
            Some(&schema),
        );
        assert_eq!(
            merged,
            Value::from(json!([{"qty": 1, "note": "x"}, {"qty": 4, "note": ""}]))
        );
    }

    #[test]
    fn inputs_are_not_modified() {
        let defaults = Value::from(json!({"a": [1]}));
        let user = Value::from(json!({"a": [2, 3]}));
        let (d, u) = (defaults.clone(), user.clone());
        let _ = complete_default_values(&defaults, &user, None);
        assert_eq!((defaults, user), (d, u));
    }
}

//! Dotted key paths over value trees and validator trees.
//!
//! A path such as `"contacts.0.email"` is split on `.`; each segment is an
//! object key or, against an array, a decimal index. Lookups distinguish a
//! present-but-falsy value (`0`, `false`, `""`, `null`) from an absent one:
//! only absence is an error.
//!
//! Writes never touch the caller's tree. [`set_value`] returns a new tree
//! with the leaf replaced and any missing intermediate containers created;
//! a numeric next segment creates an array, anything else an object.

use crate::foundation::PathError;
use crate::validators::Validator;
use crate::value::{Map, Value};

/// Splits a key path into its segments. The empty path has no segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(move |_| !path.is_empty())
}

/// `true` when the segment addresses an array element.
#[must_use]
pub fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// VALUE LOOKUP
// ============================================================================

/// Reads the value at `path`.
///
/// # Examples
///
/// ```
/// use nebula_form_validator::path::get_value;
/// use nebula_form_validator::Value;
/// use serde_json::json;
///
/// let tree = Value::from(json!({"a": {"list": [0, false]}}));
/// assert_eq!(get_value("a.list.1", &tree).unwrap(), &Value::Bool(false));
/// assert!(get_value("a.missing", &tree).is_err());
/// ```
pub fn get_value<'a>(path: &str, container: &'a Value) -> Result<&'a Value, PathError> {
    let mut current = container;
    for segment in segments(path) {
        current = current
            .get(segment)
            .ok_or_else(|| PathError::KeyNotFound {
                path: path.to_owned(),
                segment: segment.to_owned(),
            })?;
    }
    Ok(current)
}

/// Returns a copy of `container` with the value at `path` replaced.
pub fn set_value(path: &str, value: Value, container: &Value) -> Result<Value, PathError> {
    set_value_owned(path, value, container.clone())
}

/// Like [`set_value`] but consumes the container, avoiding the copy.
pub fn set_value_owned(path: &str, value: Value, container: Value) -> Result<Value, PathError> {
    let parts: Vec<&str> = segments(path).collect();
    insert(container, &parts, value, path)
}

fn insert(container: Value, parts: &[&str], value: Value, path: &str) -> Result<Value, PathError> {
    let Some((&head, rest)) = parts.split_first() else {
        return Ok(value);
    };

    let container = if container.is_null() {
        fresh_container(head)
    } else {
        container
    };

    match container {
        Value::Object(mut map) => {
            let slot = map.entry(head.to_owned()).or_insert(Value::Null);
            let child = std::mem::take(slot);
            *slot = insert(child, rest, value, path)?;
            Ok(Value::Object(map))
        }
        Value::Array(mut items) => {
            let index = head
                .parse::<usize>()
                .map_err(|_| PathError::KeyNotFound {
                    path: path.to_owned(),
                    segment: head.to_owned(),
                })?;
            // Writes may append one element, never leave holes.
            if index > items.len() {
                return Err(PathError::IndexOutOfRange {
                    path: path.to_owned(),
                    segment: head.to_owned(),
                    len: items.len(),
                });
            }
            if index == items.len() {
                items.push(Value::Null);
            }
            let child = std::mem::take(&mut items[index]);
            items[index] = insert(child, rest, value, path)?;
            Ok(Value::Array(items))
        }
        _ => Err(PathError::NotAContainer {
            path: path.to_owned(),
            segment: head.to_owned(),
        }),
    }
}

fn fresh_container(segment: &str) -> Value {
    if is_index(segment) {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

// ============================================================================
// VALIDATOR LOOKUP
// ============================================================================

/// Resolves the validator responsible for `path`.
///
/// At an array node a numeric segment selects the item validator; a field
/// name descends into the item validator's fields directly, so
/// `"contacts.email"` and `"contacts.3.email"` resolve to the same node.
/// An any-of node consumes no segment: its options are tried in order and
/// the first that resolves the rest of the path wins.
pub fn find_validator<'a>(path: &str, schema: &'a Validator) -> Result<&'a Validator, PathError> {
    let parts: Vec<&str> = segments(path).collect();
    descend(schema, &parts).map_err(|segment| PathError::ValidatorNotFound {
        path: path.to_owned(),
        segment: segment.to_owned(),
    })
}

/// Walks `parts` down from `node`; `Err` carries the unresolved segment.
fn descend<'a, 's>(node: &'a Validator, parts: &[&'s str]) -> Result<&'a Validator, &'s str> {
    let Some((&head, rest)) = parts.split_first() else {
        return Ok(node);
    };
    match node {
        Validator::AnyOf(any) => {
            let mut missing = head;
            for option in any.options() {
                match descend(option, parts) {
                    Ok(found) => return Ok(found),
                    Err(segment) => missing = segment,
                }
            }
            Err(missing)
        }
        Validator::Array(array) if is_index(head) => descend(array.item(), rest),
        Validator::Array(array) => descend(array.item(), parts),
        Validator::Object(object) => descend(object.field(head).ok_or(head)?, rest),
        _ => Err(head),
    }
}

/// Resolves the validator for `path` together with the siblings it sees
/// during whole-tree validation: the object that encloses the addressed
/// field. Array elements have no enclosing object of their own, so for them
/// the lookup climbs past every array to the first non-array ancestor.
pub fn find_validator_and_siblings<'a, 'v>(
    path: &str,
    schema: &'a Validator,
    values: &'v Value,
) -> Result<(&'a Validator, &'v Value), PathError> {
    let validator = find_validator(path, schema)?;
    let mut parent = path;
    let siblings = loop {
        let Some((up, _)) = parent.rsplit_once('.') else {
            break values;
        };
        parent = up;
        let candidate = get_value(parent, values)?;
        if !matches!(candidate, Value::Array(_)) {
            break candidate;
        }
    };
    Ok((validator, siblings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{AnyOfValidator, ArrayValidator, Kind, ObjectValidator, number, string};
    use serde_json::json;

    fn tree() -> Value {
        Value::from(json!({
            "name": "",
            "count": 0,
            "items": [{"qty": 1}, {"qty": 2}]
        }))
    }

    #[test]
    fn falsy_values_are_present() {
        let tree = tree();
        assert_eq!(get_value("name", &tree).unwrap(), &Value::from(""));
        assert_eq!(get_value("count", &tree).unwrap(), &Value::from(0));
    }

    #[test]
    fn missing_segment_reports_key() {
        let err = get_value("items.5.qty", &tree()).unwrap_err();
        assert_eq!(
            err,
            PathError::KeyNotFound {
                path: "items.5.qty".into(),
                segment: "5".into()
            }
        );
    }

    #[test]
    fn empty_path_is_root() {
        let tree = tree();
        assert_eq!(get_value("", &tree).unwrap(), &tree);
    }

    #[test]
    fn set_leaves_input_untouched() {
        let original = tree();
        let snapshot = original.clone();
        let updated = set_value("items.1.qty", Value::from(5), &original).unwrap();

        assert_eq!(original, snapshot);
        assert_eq!(get_value("items.1.qty", &updated).unwrap(), &Value::from(5));
        assert_eq!(get_value("items.0.qty", &updated).unwrap(), &Value::from(1));
    }

    #[test]
    fn set_creates_intermediates_by_segment_shape() {
        let updated = set_value("a.0.b", Value::from("x"), &Value::object()).unwrap();
        assert_eq!(
            serde_json::Value::from(updated),
            json!({"a": [{"b": "x"}]})
        );
    }

    #[test]
    fn set_through_scalar_fails() {
        let err = set_value("count.x", Value::Null, &tree()).unwrap_err();
        assert_eq!(err.code(), "PATH_NOT_A_CONTAINER");
    }

    #[test]
    fn set_appends_at_the_end_of_an_array() {
        let updated = set_value("items.2.qty", Value::from(3), &tree()).unwrap();
        assert_eq!(get_value("items.2.qty", &updated).unwrap(), &Value::from(3));
        assert_eq!(get_value("items.1.qty", &updated).unwrap(), &Value::from(2));
    }

    #[test]
    fn set_rejects_indices_past_the_end() {
        let max = format!("items.{}", usize::MAX);
        for path in ["items.3.qty", "items.100000000000", max.as_str()] {
            let err = set_value(path, Value::from(1), &tree()).unwrap_err();
            assert_eq!(err.code(), "PATH_INDEX_OUT_OF_RANGE", "{path}");
            assert_eq!(err.path(), path);
        }
    }

    #[test]
    fn find_validator_skips_indices_at_arrays() {
        let schema: Validator = ObjectValidator::new(crate::fields! {
            "items" => ArrayValidator::new(ObjectValidator::new(crate::fields! {
                "qty" => number(),
            })),
            "name" => string(),
        })
        .into();

        let by_index = find_validator("items.3.qty", &schema).unwrap();
        let by_field = find_validator("items.qty", &schema).unwrap();
        assert_eq!(by_index.kind(), Kind::Number);
        assert_eq!(by_field.kind(), Kind::Number);
        assert!(find_validator("items.nope", &schema).is_err());
        assert!(find_validator("name.deeper", &schema).is_err());
    }

    #[test]
    fn siblings_are_the_enclosing_object() {
        let schema: Validator = ObjectValidator::new(crate::fields! {
            "items" => ArrayValidator::new(ObjectValidator::new(crate::fields! {
                "qty" => number(),
            })),
        })
        .into();
        let values = tree();
        let (_, siblings) = find_validator_and_siblings("items.1.qty", &schema, &values).unwrap();
        assert_eq!(siblings, &Value::from(json!({"qty": 2})));

        let (_, root) = find_validator_and_siblings("items", &schema, &values).unwrap();
        assert_eq!(root, &values);
    }

    #[test]
    fn find_validator_descends_into_any_of_options() {
        let schema: Validator = ObjectValidator::new(crate::fields! {
            "contact" => AnyOfValidator::new(vec![
                ObjectValidator::new(crate::fields! { "phone" => number() }).into(),
                ObjectValidator::new(crate::fields! { "email" => string() }).into(),
            ]),
        })
        .into();

        assert_eq!(find_validator("contact.phone", &schema).unwrap().kind(), Kind::Number);
        assert_eq!(find_validator("contact.email", &schema).unwrap().kind(), Kind::String);
        assert_eq!(find_validator("contact", &schema).unwrap().kind(), Kind::AnyOf);
        let err = find_validator("contact.fax", &schema).unwrap_err();
        assert_eq!(
            err,
            PathError::ValidatorNotFound {
                path: "contact.fax".into(),
                segment: "fax".into()
            }
        );
    }

    #[test]
    fn siblings_of_array_elements_skip_the_array() {
        let schema: Validator = ObjectValidator::new(crate::fields! {
            "min" => number(),
            "grid" => ArrayValidator::new(ArrayValidator::new(number())),
        })
        .into();
        let values = Value::from(json!({"min": 1, "grid": [[1, 2], [3]]}));
        let (_, siblings) = find_validator_and_siblings("grid.1.0", &schema, &values).unwrap();
        assert_eq!(siblings, &values);
    }
}

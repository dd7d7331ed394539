//! Sparse, display-ready error trees.
//!
//! A [`ValidationResult`] carries every branch, passing ones included, so a
//! failure can be traced to its sub-path. For display only the failing
//! leaves matter: [`unpack_errors`] keeps exactly those, keyed by field name
//! or element index.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::foundation::{Failure, ValidationError, ValidationResult};
use crate::path;

/// Failing subset of a validation result.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorTree {
    Message(ValidationError),
    Fields(IndexMap<String, ErrorTree>),
    Items(BTreeMap<usize, ErrorTree>),
}

/// Extracts the failing leaves of `result`; `None` when it passed.
///
/// # Examples
///
/// ```
/// use nebula_form_validator::prelude::*;
/// use nebula_form_validator::unpack::unpack_errors;
/// use serde_json::json;
///
/// let schema = object(fields! {
///     "a" => string(),
///     "b" => number(),
/// });
/// let result = schema.validate_root(&Value::from(json!({"a": "x", "b": "bad"})));
/// let tree = unpack_errors(&result).unwrap();
/// assert_eq!(tree.to_json(), json!({"b": "Must be a number"}));
/// ```
#[must_use]
pub fn unpack_errors(result: &ValidationResult) -> Option<ErrorTree> {
    let tree = match result.failure()? {
        Failure::Message(error) => ErrorTree::Message(error.clone()),
        Failure::Fields(fields) => ErrorTree::Fields(
            fields
                .iter()
                .filter_map(|(name, nested)| Some((name.clone(), unpack_errors(nested)?)))
                .collect(),
        ),
        Failure::Items(items) => ErrorTree::Items(
            items
                .iter()
                .enumerate()
                .filter_map(|(index, nested)| Some((index, unpack_errors(nested)?)))
                .collect(),
        ),
    };
    Some(tree)
}

impl ErrorTree {
    /// The leaf error, if this node is a leaf.
    #[must_use]
    pub fn message(&self) -> Option<&ValidationError> {
        match self {
            Self::Message(error) => Some(error),
            _ => None,
        }
    }

    /// Looks up the error subtree at a dotted key path.
    #[must_use]
    pub fn get(&self, key_path: &str) -> Option<&ErrorTree> {
        let mut current = self;
        for segment in path::segments(key_path) {
            current = match current {
                Self::Fields(fields) => fields.get(segment)?,
                Self::Items(items) => items.get(&segment.parse::<usize>().ok()?)?,
                Self::Message(_) => return None,
            };
        }
        Some(current)
    }

    /// Every leaf with its dotted key path, depth first.
    #[must_use]
    pub fn leaves(&self) -> Vec<(String, &ValidationError)> {
        let mut out = Vec::new();
        self.collect_leaves(String::new(), &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, prefix: String, out: &mut Vec<(String, &'a ValidationError)>) {
        let join = |key: &str| {
            if prefix.is_empty() {
                key.to_owned()
            } else {
                format!("{prefix}.{key}")
            }
        };
        match self {
            Self::Message(error) => out.push((prefix.clone(), error)),
            Self::Fields(fields) => {
                for (name, nested) in fields {
                    nested.collect_leaves(join(name), out);
                }
            }
            Self::Items(items) => {
                for (index, nested) in items {
                    nested.collect_leaves(join(&index.to_string()), out);
                }
            }
        }
    }

    /// Renders the tree with every leaf replaced by its display text.
    /// Element indices become object keys.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Message(error) => serde_json::Value::String(error.render()),
            Self::Fields(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(name, nested)| (name.clone(), nested.to_json()))
                    .collect(),
            ),
            Self::Items(items) => serde_json::Value::Object(
                items
                    .iter()
                    .map(|(index, nested)| (index.to_string(), nested.to_json()))
                    .collect(),
            ),
        }
    }
}

//! Shared validator state and the evaluation loop.
//!
//! Every kind embeds a [`Base`]: required-ness, default value, ordered
//! check-steps, dependent triples and post-processing hooks. The loop is
//!
//! 1. dependent delegation: the first triple whose predicate matches the
//!    other field's current value validates instead of this node;
//! 2. required gate: empty input short-circuits to success (optional) or to
//!    the required message (required);
//! 3. check-steps in registration order, threading replaced values forward
//!    and stopping at the first failure;
//! 4. post-processing: `on_error` on failure, `mutate` on success.
//!
//! Composite kinds reuse the pieces and walk their children between steps 3
//! and 4.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::foundation::{
    CheckStep, ErrorHook, MutationFn, Predicate, StepOutcome, Validate, ValidationError,
    ValidationResult,
};
use crate::messages::{self, MessageDef};
use crate::path;
use crate::validators::{Validator, date, number};
use crate::value::{NULL, Value};

// ============================================================================
// METADATA
// ============================================================================

/// Hints exposed to the UI layer alongside validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meta {
    /// Suggested HTML input type (`text`, `number`, `checkbox`, ...).
    pub input_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_num: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_num: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_child_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_child_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_date: Option<String>,
}

// ============================================================================
// COMPARISON
// ============================================================================

/// How cross-field helpers order this node's value against another field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparison {
    /// Numbers numerically, everything else by text.
    Lexical,
    /// Both sides parsed as (possibly localized) numbers.
    Numeric,
    /// Both sides parsed as datetimes and compared by instant.
    Date,
    /// Both sides must be `YYYY-MM-DD` strings; compared as text.
    DateOnly,
}

impl Comparison {
    /// `None` when either side cannot be interpreted; callers treat that as
    /// a satisfied comparison.
    pub(crate) fn compare(self, this: &Value, other: &Value) -> Option<Ordering> {
        match self {
            Self::Numeric => number::to_number(this)?.partial_cmp(&number::to_number(other)?),
            Self::Date => Some(date::to_datetime(this)?.cmp(&date::to_datetime(other)?)),
            Self::DateOnly => {
                let (a, b) = (this.as_str()?, other.as_str()?);
                date::parse_date_only(b)?;
                Some(a.cmp(b))
            }
            Self::Lexical => match (this, other) {
                (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
                _ => Some(this.as_text()?.cmp(&other.as_text()?)),
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Relation {
    Greater,
    Less,
    GreaterOrEqual,
    LessOrEqual,
}

impl Relation {
    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Greater => ordering == Ordering::Greater,
            Self::Less => ordering == Ordering::Less,
            Self::GreaterOrEqual => ordering != Ordering::Less,
            Self::LessOrEqual => ordering != Ordering::Greater,
        }
    }

    fn message(self) -> MessageDef {
        match self {
            Self::Greater => messages::GREATER_THAN,
            Self::Less => messages::LESS_THAN,
            Self::GreaterOrEqual => messages::GREATER_OR_EQUAL,
            Self::LessOrEqual => messages::LESS_OR_EQUAL,
        }
    }
}

/// Which context a cross-field path is resolved against.
#[derive(Debug, Clone, Copy)]
enum Scope {
    All,
    Siblings,
}

impl Scope {
    fn pick<'a>(self, all: &'a Value, siblings: &'a Value) -> &'a Value {
        match self {
            Self::All => all,
            Self::Siblings => siblings,
        }
    }
}

// ============================================================================
// DEPENDENT
// ============================================================================

/// A `(path, predicate, validator)` triple: when the predicate holds for the
/// value at `path`, `validator` replaces this node entirely.
#[derive(Clone)]
pub struct Dependent {
    pub(crate) path: String,
    pub(crate) predicate: Predicate,
    pub(crate) validator: Box<Validator>,
}

impl fmt::Debug for Dependent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependent")
            .field("path", &self.path)
            .field("predicate", &"<function>")
            .field("validator", &self.validator.kind())
            .finish()
    }
}

// ============================================================================
// BASE
// ============================================================================

/// State shared by every validator kind.
#[derive(Clone)]
pub struct Base {
    pub(crate) is_required: bool,
    pub(crate) required_message: Option<Cow<'static, str>>,
    pub(crate) default_error_msg: Option<Cow<'static, str>>,
    pub(crate) default_value: Option<Value>,
    pub(crate) dependents: Vec<Dependent>,
    pub(crate) mutation: Option<MutationFn>,
    pub(crate) on_error: Option<ErrorHook>,
    pub(crate) steps: Vec<CheckStep>,
    pub(crate) meta: Meta,
    pub(crate) comparison: Comparison,
}

/// Decision of the required gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Gate {
    /// Optional and empty: valid as-is, no steps run.
    Skip,
    /// Required and empty.
    Missing,
    /// Run the steps.
    Proceed,
}

impl Base {
    pub(crate) fn new(input_type: &'static str, comparison: Comparison) -> Self {
        Self {
            is_required: false,
            required_message: None,
            default_error_msg: None,
            default_value: None,
            dependents: Vec::new(),
            mutation: None,
            on_error: None,
            steps: Vec::new(),
            meta: Meta {
                input_type,
                ..Meta::default()
            },
            comparison,
        }
    }

    /// Registered check-steps, in run order.
    #[must_use]
    pub fn steps(&self) -> &[CheckStep] {
        &self.steps
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    #[must_use]
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Configured default, if any.
    #[must_use]
    pub fn configured_default(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub(crate) fn push_step(&mut self, step: CheckStep) {
        self.steps.push(step);
    }

    pub(crate) fn required_error(&self) -> ValidationError {
        let error = messages::REQUIRED.error();
        match &self.required_message {
            Some(message) => error.with_message(message.clone()),
            None => error,
        }
    }

    pub(crate) fn fallback_error(&self) -> ValidationError {
        let error = messages::INVALID.error();
        match &self.default_error_msg {
            Some(message) => error.with_message(message.clone()),
            None => error,
        }
    }

    /// Runs the dependent triples; `Some` when one took over.
    pub(crate) fn delegate(
        &self,
        value: &Value,
        all: &Value,
        siblings: &Value,
        recurse: bool,
    ) -> Option<ValidationResult> {
        let dependent = self.dependents.iter().find(|dependent| {
            let other = path::get_value(&dependent.path, all).unwrap_or(&NULL);
            (dependent.predicate)(other, value)
        })?;
        tracing::debug!(
            path = %dependent.path,
            kind = ?dependent.validator.kind(),
            "dependent validator takes over"
        );
        Some(dependent.validator.validate_mode(value, all, siblings, recurse))
    }

    pub(crate) fn gate(&self, empty: bool) -> Gate {
        match (empty, self.is_required) {
            (false, _) => Gate::Proceed,
            (true, false) => Gate::Skip,
            (true, true) => Gate::Missing,
        }
    }

    /// Runs the check-steps; borrows the input until a step replaces it.
    pub(crate) fn run_steps<'v>(
        &self,
        value: &'v Value,
        all: &Value,
        siblings: &Value,
    ) -> Result<Cow<'v, Value>, ValidationError> {
        let mut current = Cow::Borrowed(value);
        for step in &self.steps {
            match step.run(&current, all, siblings) {
                StepOutcome::Pass => {}
                StepOutcome::Replace(next) => current = Cow::Owned(next),
                StepOutcome::Fail(error) => {
                    let error = error.unwrap_or_else(|| self.fallback_error());
                    tracing::trace!(step = %step.name, code = %error.code, "check step failed");
                    return Err(error);
                }
            }
        }
        Ok(current)
    }

    /// Post-processing: `on_error` on failure, `mutate` on success.
    pub(crate) fn finish(
        &self,
        original: &Value,
        all: &Value,
        siblings: &Value,
        result: ValidationResult,
    ) -> ValidationResult {
        match result {
            ValidationResult::Valid(value) => match &self.mutation {
                Some(mutate) => ValidationResult::Valid(mutate(&value, all, siblings)),
                None => ValidationResult::Valid(value),
            },
            invalid @ ValidationResult::Invalid(_) => {
                if let Some(hook) = &self.on_error {
                    hook(original, all);
                }
                invalid
            }
        }
    }

    /// The full loop for scalar kinds.
    pub(crate) fn evaluate(&self, value: &Value, all: &Value, siblings: &Value) -> ValidationResult {
        if let Some(result) = self.delegate(value, all, siblings, true) {
            return self.finish(value, all, siblings, result);
        }
        let result = match self.gate(value.is_empty_input()) {
            Gate::Skip => ValidationResult::Valid(value.clone()),
            Gate::Missing => ValidationResult::error(self.required_error()),
            Gate::Proceed => match self.run_steps(value, all, siblings) {
                Ok(checked) => ValidationResult::Valid(checked.into_owned()),
                Err(error) => ValidationResult::error(error),
            },
        };
        self.finish(value, all, siblings, result)
    }
}

impl fmt::Debug for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Base")
            .field("is_required", &self.is_required)
            .field("default_value", &self.default_value)
            .field("steps", &self.steps)
            .field("dependents", &self.dependents)
            .field("mutation", &self.mutation.as_ref().map(|_| "<function>"))
            .field("on_error", &self.on_error.as_ref().map(|_| "<function>"))
            .field("meta", &self.meta)
            .finish()
    }
}

// ============================================================================
// BUILDER TRAIT
// ============================================================================

/// Configuration methods shared by every validator kind.
///
/// These are schema-construction calls: build the tree once, then validate
/// against it as often as needed.
///
/// # Examples
///
/// ```
/// use nebula_form_validator::prelude::*;
///
/// let end = number()
///     .required()
///     .greater_than_sibling("start")
///     .message("End must come after start");
/// assert!(Validator::from(end).is_required());
/// ```
pub trait ValidatorBuilder: Sized {
    #[doc(hidden)]
    fn base_ref(&self) -> &Base;

    #[doc(hidden)]
    fn base_mut(&mut self) -> &mut Base;

    /// Empty values now fail with the required message.
    fn required(mut self) -> Self {
        self.base_mut().is_required = true;
        self
    }

    /// Like [`required`](Self::required) with a custom message.
    fn required_with(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        let base = self.base_mut();
        base.is_required = true;
        base.required_message = Some(message.into());
        self
    }

    /// Value synthesised by `default_value()`.
    fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.base_mut().default_value = Some(value.into());
        self
    }

    /// Message used when a step fails without one of its own.
    fn default_error_msg(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.base_mut().default_error_msg = Some(message.into());
        self
    }

    /// Overrides the message of the most recently added step. Without any
    /// step it sets the default error message.
    fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        let base = self.base_mut();
        match base.steps.last_mut() {
            Some(step) => step.message = Some(message.into()),
            None => base.default_error_msg = Some(message.into()),
        }
        self
    }

    /// Appends a custom check-step.
    fn custom<F>(mut self, name: impl Into<Cow<'static, str>>, step: F) -> Self
    where
        F: Fn(&Value, &Value, &Value) -> StepOutcome + Send + Sync + 'static,
    {
        self.base_mut().push_step(CheckStep::new(name, step));
        self
    }

    /// Appends a dependent triple. Triples are tried in order; the first
    /// whose predicate holds for the value at `path` (resolved against the
    /// whole tree, `null` when absent) validates instead of this node.
    fn dependent<F>(mut self, path: impl Into<String>, predicate: F, validator: impl Into<Validator>) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.base_mut().dependents.push(Dependent {
            path: path.into(),
            predicate: Arc::new(predicate),
            validator: Box::new(validator.into()),
        });
        self
    }

    /// Transforms the value after a successful validation.
    fn mutate<F>(mut self, mutation: F) -> Self
    where
        F: Fn(&Value, &Value, &Value) -> Value + Send + Sync + 'static,
    {
        self.base_mut().mutation = Some(Arc::new(mutation));
        self
    }

    /// Side-effect callback invoked with `(original_value, all_values)` on
    /// failure. It cannot change the result.
    fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value, &Value) + Send + Sync + 'static,
    {
        self.base_mut().on_error = Some(Arc::new(hook));
        self
    }

    /// Rejects every non-empty value. Useful as a guard on an any-of.
    fn always_false(self) -> Self {
        self.custom(messages::ALWAYS_FALSE.code, |_, _, _| {
            StepOutcome::fail(messages::ALWAYS_FALSE.error())
        })
    }

    /// The value must equal one of `allowed`.
    fn one_of<I, T>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let allowed: Vec<Value> = allowed.into_iter().map(Into::into).collect();
        let listed = join_values(&allowed);
        self.custom(messages::ONE_OF.code, move |value, _, _| {
            StepOutcome::check(allowed.contains(value), || {
                messages::ONE_OF.error().with_param("values", listed.clone())
            })
        })
    }

    /// The value must be an element of the array found at `path` in the
    /// whole tree.
    fn one_of_array_field_values(self, path: impl Into<String>) -> Self {
        membership(self, Scope::All, path.into())
    }

    /// The value must be an element of the array found at `path` among the
    /// siblings.
    fn one_of_array_sibling_field_values(self, path: impl Into<String>) -> Self {
        membership(self, Scope::Siblings, path.into())
    }

    fn greater_than(self, path: impl Into<String>) -> Self {
        compare_field(self, Scope::All, path.into(), Relation::Greater)
    }

    fn less_than(self, path: impl Into<String>) -> Self {
        compare_field(self, Scope::All, path.into(), Relation::Less)
    }

    fn greater_or_equal_to(self, path: impl Into<String>) -> Self {
        compare_field(self, Scope::All, path.into(), Relation::GreaterOrEqual)
    }

    fn less_or_equal_to(self, path: impl Into<String>) -> Self {
        compare_field(self, Scope::All, path.into(), Relation::LessOrEqual)
    }

    fn greater_than_sibling(self, path: impl Into<String>) -> Self {
        compare_field(self, Scope::Siblings, path.into(), Relation::Greater)
    }

    fn less_than_sibling(self, path: impl Into<String>) -> Self {
        compare_field(self, Scope::Siblings, path.into(), Relation::Less)
    }

    fn greater_or_equal_to_sibling(self, path: impl Into<String>) -> Self {
        compare_field(self, Scope::Siblings, path.into(), Relation::GreaterOrEqual)
    }

    fn less_or_equal_to_sibling(self, path: impl Into<String>) -> Self {
        compare_field(self, Scope::Siblings, path.into(), Relation::LessOrEqual)
    }
}

/// Cross-field comparison step. A missing or uninterpretable other field
/// satisfies the comparison; that field reports its own error.
fn compare_field<B: ValidatorBuilder>(builder: B, scope: Scope, path: String, relation: Relation) -> B {
    let comparison = builder.base_ref().comparison;
    let def = relation.message();
    builder.custom(def.code, move |value, all, siblings| {
        let Ok(other) = path::get_value(&path, scope.pick(all, siblings)) else {
            return StepOutcome::Pass;
        };
        match comparison.compare(value, other) {
            Some(ordering) => StepOutcome::check(relation.holds(ordering), || {
                def.error()
                    .with_param("field", path.clone())
                    .with_param("value", other.to_string())
            }),
            None => StepOutcome::Pass,
        }
    })
}

/// Membership against another field that must hold an array. Anything else
/// is a schema/data mismatch: warn and fail rather than abort validation.
fn membership<B: ValidatorBuilder>(builder: B, scope: Scope, path: String) -> B {
    builder.custom(messages::ONE_OF.code, move |value, all, siblings| {
        match path::get_value(&path, scope.pick(all, siblings)) {
            Ok(Value::Array(items)) => StepOutcome::check(items.contains(value), || {
                messages::ONE_OF
                    .error()
                    .with_param("values", join_values(items))
            }),
            Ok(other) => {
                tracing::warn!(
                    path = %path,
                    found = other.type_name(),
                    "one-of check against a field that is not an array"
                );
                StepOutcome::fail(messages::ONE_OF.error().with_param("values", ""))
            }
            Err(error) => {
                tracing::warn!(path = %path, %error, "one-of check against a missing field");
                StepOutcome::fail(messages::ONE_OF.error().with_param("values", ""))
            }
        }
    })
}

fn join_values(values: &[Value]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// BASE VALIDATOR
// ============================================================================

/// The plain node: no kind-specific steps, text input hint.
#[derive(Debug, Clone)]
pub struct BaseValidator {
    pub(crate) base: Base,
}

impl BaseValidator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Base::new("text", Comparison::Lexical),
        }
    }
}

impl Default for BaseValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for BaseValidator {
    fn validate(&self, value: &Value, all: &Value, siblings: &Value) -> ValidationResult {
        self.base.evaluate(value, all, siblings)
    }

    fn default_value(&self) -> Value {
        self.base
            .default_value
            .clone()
            .unwrap_or_else(|| Value::from(""))
    }
}

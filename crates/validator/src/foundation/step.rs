//! Check-steps: the ordered predicates and transforms a validator runs.
//!
//! A step sees the current value (possibly already replaced by an earlier
//! step), the whole value tree and the immediately enclosing object, and
//! answers with a [`StepOutcome`]. The tri-state keeps type changes explicit:
//! a step that turns `"1,5"` into `1.5`, or `1.5` into `"1.50"`, says so with
//! [`StepOutcome::Replace`].

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::foundation::ValidationError;
use crate::value::Value;

/// Answer of a single check-step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The step failed. `None` falls back to the node's default message.
    Fail(Option<ValidationError>),
    /// The step passed and the value is unchanged.
    Pass,
    /// The step passed and later steps (and the result) see this value.
    Replace(Value),
}

impl StepOutcome {
    /// Passes when `ok`, otherwise fails with `error`.
    pub fn check(ok: bool, error: impl FnOnce() -> ValidationError) -> Self {
        if ok { Self::Pass } else { Self::Fail(Some(error())) }
    }

    /// Fails with the given message.
    #[must_use]
    pub fn fail(error: ValidationError) -> Self {
        Self::Fail(Some(error))
    }
}

/// Step function: `(value, all_values, siblings) -> outcome`.
pub type CheckFn = Arc<dyn Fn(&Value, &Value, &Value) -> StepOutcome + Send + Sync>;

/// Post-success transform: `(value, all_values, siblings) -> new value`.
pub type MutationFn = Arc<dyn Fn(&Value, &Value, &Value) -> Value + Send + Sync>;

/// Side-effect callback on failure: `(original_value, all_values)`.
pub type ErrorHook = Arc<dyn Fn(&Value, &Value) + Send + Sync>;

/// Dependent predicate: `(other_field_value, this_value) -> matches`.
pub type Predicate = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// A named check-step with an optional message override.
#[derive(Clone)]
pub struct CheckStep {
    pub(crate) name: Cow<'static, str>,
    pub(crate) check: CheckFn,
    pub(crate) message: Option<Cow<'static, str>>,
}

impl CheckStep {
    /// Wraps a step function under a name used in traces.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn(&Value, &Value, &Value) -> StepOutcome + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
            message: None,
        }
    }

    /// Step name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the step, applying the message override to a failure.
    pub(crate) fn run(&self, value: &Value, all: &Value, siblings: &Value) -> StepOutcome {
        match (self.check)(value, all, siblings) {
            StepOutcome::Fail(Some(error)) => match &self.message {
                Some(message) => StepOutcome::fail(error.with_message(message.clone())),
                None => StepOutcome::Fail(Some(error)),
            },
            StepOutcome::Fail(None) => StepOutcome::Fail(
                self.message
                    .clone()
                    .map(|message| ValidationError::new(self.name.clone(), message)),
            ),
            outcome => outcome,
        }
    }
}

impl fmt::Debug for CheckStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckStep")
            .field("name", &self.name)
            .field("check", &"<function>")
            .field("message", &self.message)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_override_keeps_code_and_params() {
        let mut step = CheckStep::new("min", |_, _, _| {
            StepOutcome::fail(ValidationError::new("min", "too small").with_param("num", "3"))
        });
        step.message = Some("need {{num}}".into());

        let StepOutcome::Fail(Some(error)) = step.run(&Value::Null, &Value::Null, &Value::Null)
        else {
            panic!("step should fail");
        };
        assert_eq!(error.code, "min");
        assert_eq!(error.render(), "need 3");
    }

    #[test]
    fn anonymous_failure_uses_override_when_present() {
        let mut step = CheckStep::new("custom", |_, _, _| StepOutcome::Fail(None));
        assert_eq!(
            step.run(&Value::Null, &Value::Null, &Value::Null),
            StepOutcome::Fail(None)
        );

        step.message = Some("nope".into());
        let outcome = step.run(&Value::Null, &Value::Null, &Value::Null);
        assert_eq!(
            outcome,
            StepOutcome::fail(ValidationError::new("custom", "nope"))
        );
    }

    #[test]
    fn check_helper() {
        assert_eq!(
            StepOutcome::check(true, || ValidationError::new("x", "x")),
            StepOutcome::Pass
        );
        assert!(matches!(
            StepOutcome::check(false, || ValidationError::new("x", "x")),
            StepOutcome::Fail(Some(_))
        ));
    }
}

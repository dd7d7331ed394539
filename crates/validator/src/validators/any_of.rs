//! First-match alternation over candidate validators.

use crate::foundation::{Failure, SchemaError, Validate, ValidationError, ValidationResult};
use crate::messages;
use crate::validators::Validator;
use crate::validators::base::{Base, Comparison};
use crate::value::Value;

/// Passes when any candidate passes; the first passing candidate's output
/// is the result.
///
/// When no candidate passes the failure is the generic any-of message, or,
/// with [`pass_through`](Self::pass_through), the failure of one chosen
/// candidate so the user sees a concrete reason.
#[derive(Debug, Clone)]
pub struct AnyOfValidator {
    pub(crate) base: Base,
    options: Vec<Validator>,
    pass_through: Option<usize>,
}

impl AnyOfValidator {
    #[must_use]
    pub fn new(options: Vec<Validator>) -> Self {
        Self {
            base: Base::new("any", Comparison::Lexical),
            options,
            pass_through: None,
        }
    }

    #[must_use]
    pub fn options(&self) -> &[Validator] {
        &self.options
    }

    /// Report candidate `index`'s failure instead of the generic message.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::PassThroughOutOfBounds`] when `index` does not
    /// name a candidate.
    pub fn pass_through(mut self, index: usize) -> Result<Self, SchemaError> {
        if index >= self.options.len() {
            return Err(SchemaError::PassThroughOutOfBounds {
                index,
                len: self.options.len(),
            });
        }
        self.pass_through = Some(index);
        Ok(self)
    }

    pub(crate) fn validate_with(
        &self,
        value: &Value,
        all: &Value,
        siblings: &Value,
        recurse: bool,
    ) -> ValidationResult {
        if let Some(result) = self.base.delegate(value, all, siblings, recurse) {
            return self.base.finish(value, all, siblings, result);
        }
        let empty = value.is_empty_input();
        if empty && !self.base.is_required {
            return self
                .base
                .finish(value, all, siblings, ValidationResult::Valid(value.clone()));
        }
        if empty {
            let missing = ValidationResult::error(self.base.required_error());
            return self.base.finish(value, all, siblings, missing);
        }
        let checked = match self.base.run_steps(value, all, siblings) {
            Ok(checked) => checked,
            Err(error) => {
                return self
                    .base
                    .finish(value, all, siblings, ValidationResult::error(error));
            }
        };

        let mut reported = None;
        for (index, option) in self.options.iter().enumerate() {
            match option.validate_mode(&checked, all, siblings, recurse) {
                ValidationResult::Valid(output) => {
                    tracing::trace!(index, kind = ?option.kind(), "any-of candidate matched");
                    // Our own mutation replaces the candidate's output and
                    // sees the checked input.
                    return match &self.base.mutation {
                        Some(mutate) => ValidationResult::Valid(mutate(&checked, all, siblings)),
                        None => ValidationResult::Valid(output),
                    };
                }
                ValidationResult::Invalid(failure) if self.pass_through == Some(index) => {
                    reported = Some(failure);
                }
                ValidationResult::Invalid(_) => {}
            }
        }

        if let Some(hook) = &self.base.on_error {
            hook(value, all);
        }
        let failure = reported.unwrap_or_else(|| Failure::Message(self.no_match_error()));
        ValidationResult::Invalid(failure)
    }

    fn no_match_error(&self) -> ValidationError {
        let error = messages::ANY_OF.error();
        match &self.base.default_error_msg {
            Some(message) => error.with_message(message.clone()),
            None => error,
        }
    }
}

impl Validate for AnyOfValidator {
    fn validate(&self, value: &Value, all: &Value, siblings: &Value) -> ValidationResult {
        self.validate_with(value, all, siblings, true)
    }

    fn validate_shallow(&self, value: &Value, all: &Value, siblings: &Value) -> ValidationResult {
        self.validate_with(value, all, siblings, false)
    }

    fn default_value(&self) -> Value {
        match (&self.base.default_value, self.options.first()) {
            (Some(value), _) => value.clone(),
            (None, Some(first)) => first.default_value(),
            (None, None) => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{ValidatorBuilder, number, string};

    fn run(v: &AnyOfValidator, value: impl Into<Value>) -> ValidationResult {
        v.validate(&value.into(), &Value::Null, &Value::Null)
    }

    fn number_or_code() -> AnyOfValidator {
        AnyOfValidator::new(vec![
            number().into(),
            string().regex(r"^[A-Z]{3}$").unwrap().into(),
        ])
    }

    #[test]
    fn first_passing_candidate_wins() {
        let v = number_or_code();
        assert_eq!(run(&v, "1,5"), ValidationResult::Valid(Value::from(1.5)));
        assert_eq!(run(&v, "ABC"), ValidationResult::Valid(Value::from("ABC")));
    }

    #[test]
    fn generic_failure_without_pass_through() {
        let result = run(&number_or_code(), "abc");
        assert_eq!(result.message().unwrap().code, "any_of");
    }

    #[test]
    fn pass_through_reports_chosen_candidate() {
        let v = number_or_code().pass_through(1).unwrap();
        assert_eq!(run(&v, "abc").message().unwrap().code, "pattern");
        assert!(number_or_code().pass_through(2).is_err());
    }

    #[test]
    fn own_mutation_replaces_candidate_output() {
        let v = number_or_code().mutate(|value, _, _| Value::from(format!("[{value}]")));
        assert_eq!(run(&v, "1,5"), ValidationResult::Valid(Value::from("[1,5]")));
    }

    #[test]
    fn optional_empty_passes() {
        assert!(run(&number_or_code(), "").is_valid());
        assert!(run(&number_or_code().required(), "").is_invalid());
    }

    #[test]
    fn default_comes_from_first_candidate() {
        let v = AnyOfValidator::new(vec![number().with_default(7).into(), string().into()]);
        assert_eq!(v.default_value(), Value::from(7));
    }
}

//! Number validator with localized decimal parsing.
//!
//! Text input may use either `.` or `,` as the decimal separator; a string
//! that parses is replaced by the number it denotes so later steps and the
//! result see a real number. `decimal_places` goes the other way and turns
//! the number into fixed-point text.

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::{
    CheckStep, SchemaError, StepOutcome, Validate, ValidationError, ValidationResult,
};
use crate::messages::{self, MessageDef};
use crate::validators::ValidatorBuilder;
use crate::validators::base::{Base, Comparison};
use crate::value::Value;

static DECIMAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:\d+|\d*[.,]\d+)$").unwrap());
static WHOLE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+$").unwrap());

/// Parses `"1.5"`, `"1,5"`, `",5"` and `"-3"`.
#[must_use]
pub fn parse_localized(text: &str) -> Option<f64> {
    if !DECIMAL_REGEX.is_match(text) {
        return None;
    }
    text.replace(',', ".").parse().ok()
}

/// Numeric reading of a value for comparisons.
pub(crate) fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) if n.is_finite() => Some(*n),
        Value::String(text) => parse_localized(text),
        _ => None,
    }
}

/// Validates numeric input.
#[derive(Debug, Clone)]
pub struct NumberValidator {
    pub(crate) base: Base,
    integer: bool,
}

impl NumberValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Whole numbers only.
    #[must_use]
    pub fn integer() -> Self {
        Self::build(true)
    }

    fn build(integer: bool) -> Self {
        let mut base = Base::new("number", Comparison::Numeric);
        base.push_step(parse_step(integer));
        Self { base, integer }
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.integer
    }

    /// Inclusive lower bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, min: f64) -> Self {
        self.base.meta.min_num = Some(min);
        self.bound(messages::MIN, move |n| n >= min, min)
    }

    /// Inclusive upper bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, max: f64) -> Self {
        self.base.meta.max_num = Some(max);
        self.bound(messages::MAX, move |n| n <= max, max)
    }

    /// Inclusive range.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidRange`] when `min > max`.
    pub fn range(mut self, min: f64, max: f64) -> Result<Self, SchemaError> {
        if min > max {
            return Err(SchemaError::range(min, max));
        }
        self.base.meta.min_num = Some(min);
        self.base.meta.max_num = Some(max);
        Ok(self.custom(messages::RANGE.code, move |value, _, _| {
            numeric_step(value, |n| (min..=max).contains(&n), || {
                messages::RANGE
                    .error()
                    .with_param("min", min.to_string())
                    .with_param("max", max.to_string())
            })
        }))
    }

    /// Strictly greater than zero.
    #[must_use = "builder methods must be chained or built"]
    pub fn positive(self) -> Self {
        self.custom(messages::POSITIVE.code, |value, _, _| {
            numeric_step(value, |n| n > 0.0, || messages::POSITIVE.error())
        })
    }

    /// Strictly less than zero.
    #[must_use = "builder methods must be chained or built"]
    pub fn negative(self) -> Self {
        self.custom(messages::NEGATIVE.code, |value, _, _| {
            numeric_step(value, |n| n < 0.0, || messages::NEGATIVE.error())
        })
    }

    /// Formats the number to `places` fixed decimals. The output is text.
    ///
    /// Rounding works on the exact binary value and breaks exact ties to
    /// even: `2.5` at 0 places is `"2"`, `3.5` is `"4"`. Decimal literals such
    /// as `1.005` are not ties, since their binary value already sits below
    /// or above the midpoint.
    #[must_use = "builder methods must be chained or built"]
    pub fn decimal_places(mut self, places: usize) -> Self {
        self.base.meta.decimal_places = Some(places);
        self.custom("decimal_places", move |value, _, _| match to_number(value) {
            Some(n) => StepOutcome::Replace(Value::String(format!("{n:.places$}"))),
            None => StepOutcome::fail(messages::NOT_A_NUMBER.error()),
        })
    }

    fn bound(self, def: MessageDef, ok: impl Fn(f64) -> bool + Send + Sync + 'static, num: f64) -> Self {
        self.custom(def.code, move |value, _, _| {
            numeric_step(value, &ok, || def.error().with_param("num", num.to_string()))
        })
    }
}

impl Default for NumberValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for NumberValidator {
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

/// First step of every number validator: coerce to a number or fail.
fn parse_step(integer: bool) -> CheckStep {
    let failure = if integer {
        messages::NOT_WHOLE_NUMBER
    } else {
        messages::NOT_A_NUMBER
    };
    CheckStep::new("number", move |value, _, _| {
        let parsed = match value {
            Value::Number(n) => Some(*n),
            Value::String(text) if integer && !WHOLE_REGEX.is_match(text) => None,
            Value::String(text) => parse_localized(text),
            _ => None,
        };
        match parsed {
            Some(n) if n.is_finite() && !(integer && n.fract() != 0.0) => {
                StepOutcome::Replace(Value::Number(n))
            }
            _ => StepOutcome::fail(failure.error()),
        }
    })
}

fn numeric_step(
    value: &Value,
    ok: impl Fn(f64) -> bool,
    error: impl FnOnce() -> ValidationError,
) -> StepOutcome {
    match to_number(value) {
        Some(n) => StepOutcome::check(ok(n), error),
        None => StepOutcome::fail(messages::NOT_A_NUMBER.error()),
    }
}

//! Date validators.
//!
//! [`DateTimeValidator`] parses `YYYY-MM-DDTHH:MM[:SS][.mmm][Z]` into a UTC
//! instant and compares instants. [`DateOnlyValidator`] keeps the
//! `YYYY-MM-DD` text as-is and compares it lexically, which is calendar
//! order for that format.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use regex::Regex;

use crate::foundation::{CheckStep, SchemaError, StepOutcome, Validate, ValidationResult};
use crate::messages::{self, MessageDef};
use crate::validators::ValidatorBuilder;
use crate::validators::base::{Base, Comparison};
use crate::value::Value;

const DATETIME_FORMAT: &str = "YYYY-MM-DDTHH:MM[:SS][.mmm][Z]";
const DATE_ONLY_FORMAT: &str = "YYYY-MM-DD";

static DATETIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2})(?::(\d{2}))?(?:\.(\d{3}))?Z?$").unwrap()
});
static DATE_ONLY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

// ============================================================================
// PARSING
// ============================================================================

/// Parses the datetime input format as UTC. Out-of-range fields (month 13,
/// February 30th) are rejected.
#[must_use]
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let caps = DATETIME_REGEX.captures(text)?;
    let field = |i: usize| caps.get(i).map_or(Some(0), |m| m.as_str().parse::<u32>().ok());
    let year = caps[1].parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?;
    let time = NaiveTime::from_hms_milli_opt(field(4)?, field(5)?, field(6)?, field(7)?)?;
    Some(date.and_time(time).and_utc())
}

/// Parses a `YYYY-MM-DD` calendar date.
#[must_use]
pub fn parse_date_only(text: &str) -> Option<NaiveDate> {
    if !DATE_ONLY_REGEX.is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

pub(crate) fn to_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Date(date) => Some(*date),
        Value::String(text) => parse_datetime(text),
        _ => None,
    }
}

fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ============================================================================
// DATETIME
// ============================================================================

/// Validates a date with time of day.
#[derive(Debug, Clone)]
pub struct DateTimeValidator {
    pub(crate) base: Base,
}

impl DateTimeValidator {
    #[must_use]
    pub fn new() -> Self {
        let mut base = Base::new("datetime-local", Comparison::Date);
        base.push_step(CheckStep::new("date", |value, _, _| match value {
            Value::Date(_) => StepOutcome::Pass,
            Value::String(text) => match parse_datetime(text) {
                Some(instant) => StepOutcome::Replace(Value::Date(instant)),
                None => StepOutcome::fail(messages::INVALID_DATE.error()),
            },
            _ => StepOutcome::fail(messages::INVALID_DATE.error()),
        }));
        Self { base }
    }

    /// Inclusive lower bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn min_date(mut self, min: DateTime<Utc>) -> Self {
        self.base.meta.min_date = Some(format_instant(&min));
        self.bound(messages::MIN_DATE, min, |instant, min| instant >= min)
    }

    /// Inclusive upper bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_date(mut self, max: DateTime<Utc>) -> Self {
        self.base.meta.max_date = Some(format_instant(&max));
        self.bound(messages::MAX_DATE, max, |instant, max| instant <= max)
    }

    /// Inclusive range.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidRange`] when `min` is after `max`.
    pub fn date_range(mut self, min: DateTime<Utc>, max: DateTime<Utc>) -> Result<Self, SchemaError> {
        if min > max {
            return Err(SchemaError::range(format_instant(&min), format_instant(&max)));
        }
        let (min_text, max_text) = (format_instant(&min), format_instant(&max));
        self.base.meta.min_date = Some(min_text.clone());
        self.base.meta.max_date = Some(max_text.clone());
        Ok(self.custom(messages::DATE_RANGE.code, move |value, _, _| {
            match to_datetime(value) {
                Some(instant) => StepOutcome::check((min..=max).contains(&instant), || {
                    messages::DATE_RANGE
                        .error()
                        .with_param("min", min_text.clone())
                        .with_param("max", max_text.clone())
                }),
                None => StepOutcome::fail(messages::INVALID_DATE.error()),
            }
        }))
    }

    /// [`min_date`](Self::min_date) from the input format.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDate`] when `min` does not parse.
    pub fn min_date_str(self, min: &str) -> Result<Self, SchemaError> {
        Ok(self.min_date(schema_datetime(min)?))
    }

    /// [`max_date`](Self::max_date) from the input format.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDate`] when `max` does not parse.
    pub fn max_date_str(self, max: &str) -> Result<Self, SchemaError> {
        Ok(self.max_date(schema_datetime(max)?))
    }

    fn bound(
        self,
        def: MessageDef,
        limit: DateTime<Utc>,
        ok: fn(DateTime<Utc>, DateTime<Utc>) -> bool,
    ) -> Self {
        let shown = format_instant(&limit);
        self.custom(def.code, move |value, _, _| match to_datetime(value) {
            Some(instant) => StepOutcome::check(ok(instant, limit), || {
                def.error().with_param("date", shown.clone())
            }),
            None => StepOutcome::fail(messages::INVALID_DATE.error()),
        })
    }
}

impl Default for DateTimeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for DateTimeValidator {
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

fn schema_datetime(literal: &str) -> Result<DateTime<Utc>, SchemaError> {
    parse_datetime(literal).ok_or_else(|| SchemaError::InvalidDate {
        literal: literal.to_owned(),
        expected: DATETIME_FORMAT,
    })
}

// ============================================================================
// DATE ONLY
// ============================================================================

/// Validates a calendar date and keeps it as `YYYY-MM-DD` text.
#[derive(Debug, Clone)]
pub struct DateOnlyValidator {
    pub(crate) base: Base,
}

impl DateOnlyValidator {
    #[must_use]
    pub fn new() -> Self {
        let mut base = Base::new("date", Comparison::DateOnly);
        base.push_step(CheckStep::new("date", |value, _, _| match value {
            Value::String(text) if parse_date_only(text).is_some() => StepOutcome::Pass,
            Value::Date(instant) => {
                StepOutcome::Replace(Value::from(instant.format("%Y-%m-%d").to_string()))
            }
            _ => StepOutcome::fail(messages::INVALID_DATE.error()),
        }));
        Self { base }
    }

    /// Inclusive lower bound.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDate`] when `min` is not `YYYY-MM-DD`.
    pub fn min_date(mut self, min: &str) -> Result<Self, SchemaError> {
        let min = schema_date(min)?;
        self.base.meta.min_date = Some(min.clone());
        Ok(self.bound(messages::MIN_DATE, min, |text, min| text >= min))
    }

    /// Inclusive upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDate`] when `max` is not `YYYY-MM-DD`.
    pub fn max_date(mut self, max: &str) -> Result<Self, SchemaError> {
        let max = schema_date(max)?;
        self.base.meta.max_date = Some(max.clone());
        Ok(self.bound(messages::MAX_DATE, max, |text, max| text <= max))
    }

    /// Inclusive range.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDate`] for a malformed bound and
    /// [`SchemaError::InvalidRange`] when `min` is after `max`.
    pub fn date_range(mut self, min: &str, max: &str) -> Result<Self, SchemaError> {
        let (min, max) = (schema_date(min)?, schema_date(max)?);
        if min > max {
            return Err(SchemaError::range(min, max));
        }
        self.base.meta.min_date = Some(min.clone());
        self.base.meta.max_date = Some(max.clone());
        Ok(self.custom(messages::DATE_RANGE.code, move |value, _, _| {
            match value.as_str() {
                Some(text) => StepOutcome::check(text >= min.as_str() && text <= max.as_str(), || {
                    messages::DATE_RANGE
                        .error()
                        .with_param("min", min.clone())
                        .with_param("max", max.clone())
                }),
                None => StepOutcome::fail(messages::INVALID_DATE.error()),
            }
        }))
    }

    fn bound(self, def: MessageDef, limit: String, ok: fn(&str, &str) -> bool) -> Self {
        self.custom(def.code, move |value, _, _| match value.as_str() {
            Some(text) => StepOutcome::check(ok(text, &limit), || {
                def.error().with_param("date", limit.clone())
            }),
            None => StepOutcome::fail(messages::INVALID_DATE.error()),
        })
    }
}

impl Default for DateOnlyValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for DateOnlyValidator {
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

fn schema_date(literal: &str) -> Result<String, SchemaError> {
    parse_date_only(literal)
        .map(|_| literal.to_owned())
        .ok_or_else(|| SchemaError::InvalidDate {
            literal: literal.to_owned(),
            expected: DATE_ONLY_FORMAT,
        })
}

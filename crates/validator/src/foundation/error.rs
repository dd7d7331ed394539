//! Error types
//!
//! Three kinds of failure exist and they never mix:
//!
//! - [`ValidationError`]: a leaf failure message carried inside a
//!   [`ValidationResult`](crate::foundation::ValidationResult). Value
//!   validation never raises; every failure is data.
//! - [`SchemaError`]: a builder method received a malformed argument while
//!   the schema was being declared (bad regex, bad date literal, inverted
//!   range).
//! - [`PathError`]: a key path could not be resolved against a value tree
//!   or a validator tree.
//!
//! All string fields of [`ValidationError`] use `Cow<'static, str>` so the
//! built-in messages never allocate.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

/// Ordered message parameters (typically 0-3 entries).
pub type Params = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 3]>;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A leaf validation failure.
///
/// `code` is the stable message name used for translation; `message` is the
/// fallback template in the default locale. Templates may contain
/// `{{placeholder}}` markers that [`render`](Self::render) fills from
/// `params`.
///
/// # Examples
///
/// ```
/// use nebula_form_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("min_length", "Must be at least {{min}} characters")
///     .with_param("min", "5");
/// assert_eq!(error.render(), "Must be at least 5 characters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable message name, e.g. `required`, `min_length`.
    pub code: Cow<'static, str>,

    /// Message template in the default locale.
    pub message: Cow<'static, str>,

    /// Values substituted into `{{placeholder}}` markers.
    pub params: Params,
}

impl ValidationError {
    /// Creates a new validation error with a code and message template.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: Params::new(),
        }
    }

    /// Adds a template parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replaces the message template, keeping code and params.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Produces the display text: translated or catalog template when one is
    /// registered for `code`, otherwise `message`, with params substituted.
    #[must_use]
    pub fn render(&self) -> String {
        crate::messages::render(self)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// A validator builder received an argument it cannot work with.
///
/// These are mistakes in the schema definition, raised before any data is
/// validated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The pattern is not a valid regular expression.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A date literal does not match the format the validator expects.
    #[error("invalid date literal `{literal}`: expected {expected}")]
    InvalidDate {
        literal: String,
        expected: &'static str,
    },

    /// A lower bound is greater than its upper bound.
    #[error("invalid range: min `{min}` is greater than max `{max}`")]
    InvalidRange { min: String, max: String },

    /// A pass-through index points past the end of the option list.
    #[error("pass-through index {index} is out of bounds for {len} options")]
    PassThroughOutOfBounds { index: usize, len: usize },
}

impl SchemaError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPattern { .. } => "SCHEMA_INVALID_PATTERN",
            Self::InvalidDate { .. } => "SCHEMA_INVALID_DATE",
            Self::InvalidRange { .. } => "SCHEMA_INVALID_RANGE",
            Self::PassThroughOutOfBounds { .. } => "SCHEMA_PASS_THROUGH_BOUNDS",
        }
    }

    pub(crate) fn range(min: impl fmt::Display, max: impl fmt::Display) -> Self {
        Self::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub(crate) fn pattern(pattern: &str, error: &regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: error.to_string(),
        }
    }
}

// ============================================================================
// PATH ERROR
// ============================================================================

/// A dotted key path could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// A segment is absent from the value tree.
    #[error("key `{segment}` not found while resolving `{path}`")]
    KeyNotFound { path: String, segment: String },

    /// A segment has no corresponding field in the validator tree.
    #[error("no validator for `{segment}` while resolving `{path}`")]
    ValidatorNotFound { path: String, segment: String },

    /// A segment tried to descend into a scalar.
    #[error("`{segment}` is not a container while resolving `{path}`")]
    NotAContainer { path: String, segment: String },

    /// A write addressed an array index more than one past the end.
    #[error("index `{segment}` is out of range for length {len} while resolving `{path}`")]
    IndexOutOfRange {
        path: String,
        segment: String,
        len: usize,
    },
}

impl PathError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::KeyNotFound { .. } => "PATH_KEY_NOT_FOUND",
            Self::ValidatorNotFound { .. } => "PATH_VALIDATOR_NOT_FOUND",
            Self::NotAContainer { .. } => "PATH_NOT_A_CONTAINER",
            Self::IndexOutOfRange { .. } => "PATH_INDEX_OUT_OF_RANGE",
        }
    }

    /// The full path that failed to resolve.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::KeyNotFound { path, .. }
            | Self::ValidatorNotFound { path, .. }
            | Self::NotAContainer { path, .. }
            | Self::IndexOutOfRange { path, .. } => path,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

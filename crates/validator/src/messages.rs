//! Message names, default templates and the process-wide message catalog.
//!
//! Every failure carries a stable message name (`code`) plus parameters;
//! the English template is only the fallback locale. A host application can
//! register replacement templates per code, or install a translator that
//! receives the whole [`ValidationError`] and returns localized text.
//!
//! Lookup order in [`render`]: translator, then a registered template (only
//! when the error still carries its built-in template, so per-validator
//! overrides win), then the error's own template. Parameters are substituted
//! by literal `{{name}}` replacement.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::foundation::ValidationError;

// ============================================================================
// MESSAGE DEFINITIONS
// ============================================================================

/// A stable message name with its default-locale template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageDef {
    pub code: &'static str,
    pub template: &'static str,
}

impl MessageDef {
    const fn new(code: &'static str, template: &'static str) -> Self {
        Self { code, template }
    }

    /// Creates a validation error carrying this definition.
    #[must_use]
    pub fn error(self) -> ValidationError {
        ValidationError::new(self.code, self.template)
    }
}

pub const REQUIRED: MessageDef = MessageDef::new("required", "This field is required");
pub const INVALID: MessageDef = MessageDef::new("invalid", "Invalid value");
pub const ALWAYS_FALSE: MessageDef = MessageDef::new("always_false", "Invalid value");

pub const NOT_A_NUMBER: MessageDef = MessageDef::new("not_a_number", "Must be a number");
pub const NOT_WHOLE_NUMBER: MessageDef =
    MessageDef::new("not_whole_number", "Must be a whole number");
pub const MIN: MessageDef = MessageDef::new("min", "Must be at least {{num}}");
pub const MAX: MessageDef = MessageDef::new("max", "Must be at most {{num}}");
pub const RANGE: MessageDef = MessageDef::new("range", "Must be between {{min}} and {{max}}");
pub const POSITIVE: MessageDef = MessageDef::new("positive", "Must be greater than 0");
pub const NEGATIVE: MessageDef = MessageDef::new("negative", "Must be less than 0");

pub const MIN_LENGTH: MessageDef =
    MessageDef::new("min_length", "Must be at least {{num}} characters");
pub const MAX_LENGTH: MessageDef =
    MessageDef::new("max_length", "Must be at most {{num}} characters");
pub const EXACT_LENGTH: MessageDef =
    MessageDef::new("exact_length", "Must be exactly {{num}} characters");
pub const LENGTH_RANGE: MessageDef = MessageDef::new(
    "length_range",
    "Must be between {{min}} and {{max}} characters",
);
pub const PATTERN: MessageDef = MessageDef::new("pattern", "Invalid format");
pub const EMAIL: MessageDef = MessageDef::new("email", "Must be a valid email address");

pub const ONE_OF: MessageDef = MessageDef::new("one_of", "Must be one of {{values}}");
pub const GREATER_THAN: MessageDef = MessageDef::new("greater_than", "Must be greater than {{field}}");
pub const LESS_THAN: MessageDef = MessageDef::new("less_than", "Must be less than {{field}}");
pub const GREATER_OR_EQUAL: MessageDef = MessageDef::new(
    "greater_or_equal",
    "Must be greater than or equal to {{field}}",
);
pub const LESS_OR_EQUAL: MessageDef =
    MessageDef::new("less_or_equal", "Must be less than or equal to {{field}}");

pub const NOT_BOOLEAN: MessageDef = MessageDef::new("not_boolean", "Must be true or false");

pub const INVALID_DATE: MessageDef = MessageDef::new("invalid_date", "Must be a valid date");
pub const MIN_DATE: MessageDef = MessageDef::new("min_date", "Must be on or after {{date}}");
pub const MAX_DATE: MessageDef = MessageDef::new("max_date", "Must be on or before {{date}}");
pub const DATE_RANGE: MessageDef =
    MessageDef::new("date_range", "Must be between {{min}} and {{max}}");

pub const NOT_AN_ARRAY: MessageDef = MessageDef::new("not_an_array", "Must be an array");
pub const NOT_AN_OBJECT: MessageDef = MessageDef::new("not_an_object", "Must be an object");
pub const MIN_ITEMS: MessageDef = MessageDef::new("min_items", "Must have at least {{num}} items");
pub const MAX_ITEMS: MessageDef = MessageDef::new("max_items", "Must have at most {{num}} items");
pub const ITEMS_RANGE: MessageDef =
    MessageDef::new("items_range", "Must have between {{min}} and {{max}} items");

pub const ANY_OF: MessageDef =
    MessageDef::new("any_of", "Does not match any of the allowed formats");

/// Every built-in definition, for catalog seeding and lookups.
pub const BUILTIN: &[MessageDef] = &[
    REQUIRED,
    INVALID,
    ALWAYS_FALSE,
    NOT_A_NUMBER,
    NOT_WHOLE_NUMBER,
    MIN,
    MAX,
    RANGE,
    POSITIVE,
    NEGATIVE,
    MIN_LENGTH,
    MAX_LENGTH,
    EXACT_LENGTH,
    LENGTH_RANGE,
    PATTERN,
    EMAIL,
    ONE_OF,
    GREATER_THAN,
    LESS_THAN,
    GREATER_OR_EQUAL,
    LESS_OR_EQUAL,
    NOT_BOOLEAN,
    INVALID_DATE,
    MIN_DATE,
    MAX_DATE,
    DATE_RANGE,
    NOT_AN_ARRAY,
    NOT_AN_OBJECT,
    MIN_ITEMS,
    MAX_ITEMS,
    ITEMS_RANGE,
    ANY_OF,
];

/// Built-in template for a message name.
#[must_use]
pub fn builtin_template(code: &str) -> Option<&'static str> {
    BUILTIN
        .iter()
        .find(|def| def.code == code)
        .map(|def| def.template)
}

// ============================================================================
// CATALOG
// ============================================================================

/// Translation hook: returns localized text, or `None` to fall through.
pub type Translator = Arc<dyn Fn(&ValidationError) -> Option<String> + Send + Sync>;

#[derive(Default)]
struct Catalog {
    templates: HashMap<String, String>,
    translator: Option<Translator>,
}

static CATALOG: LazyLock<RwLock<Catalog>> = LazyLock::new(|| RwLock::new(Catalog::default()));

/// Registers a replacement template for a message name.
pub fn register_message(code: impl Into<String>, template: impl Into<String>) {
    let code = code.into();
    tracing::debug!(code = %code, "registering message template");
    CATALOG.write().templates.insert(code, template.into());
}

/// Registers several replacement templates at once.
pub fn register_messages<I, K, V>(entries: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut catalog = CATALOG.write();
    for (code, template) in entries {
        catalog.templates.insert(code.into(), template.into());
    }
    tracing::debug!(count = catalog.templates.len(), "message catalog updated");
}

/// Installs a translator consulted before any template.
pub fn set_translator<F>(translator: F)
where
    F: Fn(&ValidationError) -> Option<String> + Send + Sync + 'static,
{
    tracing::debug!("installing message translator");
    CATALOG.write().translator = Some(Arc::new(translator));
}

/// Removes all registered templates and the translator.
pub fn clear_catalog() {
    let mut catalog = CATALOG.write();
    catalog.templates.clear();
    catalog.translator = None;
}

/// Renders an error to display text.
///
/// The catalog lock is released before the translator runs, so a translator
/// may itself register templates or render other errors.
#[must_use]
pub fn render(error: &ValidationError) -> String {
    let uses_builtin = builtin_template(&error.code) == Some(error.message.as_ref());
    let (translator, registered) = {
        let catalog = CATALOG.read();
        let registered = uses_builtin
            .then(|| catalog.templates.get(error.code.as_ref()).cloned())
            .flatten();
        (catalog.translator.clone(), registered)
    };

    if let Some(translator) = translator
        && let Some(text) = translator(error)
    {
        return text;
    }

    substitute(registered.as_deref().unwrap_or(&error.message), error)
}

/// Literal `{{name}}` replacement.
#[must_use]
pub fn substitute(template: &str, error: &ValidationError) -> String {
    let mut out = template.to_owned();
    for (key, value) in &error.params {
        let marker = format!("{{{{{key}}}}}");
        if out.contains(&marker) {
            out = out.replace(&marker, value);
        }
    }
    out
}

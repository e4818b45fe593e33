//! Field rules and their validators.
//!
//! Responsibilities:
//! - Describe one schema field: its kind, constraints and optionality.
//! - Validate a raw value against that description, producing a typed value.
//!
//! Does NOT handle:
//! - Iterating a whole schema or applying strict/lenient policy (see `engine`).
//!
//! Invariants:
//! - A value is non-existing when absent or the empty string; list and object
//!   literals always exist.
//! - Non-existing values never reach kind-specific checks.
//! - Validation is pure: no I/O, no logging, no shared state.

use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::constants::{LIST_SEPARATOR, type_names};
use crate::parser::{RawKind, RawValue};
use crate::value::{EnvValue, format_number};

use super::formats::{NUMBER, StringFormat};
use super::issue::{Validation, ValidationIssue};

/// Caller-supplied transform for `custom` rules.
pub type CustomFn = Arc<dyn Fn(&str) -> EnvValue + Send + Sync>;

/// Constraints for `string` rules.
#[derive(Debug, Clone, Default)]
pub struct StringOptions {
    pub format: Option<StringFormat>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

/// Constraints for `number` rules. Bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberOptions {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub positive: bool,
}

/// What a field holds, with kind-specific constraints.
#[derive(Clone)]
pub enum RuleKind {
    String(StringOptions),
    Number(NumberOptions),
    Boolean,
    Enum(Vec<String>),
    Array,
    Custom(CustomFn),
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::String(options) => f.debug_tuple("String").field(options).finish(),
            RuleKind::Number(options) => f.debug_tuple("Number").field(options).finish(),
            RuleKind::Boolean => f.write_str("Boolean"),
            RuleKind::Enum(values) => f.debug_tuple("Enum").field(values).finish(),
            RuleKind::Array => f.write_str("Array"),
            RuleKind::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One schema field. Immutable once built; required unless `optional()`.
#[derive(Debug, Clone)]
pub struct FieldRule {
    kind: RuleKind,
    optional: bool,
}

impl FieldRule {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            optional: false,
        }
    }

    /// Marks the field optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Validates a raw value.
    pub fn validate(&self, raw: Option<&RawValue>) -> Validation {
        let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
            return if self.optional {
                Ok(None)
            } else {
                Err(ValidationIssue::RequiredAndMissing)
            };
        };

        let text = raw.text();
        let value = match &self.kind {
            RuleKind::String(options) => validate_string(text, options)?,
            RuleKind::Number(options) => validate_number(text, options)?,
            RuleKind::Boolean => validate_boolean(text)?,
            RuleKind::Enum(values) => validate_enum(text, values)?,
            RuleKind::Array => match raw.kind() {
                RawKind::List(items) => EnvValue::Array(items.clone()),
                _ => EnvValue::Array(
                    text.split(LIST_SEPARATOR)
                        .map(|item| item.trim().to_string())
                        .collect(),
                ),
            },
            RuleKind::Custom(transform) => transform(text),
        };
        Ok(Some(value))
    }

    /// Validates free-standing text as if it were an unquoted value.
    pub fn validate_str(&self, raw: Option<&str>) -> Validation {
        let raw = raw.map(RawValue::plain);
        self.validate(raw.as_ref())
    }
}

fn validate_string(text: &str, options: &StringOptions) -> Result<EnvValue, ValidationIssue> {
    let format_ok = options
        .format
        .as_ref()
        .is_none_or(|format| format.matches(text));

    let length = text.chars().count();
    let min_ok = options.min_length.is_none_or(|min| length >= min);
    let max_ok = options.max_length.is_none_or(|max| length <= max);

    if format_ok && min_ok && max_ok {
        Ok(EnvValue::String(text.to_string()))
    } else {
        Err(ValidationIssue::wrong_type(
            type_names::STRING,
            string_expectation(options),
            text,
        ))
    }
}

fn string_expectation(options: &StringOptions) -> String {
    let base = options
        .format
        .as_ref()
        .map_or_else(|| type_names::STRING.to_string(), ToString::to_string);

    let mut constraints = Vec::new();
    if let Some(min) = options.min_length {
        constraints.push(format!("minLength: {min}"));
    }
    if let Some(max) = options.max_length {
        constraints.push(format!("maxLength: {max}"));
    }

    if constraints.is_empty() {
        base
    } else {
        format!("{base} ({})", constraints.join(", "))
    }
}

fn validate_number(text: &str, options: &NumberOptions) -> Result<EnvValue, ValidationIssue> {
    if !NUMBER.is_match(text) {
        return Err(ValidationIssue::wrong_type(
            type_names::STRING,
            type_names::NUMBER,
            text,
        ));
    }

    let value = parse_number(text);
    let n = value.as_f64().unwrap_or(f64::NAN);

    let min_ok = options.min.is_none_or(|min| n >= min);
    let max_ok = options.max.is_none_or(|max| n <= max);
    let positive_ok = !options.positive || n > 0.0;

    if min_ok && max_ok && positive_ok {
        Ok(value)
    } else {
        Err(ValidationIssue::wrong_type(
            type_names::NUMBER,
            number_expectation(options),
            value.to_string(),
        ))
    }
}

/// Parses text already matched by `NUMBER`. Decimals become floats; integers
/// that overflow `i64` fall back to floats.
fn parse_number(text: &str) -> EnvValue {
    if !text.contains('.') {
        if let Ok(n) = text.parse::<i64>() {
            return EnvValue::Integer(n);
        }
    }
    EnvValue::Float(text.parse::<f64>().unwrap_or(f64::NAN))
}

fn number_expectation(options: &NumberOptions) -> String {
    let mut constraints = Vec::new();
    if let Some(min) = options.min {
        constraints.push(format!("min: {}", format_number(min)));
    }
    if let Some(max) = options.max {
        constraints.push(format!("max: {}", format_number(max)));
    }
    if options.positive {
        constraints.push("positive".to_string());
    }

    if constraints.is_empty() {
        type_names::NUMBER.to_string()
    } else {
        format!("{} ({})", type_names::NUMBER, constraints.join(", "))
    }
}

fn validate_boolean(text: &str) -> Result<EnvValue, ValidationIssue> {
    if text.eq_ignore_ascii_case("true") {
        Ok(EnvValue::Boolean(true))
    } else if text.eq_ignore_ascii_case("false") {
        Ok(EnvValue::Boolean(false))
    } else {
        Err(ValidationIssue::wrong_type(
            type_names::STRING,
            type_names::BOOLEAN,
            text,
        ))
    }
}

fn validate_enum(text: &str, values: &[String]) -> Result<EnvValue, ValidationIssue> {
    if values.iter().any(|allowed| allowed == text) {
        Ok(EnvValue::String(text.to_string()))
    } else {
        Err(ValidationIssue::wrong_type(
            type_names::STRING,
            values.join(", "),
            text,
        ))
    }
}

/// Builder for `string` rules.
#[derive(Debug, Clone, Default)]
pub struct StringRule {
    options: StringOptions,
    optional: bool,
}

impl StringRule {
    pub fn format(mut self, format: StringFormat) -> Self {
        self.options.format = Some(format);
        self
    }

    /// Shorthand for `format(StringFormat::Regex(regex))`.
    pub fn pattern(self, regex: Regex) -> Self {
        self.format(StringFormat::Regex(regex))
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.options.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.options.max_length = Some(max);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl From<StringRule> for FieldRule {
    fn from(rule: StringRule) -> Self {
        FieldRule {
            kind: RuleKind::String(rule.options),
            optional: rule.optional,
        }
    }
}

/// Builder for `number` rules.
#[derive(Debug, Clone, Default)]
pub struct NumberRule {
    options: NumberOptions,
    optional: bool,
}

impl NumberRule {
    pub fn min(mut self, min: f64) -> Self {
        self.options.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.options.max = Some(max);
        self
    }

    /// Requires a value strictly greater than zero.
    pub fn positive(mut self) -> Self {
        self.options.positive = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl From<NumberRule> for FieldRule {
    fn from(rule: NumberRule) -> Self {
        FieldRule {
            kind: RuleKind::Number(rule.options),
            optional: rule.optional,
        }
    }
}

//! Typed values and schema-less coercion.
//!
//! Responsibilities:
//! - Define `EnvValue`, the tagged union every stored value is held as.
//! - Infer a richer shape from surface syntax alone: `true`/`false`,
//!   `[...]` lists, `{...}` objects, otherwise strings.
//! - Convert stored values into caller types (`FromEnvValue`).
//!
//! Does NOT handle:
//! - Numbers. Numeric conversion only happens through a `number` rule.
//! - Anything schema-driven (see `schema`).
//!
//! Invariants:
//! - Quoted values are never reinterpreted; they stay strings verbatim.
//! - A `{...}` text that is not valid JSON stays a string.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::constants::type_names;
use crate::parser::literal::{bracket_body, is_brace_literal, parse_object, split_list};
use crate::parser::{RawKind, RawValue};

/// A stored configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EnvValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Array(Vec<String>),
    Object(Map<String, Value>),
}

impl EnvValue {
    /// Name of the value's type, as reported in `wrong_type` failures.
    pub fn type_name(&self) -> &'static str {
        match self {
            EnvValue::String(_) => type_names::STRING,
            EnvValue::Integer(_) | EnvValue::Float(_) => type_names::NUMBER,
            EnvValue::Boolean(_) => type_names::BOOLEAN,
            EnvValue::Array(_) => type_names::ARRAY,
            EnvValue::Object(_) => type_names::OBJECT,
        }
    }

    /// True for the empty string, which accessors treat as absent.
    pub fn is_empty_string(&self) -> bool {
        matches!(self, EnvValue::String(s) if s.is_empty())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnvValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EnvValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            EnvValue::Integer(n) => Some(*n),
            // 2^63 is exactly representable; anything at or above it would saturate.
            EnvValue::Float(f)
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 =>
            {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            EnvValue::Integer(n) => Some(*n as f64),
            EnvValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            EnvValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            EnvValue::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::String(s) => f.write_str(s),
            EnvValue::Integer(n) => write!(f, "{n}"),
            EnvValue::Float(n) => f.write_str(&format_number(*n)),
            EnvValue::Boolean(b) => write!(f, "{b}"),
            EnvValue::Array(items) => f.write_str(&items.join(",")),
            EnvValue::Object(map) => write!(f, "{}", Value::Object(map.clone())),
        }
    }
}

/// Formats a float without a trailing `.0` for whole numbers.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl From<String> for EnvValue {
    fn from(value: String) -> Self {
        EnvValue::String(value)
    }
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        EnvValue::String(value.to_string())
    }
}

impl From<i64> for EnvValue {
    fn from(value: i64) -> Self {
        EnvValue::Integer(value)
    }
}

impl From<i32> for EnvValue {
    fn from(value: i32) -> Self {
        EnvValue::Integer(value.into())
    }
}

impl From<f64> for EnvValue {
    fn from(value: f64) -> Self {
        EnvValue::Float(value)
    }
}

impl From<bool> for EnvValue {
    fn from(value: bool) -> Self {
        EnvValue::Boolean(value)
    }
}

impl From<Vec<String>> for EnvValue {
    fn from(value: Vec<String>) -> Self {
        EnvValue::Array(value)
    }
}

impl From<Vec<&str>> for EnvValue {
    fn from(value: Vec<&str>) -> Self {
        EnvValue::Array(value.into_iter().map(String::from).collect())
    }
}

impl From<Map<String, Value>> for EnvValue {
    fn from(value: Map<String, Value>) -> Self {
        EnvValue::Object(value)
    }
}

/// Conversion from a stored value into a caller type.
pub trait FromEnvValue: Sized {
    fn from_env_value(value: &EnvValue) -> Option<Self>;
}

impl FromEnvValue for EnvValue {
    fn from_env_value(value: &EnvValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromEnvValue for String {
    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_str().map(String::from)
    }
}

impl FromEnvValue for bool {
    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromEnvValue for i64 {
    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_i64()
    }
}

impl FromEnvValue for f64 {
    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_f64()
    }
}

impl FromEnvValue for Vec<String> {
    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_array().map(<[String]>::to_vec)
    }
}

impl FromEnvValue for Map<String, Value> {
    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_object().cloned()
    }
}

/// Infers a raw value's shape from free-standing text, e.g. a process
/// environment variable. Unlike the file parser, a malformed `{...}` stays
/// plain text.
pub fn infer(text: &str) -> RawValue {
    let trimmed = text.trim();

    if let Some(body) = bracket_body(trimmed) {
        return RawValue::new(trimmed, RawKind::List(split_list(body)));
    }

    if is_brace_literal(trimmed) {
        match parse_object(trimmed) {
            Ok(object) => return RawValue::new(trimmed, RawKind::Object(object)),
            Err(e) => tracing::warn!(error = %e, "Failed to parse JSON value, keeping it as text"),
        }
    }

    RawValue::plain(trimmed)
}

/// Coerces a raw value into its schema-less typed shape.
pub fn coerce(raw: &RawValue) -> EnvValue {
    match raw.kind() {
        RawKind::Quoted(_) => EnvValue::String(raw.text().to_string()),
        RawKind::List(items) => EnvValue::Array(items.clone()),
        RawKind::Object(map) => EnvValue::Object(map.clone()),
        RawKind::Plain => match raw.text() {
            "true" => EnvValue::Boolean(true),
            "false" => EnvValue::Boolean(false),
            text => EnvValue::String(text.to_string()),
        },
    }
}

/// Shorthand for `coerce(&infer(text))`.
pub fn coerce_str(text: &str) -> EnvValue {
    coerce(&infer(text))
}

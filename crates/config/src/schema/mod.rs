//! Schema definitions and the rule engine.
//!
//! Responsibilities:
//! - Provide the `Schema` factory handed to schema builder callbacks.
//! - Hold an ordered `SchemaDefinition` of field rules.
//! - Validate a raw map against a definition through a `SchemaEngine`.
//! - Load definitions from declarative JSON/YAML schema files.
//!
//! Does NOT handle:
//! - File discovery, merging, or strict/lenient policy (see `manager`).
//!
//! Invariants:
//! - Field order is insertion order; re-adding a key replaces its rule in place.
//! - Keys in the raw map that the schema does not name are never validated.

mod engine;
mod file;
mod formats;
mod issue;
mod rule;

use regex::Regex;
use std::sync::Arc;

use crate::value::EnvValue;

pub use engine::{CompiledSchema, RuleEngine, SchemaEngine, ValidationReport};
pub use file::{FieldSpec, FieldSpecKind, SchemaSpec};
pub use formats::StringFormat;
pub use issue::{FieldFailure, Validation, ValidationIssue};
pub use rule::{
    CustomFn, FieldRule, NumberOptions, NumberRule, RuleKind, StringOptions, StringRule,
};

/// Factory for field rules, passed to schema builder callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Schema;

impl Schema {
    pub fn string(&self) -> StringRule {
        StringRule::default()
    }

    pub fn number(&self) -> NumberRule {
        NumberRule::default()
    }

    pub fn boolean(&self) -> FieldRule {
        FieldRule::new(RuleKind::Boolean)
    }

    /// A string restricted to `values`, compared exactly.
    pub fn enumeration<I, S>(&self, values: I) -> FieldRule
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldRule::new(RuleKind::Enum(values.into_iter().map(Into::into).collect()))
    }

    /// A comma-separated list, or a `[...]` literal.
    pub fn array(&self) -> FieldRule {
        FieldRule::new(RuleKind::Array)
    }

    /// A caller-defined transform applied to existing values. Never fails.
    pub fn custom<F, T>(&self, transform: F) -> FieldRule
    where
        F: Fn(&str) -> T + Send + Sync + 'static,
        T: Into<EnvValue>,
    {
        let transform: CustomFn = Arc::new(move |raw| transform(raw).into());
        FieldRule::new(RuleKind::Custom(transform))
    }

    /// Shorthand for a `string` rule constrained by `regex`.
    pub fn matching(&self, regex: Regex) -> StringRule {
        self.string().pattern(regex)
    }
}

/// Ordered mapping from env key to field rule.
#[derive(Debug, Clone, Default)]
pub struct SchemaDefinition {
    fields: Vec<(String, FieldRule)>,
}

impl SchemaDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any earlier rule for the same key.
    pub fn field(mut self, key: impl Into<String>, rule: impl Into<FieldRule>) -> Self {
        self.insert(key, rule);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, rule: impl Into<FieldRule>) {
        let key = key.into();
        let rule = rule.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = rule,
            None => self.fields.push((key, rule)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, rule)| rule)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(key, rule)| (key.as_str(), rule))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldRule)> for SchemaDefinition {
    fn from_iter<I: IntoIterator<Item = (K, FieldRule)>>(iter: I) -> Self {
        let mut definition = SchemaDefinition::new();
        for (key, rule) in iter {
            definition.insert(key, rule);
        }
        definition
    }
}

impl<K: Into<String>, const N: usize> From<[(K, FieldRule); N]> for SchemaDefinition {
    fn from(fields: [(K, FieldRule); N]) -> Self {
        fields.into_iter().collect()
    }
}

//! Schema engines.
//!
//! A `SchemaEngine` is a compiled validator for a whole raw map. The built-in
//! `RuleEngine` runs each field's `FieldRule`; other engines can be plugged
//! into the manager through the same trait.

use crate::error::EnvError;
use crate::parser::RawEnvMap;
use crate::value::EnvValue;

use super::SchemaDefinition;
use super::issue::FieldFailure;

/// Validates a raw map against a compiled schema.
pub trait SchemaEngine {
    /// Validates every schema field of `raw`, in schema order.
    fn validate(&self, raw: &RawEnvMap) -> ValidationReport;
}

/// Per-field results of one validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Every schema key in schema order, with its validated value. `None` for
    /// optional fields without a value and for failed fields.
    pub values: Vec<(String, Option<EnvValue>)>,
    /// Failed fields in schema order.
    pub failures: Vec<FieldFailure>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// The failure strict mode reports.
    pub fn first_failure(&self) -> Option<&FieldFailure> {
        self.failures.first()
    }

    /// Returns the report, or the first failure as a fatal error.
    pub fn into_strict(self) -> Result<Self, EnvError> {
        match self.first_failure() {
            Some(failure) => Err(failure.to_error()),
            None => Ok(self),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.iter().any(|(existing, _)| existing == key)
    }
}

/// A schema definition frozen for validation.
pub type CompiledSchema = SchemaDefinition;

/// The built-in engine: one `FieldRule` per key.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    schema: CompiledSchema,
}

impl RuleEngine {
    pub fn compile(definition: SchemaDefinition) -> Self {
        Self { schema: definition }
    }

    pub fn schema(&self) -> &CompiledSchema {
        &self.schema
    }
}

impl SchemaEngine for RuleEngine {
    fn validate(&self, raw: &RawEnvMap) -> ValidationReport {
        let mut report = ValidationReport::default();

        for (key, rule) in self.schema.iter() {
            match rule.validate(raw.get(key)) {
                Ok(value) => report.values.push((key.to_string(), value)),
                Err(issue) => {
                    report.values.push((key.to_string(), None));
                    report.failures.push(FieldFailure {
                        key: key.to_string(),
                        issue,
                    });
                }
            }
        }

        report
    }
}

//! Validator outcomes.

use thiserror::Error;

use crate::error::EnvError;
use crate::value::EnvValue;

/// Outcome of validating one raw value. `Ok(None)` is an optional field
/// without a value.
pub type Validation = Result<Option<EnvValue>, ValidationIssue>;

/// Why a raw value was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("required and missing")]
    RequiredAndMissing,

    #[error("expected {expected_type}, found {found_type} \"{found_value}\"")]
    WrongType {
        found_type: String,
        expected_type: String,
        found_value: String,
    },
}

impl ValidationIssue {
    pub(crate) fn wrong_type(
        found_type: impl Into<String>,
        expected_type: impl Into<String>,
        found_value: impl Into<String>,
    ) -> Self {
        ValidationIssue::WrongType {
            found_type: found_type.into(),
            expected_type: expected_type.into(),
            found_value: found_value.into(),
        }
    }

    /// Attaches the schema key, producing the fatal error for strict mode.
    pub fn into_error(self, key: &str) -> EnvError {
        match self {
            ValidationIssue::RequiredAndMissing => EnvError::MissingRequired {
                key: key.to_string(),
            },
            ValidationIssue::WrongType {
                found_type,
                expected_type,
                found_value,
            } => EnvError::WrongType {
                key: key.to_string(),
                value: found_value,
                expected: expected_type,
                found: found_type,
            },
        }
    }
}

/// A rejected schema field, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub key: String,
    pub issue: ValidationIssue,
}

impl FieldFailure {
    pub fn to_error(&self) -> EnvError {
        self.issue.clone().into_error(&self.key)
    }
}

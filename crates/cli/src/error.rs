//! CLI errors and exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `EnvError` and `CliError` variants to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use envguard_config::EnvError;
use thiserror::Error;

/// Failures raised by the CLI itself rather than the library.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("{count} field(s) failed validation")]
    ValidationFailed { count: usize },
}

/// Structured exit codes for envguard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - I/O failure, bad schema file, bad arguments.
    GeneralError = 1,

    /// Not found - no env file exists, or the requested key is absent.
    NotFound = 4,

    /// Validation error - at least one schema field failed.
    ///
    /// Scripts should fix the env file and not retry unchanged.
    ValidationError = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&EnvError> for ExitCode {
    fn from(err: &EnvError) -> Self {
        if err.is_not_found() {
            ExitCode::NotFound
        } else if err.is_validation() {
            ExitCode::ValidationError
        } else {
            ExitCode::GeneralError
        }
    }
}

impl From<&CliError> for ExitCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::KeyNotFound(_) => ExitCode::NotFound,
            CliError::ValidationFailed { .. } => ExitCode::ValidationError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError unless a known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(env_err) = cause.downcast_ref::<EnvError>() {
                return ExitCode::from(env_err);
            }
            if let Some(cli_err) = cause.downcast_ref::<CliError>() {
                return ExitCode::from(cli_err);
            }
        }

        ExitCode::GeneralError
    }
}

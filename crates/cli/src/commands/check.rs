//! `check`: validate env files against a schema file.
//!
//! Strict mode stops at the first failing field and exits with its error.
//! Lenient mode reports every field and exits non-zero if any failed.

use anyhow::{Context, Result};
use envguard_config::{EnvironmentManager, ManagerOptions, OsFilesystem, SchemaSpec};
use std::io::Write;
use std::path::Path;

use crate::error::CliError;
use crate::formatters::{CheckRow, OutputFormat, format_check};

pub fn run(
    options: ManagerOptions,
    schema: &Path,
    lenient: bool,
    format: &str,
    out: &mut impl Write,
) -> Result<()> {
    let format = OutputFormat::parse(format, &[OutputFormat::Table, OutputFormat::Json])?;
    let definition = SchemaSpec::load_definition(&OsFilesystem, schema)?;

    let env = EnvironmentManager::from_definition(definition, options.with_strict(!lenient))
        .context("Environment validation failed")?;

    let failures = env.validation_failures();
    let rows: Vec<CheckRow> = env
        .engine()
        .map(|engine| engine.schema().keys().collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter()
        .map(|key| match failures.iter().find(|f| f.key == key) {
            Some(failure) => CheckRow {
                key: key.to_string(),
                status: "invalid",
                value: None,
                error: Some(failure.to_error().to_string()),
            },
            None => CheckRow {
                key: key.to_string(),
                status: if env.get(key).is_some() { "ok" } else { "unset" },
                value: env.get(key).cloned(),
                error: None,
            },
        })
        .collect();

    out.write_all(format_check(&rows, format)?.as_bytes())?;

    if !failures.is_empty() {
        return Err(CliError::ValidationFailed {
            count: failures.len(),
        }
        .into());
    }
    Ok(())
}

//! `get`: print a single value.

use anyhow::{Context, Result};
use envguard_config::{EnvironmentManager, ManagerOptions};
use std::io::Write;

use crate::error::CliError;
use crate::formatters::display;

pub fn run(
    options: ManagerOptions,
    key: &str,
    default: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let env = EnvironmentManager::get_instance(options).context("Failed to load environment")?;

    let value = match (env.get(key), default) {
        (Some(value), _) => display(value),
        (None, Some(default)) => default.to_string(),
        (None, None) => return Err(CliError::KeyNotFound(key.to_string()).into()),
    };

    writeln!(out, "{value}")?;
    Ok(())
}

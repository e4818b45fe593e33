//! `dump`: print every loaded value without validation.

use anyhow::{Context, Result};
use envguard_config::{EnvironmentManager, ManagerOptions};
use std::io::Write;

use crate::formatters::{OutputFormat, format_values};

pub fn run(options: ManagerOptions, format: &str, out: &mut impl Write) -> Result<()> {
    let format = OutputFormat::parse(
        format,
        &[OutputFormat::Json, OutputFormat::Env, OutputFormat::Table],
    )?;
    let env = EnvironmentManager::get_instance(options).context("Failed to load environment")?;

    tracing::debug!(files = env.loaded_files().len(), "Dumping environment");
    out.write_all(format_values(env.all(), format)?.as_bytes())?;
    Ok(())
}
